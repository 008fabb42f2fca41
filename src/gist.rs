/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Remote config blob retrieval via the GitHub gist API.
//!
//! A config gist must contain exactly one file; its content is the JSON
//! fragment handed to [`Interpreter::apply_remote_config`].
//!
//! [`Interpreter::apply_remote_config`]: crate::Interpreter::apply_remote_config

use std::sync::OnceLock;

use regex::Regex;

const GIST_API: &str = "https://api.github.com/gists";

static GIST_ID: OnceLock<Regex> = OnceLock::new();

/// Pull a 32-character gist ID out of a raw ID or a full gist URL.
pub fn extract_gist_id(input: &str) -> Option<String> {
    let re = GIST_ID
        .get_or_init(|| Regex::new(r"[0-9A-Za-z]{32}").expect("invalid gist ID regex"));
    re.find(input).map(|m| m.as_str().to_string())
}

/// Fetch a gist and return the content of its single file.
///
/// Blocking. Callers decide when to pay the network cost; the interpreter
/// itself never calls this.
pub fn fetch(gist_id: &str) -> Result<String, String> {
    let url = format!("{}/{}", GIST_API, gist_id);

    // The GitHub API rejects requests without a User-Agent.
    let response = ureq::get(&url)
        .set("User-Agent", concat!("taab/", env!("CARGO_PKG_VERSION")))
        .set("Accept", "application/vnd.github+json")
        .call()
        .map_err(|e| format!("Error fetching gist: {}", e))?;

    let body: serde_json::Value = response
        .into_json()
        .map_err(|e| format!("Error reading gist response: {}", e))?;

    single_file_content(&body)
}

/// Extract the one file's content from a gist API response.
fn single_file_content(body: &serde_json::Value) -> Result<String, String> {
    let files = body
        .get("files")
        .and_then(|f| f.as_object())
        .ok_or_else(|| "Error: gist response contained no files".to_string())?;

    if files.len() > 1 {
        return Err(
            "Error: Multiple files found in gist. Please use a gist with only one file."
                .to_string(),
        );
    }

    let (_, file) = files
        .iter()
        .next()
        .ok_or_else(|| "Error: gist contained no files".to_string())?;

    file.get("content")
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| "Error: gist file had no content".to_string())
}
