/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! URL building and the syntactic validators used by the interpreter.

use std::sync::OnceLock;

use regex::Regex;

static URL_LITERAL: OnceLock<Regex> = OnceLock::new();
static HEX_COLOR: OnceLock<Regex> = OnceLock::new();

/// Build an absolute URL from a base, a search-path suffix, and a query.
///
/// The base keeps its scheme if it already has one, otherwise `http://` is
/// prepended. Only the query is percent-encoded; the base and suffix pass
/// through untouched, malformed or not.
pub fn build_url(base: &str, search: &str, query: &str) -> String {
    let dest = if has_scheme(base) {
        base.to_string()
    } else {
        format!("http://{}", base)
    };

    format!("{}{}{}", dest, search, encode_query(query))
}

/// Percent-encode a query string the way search engines expect.
pub fn encode_query(query: &str) -> String {
    percent_encoding::utf8_percent_encode(query, percent_encoding::NON_ALPHANUMERIC).to_string()
}

fn has_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whether a token is domain-shaped enough to navigate to directly.
///
/// Optional scheme, optional `www.`, a host label with a 2-6 character
/// top-level suffix, optional path/query; anything containing whitespace is
/// rejected. Only consulted when no builtin or alias matched, so a shortcut
/// name containing a dot is a known false positive.
pub fn looks_like_url(token: &str) -> bool {
    let re = URL_LITERAL.get_or_init(|| {
        Regex::new(
            r"(http(s)?://.)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)",
        )
        .expect("invalid URL-literal regex")
    });

    re.is_match(token) && !token.contains(char::is_whitespace)
}

/// Whether a string is a well-formed CSS hex color.
///
/// `#EBEBEB` is valid, `EBEBEB` is not. `#FFF` is valid shorthand.
pub fn is_valid_hex_color(value: &str) -> bool {
    let re = HEX_COLOR.get_or_init(|| {
        Regex::new(r"(?i)^#[0-9a-f]{3}([0-9a-f]{3})?$").expect("invalid hex color regex")
    });

    re.is_match(value)
}
