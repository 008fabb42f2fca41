/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! User-defined shortcuts ("links") and the ordered registry that holds them.

use serde::{Deserialize, Serialize};

/// A user-defined shortcut: a command name mapping to a URL, with an
/// optional search suffix appended before the user's query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub command: String,
    pub url: String,
    #[serde(default)]
    pub search: String,
}

impl Link {
    pub fn new(command: impl Into<String>, url: impl Into<String>, search: impl Into<String>) -> Self {
        Link {
            command: command.into(),
            url: url.into(),
            search: search.into(),
        }
    }
}

/// Ordered collection of shortcuts, keyed by command name.
///
/// Command-name uniqueness is enforced by the `link` meta-command, not here:
/// [`LinkRegistry::upsert`] replaces duplicates, but a loaded config carrying
/// duplicates is served as-is (first match wins on lookup).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkRegistry(Vec<Link>);

impl LinkRegistry {
    pub fn new(links: Vec<Link>) -> Self {
        LinkRegistry(links)
    }

    pub fn find(&self, command: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.command == command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.find(command).is_some()
    }

    /// Insert a shortcut, replacing any existing entry with the same command
    /// name. Replacements keep their position; new entries append.
    pub fn upsert(&mut self, link: Link) {
        match self.0.iter_mut().find(|l| l.command == link.command) {
            Some(existing) => *existing = link,
            None => self.0.push(link),
        }
    }

    /// Remove a shortcut by command name. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, command: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|link| link.command != command);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
