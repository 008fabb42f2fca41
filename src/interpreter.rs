/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The interpretation engine: tokenize a raw input line, resolve it against
//! the builtin registry, the URL heuristic, and the link registry, and
//! dispatch to the matching handler.
//!
//! Resolution classes are mutually exclusive and checked in a fixed priority
//! order: builtin name, builtin alias, user alias, URL literal, shortcut,
//! default-command fallback. The first match wins and consumes token 0 —
//! except the fallback, which never matched anything and therefore passes
//! the whole token list through.

use crate::commands::{Builtin, Dispatch, HELP_URL, remote};
use crate::config::TaabConfig;
use crate::effects::{Effect, Outcome, PendingConfirmation};
use crate::links::Link;
use crate::url;

/// New-tab flag token, recognized only in final argument position.
const NEW_TAB_FLAG: &str = "n";

struct PendingAdd {
    id: u64,
    link: Link,
}

/// Single-shot interpreter; one call to [`Interpreter::interpret`] per input
/// line.
///
/// The only state carried between invocations is the last entered command
/// (for input recall) and an optional suspended shortcut overwrite.
#[derive(Default)]
pub struct Interpreter {
    last_entered_command: Option<String>,
    pending: Option<PendingAdd>,
    next_confirmation_id: u64,
}

enum Resolution {
    Builtin(Builtin),
    UrlLiteral(String),
    Shortcut(Link),
    Fallback,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw input of the last non-empty interpretation, for the
    /// "recall previous" UI action.
    pub fn last_entered_command(&self) -> Option<&str> {
        self.last_entered_command.as_deref()
    }

    /// Interpret one input line against the given configuration.
    ///
    /// Handlers may mutate `config`; `Outcome::config_mutated` tells the
    /// caller to persist. The interpreter itself never touches storage,
    /// network, or UI.
    pub fn interpret(&mut self, raw: &str, config: &mut TaabConfig) -> Outcome {
        let input = raw.trim();
        if input.is_empty() {
            return Outcome::none();
        }

        self.last_entered_command = Some(input.to_string());

        // Bare keywords, recognized before tokenization.
        if input.eq_ignore_ascii_case("help") {
            return Outcome::of(Effect::navigate(HELP_URL, true));
        }
        if input.eq_ignore_ascii_case("options") || input.eq_ignore_ascii_case("config") {
            return Outcome::of(remote::settings_summary(config));
        }

        let mut tokens: Vec<String> = input
            .split(config.separator)
            .map(|token| token.trim().to_string())
            .collect();
        let command = tokens[0].to_lowercase();

        let resolution = if let Some(builtin) = Builtin::lookup(&command) {
            tokens.remove(0);
            Resolution::Builtin(builtin)
        } else if let Some(builtin) = config.resolve_alias(&command).and_then(Builtin::lookup) {
            tokens.remove(0);
            Resolution::Builtin(builtin)
        } else if url::looks_like_url(&tokens[0]) {
            // Original case, not the lowercased command: URL paths are
            // case-sensitive.
            Resolution::UrlLiteral(tokens.remove(0))
        } else if let Some(link) = config.links.find(&command) {
            tokens.remove(0);
            Resolution::Shortcut(link.clone())
        } else {
            Resolution::Fallback
        };

        let mut new_tab = false;
        if tokens.last().map(String::as_str) == Some(NEW_TAB_FLAG) {
            new_tab = true;
            tokens.pop();
        }

        // Resolved before ctx takes the mutable borrow.
        let fallback = Builtin::lookup(&config.default_command);

        let mut ctx = Dispatch {
            config,
            new_tab,
            mutated: false,
            pending_add: None,
        };

        let effect = match resolution {
            Resolution::Builtin(builtin) => builtin.execute(&tokens, &mut ctx),
            Resolution::UrlLiteral(token) => ctx.navigate(url::build_url(&token, "", "")),
            Resolution::Shortcut(link) => {
                if tokens.is_empty() {
                    ctx.navigate(link.url)
                } else {
                    // Shortcut queries concatenate raw; encoding happened at
                    // creation time for the URL itself.
                    ctx.navigate(format!("{}{}{}", link.url, link.search, tokens.join(" ")))
                }
            }
            Resolution::Fallback => match fallback {
                // Token 0 was never consumed: the default command sees the
                // whole token list as its arguments.
                Some(builtin) => builtin.execute(&tokens, &mut ctx),
                // Unreachable while `set defaultCommand` validates its
                // target, but kept as the defensive branch.
                None => Effect::error("command not recognized", 5000),
            },
        };

        let mutated = ctx.mutated;
        if let Some(link) = ctx.pending_add.take() {
            return Outcome::of(self.propose_overwrite(link));
        }

        Outcome {
            effect,
            config_mutated: mutated,
        }
    }

    fn propose_overwrite(&mut self, link: Link) -> Effect {
        let id = self.next_confirmation_id;
        self.next_confirmation_id += 1;

        let prompt = format!("Overwrite existing shortcut \"{}\"?", link.command);
        self.pending = Some(PendingAdd { id, link });

        Effect::ConfirmOverwrite(PendingConfirmation { id, prompt })
    }

    /// Complete a suspended shortcut overwrite.
    ///
    /// Accepting replaces the existing shortcut; declining discards the
    /// proposal and leaves the registry untouched. An id that doesn't match
    /// the pending confirmation is answered with an error and the pending
    /// state is kept.
    pub fn resolve_confirmation(
        &mut self,
        id: u64,
        accepted: bool,
        config: &mut TaabConfig,
    ) -> Outcome {
        match self.pending.take() {
            Some(pending) if pending.id == id => {
                if accepted {
                    let message = format!("Link {} saved", pending.link.command);
                    config.links.upsert(pending.link);
                    Outcome::mutated(Effect::display(message, 5000))
                } else {
                    Outcome::none()
                }
            }
            other => {
                self.pending = other;
                Outcome::of(Effect::error("No pending shortcut to confirm", 5000))
            }
        }
    }

    /// Resume a `config;fetch`: merge the fetched blob into the
    /// configuration and record where it came from.
    ///
    /// Parse failures leave the configuration untouched.
    pub fn apply_remote_config(
        &mut self,
        fragment: &str,
        gist_id: &str,
        config: &mut TaabConfig,
    ) -> Outcome {
        match config.merge_fragment(fragment) {
            Ok(()) => {
                config.gist_id = Some(gist_id.to_string());
                Outcome::mutated(Effect::display("Config imported", 5000))
            }
            Err(e) => Outcome::of(Effect::error(e, 5000)),
        }
    }
}
