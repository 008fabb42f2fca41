/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! One-shot value objects handed to the interpreter's collaborators.
//!
//! The interpreter never touches the browser, the terminal, or the network
//! itself: it answers every input line with an [`Outcome`] and the caller
//! (CLI, web server, tests) decides what to do with it.

use serde::Serialize;

/// A request to open a URL, in the current or a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    pub url: String,
    pub new_tab: bool,
}

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Normal,
    Error,
}

/// A request to show a transient message to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRequest {
    pub text: String,
    pub duration_ms: u64,
    pub severity: Severity,
}

impl DisplayRequest {
    pub fn normal(text: impl Into<String>, duration_ms: u64) -> Self {
        DisplayRequest {
            text: text.into(),
            duration_ms,
            severity: Severity::Normal,
        }
    }

    pub fn error(text: impl Into<String>, duration_ms: u64) -> Self {
        DisplayRequest {
            text: text.into(),
            duration_ms,
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A suspended shortcut overwrite, waiting for a yes/no answer.
///
/// The proposed link stays inside the interpreter; callers only see the id
/// and the prompt, and complete the add with
/// [`Interpreter::resolve_confirmation`].
///
/// [`Interpreter::resolve_confirmation`]: crate::Interpreter::resolve_confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub id: u64,
    pub prompt: String,
}

/// The visible result of one interpretation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do (empty input, declined confirmation, `hn` with an
    /// unrecognized section).
    None,
    Navigate(NavigationRequest),
    Display(DisplayRequest),
    /// A shortcut add collided with an existing shortcut; the caller must
    /// answer before the registry changes.
    ConfirmOverwrite(PendingConfirmation),
    /// The caller should fetch the remote config blob and resume with
    /// [`Interpreter::apply_remote_config`]. `notice` is shown immediately.
    ///
    /// [`Interpreter::apply_remote_config`]: crate::Interpreter::apply_remote_config
    FetchConfig {
        gist_id: String,
        notice: DisplayRequest,
    },
}

impl Effect {
    pub fn navigate(url: impl Into<String>, new_tab: bool) -> Self {
        Effect::Navigate(NavigationRequest {
            url: url.into(),
            new_tab,
        })
    }

    pub fn display(text: impl Into<String>, duration_ms: u64) -> Self {
        Effect::Display(DisplayRequest::normal(text, duration_ms))
    }

    pub fn error(text: impl Into<String>, duration_ms: u64) -> Self {
        Effect::Display(DisplayRequest::error(text, duration_ms))
    }
}

/// One interpretation cycle's effect plus whether configuration changed.
///
/// Persistence is the caller's job: when `config_mutated` is set, the caller
/// writes the config back before acting on the effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub effect: Effect,
    pub config_mutated: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Outcome {
            effect: Effect::None,
            config_mutated: false,
        }
    }

    pub fn of(effect: Effect) -> Self {
        Outcome {
            effect,
            config_mutated: false,
        }
    }

    pub fn mutated(effect: Effect) -> Self {
        Outcome {
            effect,
            config_mutated: true,
        }
    }
}
