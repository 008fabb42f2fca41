/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

pub mod commands;
pub mod config;
pub mod effects;
pub mod gist;
pub mod interpreter;
pub mod links;
pub mod server;
pub mod url;

/// Prefix for XDG directories.
pub const APP_PREFIX: &str = "taab";

pub use commands::Builtin;
pub use config::TaabConfig;
pub use effects::{
    DisplayRequest, Effect, NavigationRequest, Outcome, PendingConfirmation, Severity,
};
pub use interpreter::Interpreter;
pub use links::{Link, LinkRegistry};
