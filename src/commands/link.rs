/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The `link` meta-command: CRUD for user-defined shortcuts.
//!
//! Grammar:
//!   `link;show`                       list all shortcuts
//!   `link;<name>`                     show one shortcut
//!   `link;<name>;delete`              delete
//!   `link;<name>;<url>[;<search>]`    add
//!
//! Adding over an existing shortcut does not mutate directly: the proposed
//! link is parked in `Dispatch::pending_add` and the interpreter turns it
//! into a confirmation request for the caller to answer.

use crate::commands::{Builtin, Dispatch};
use crate::effects::Effect;
use crate::links::Link;
use crate::url;

pub fn execute(args: &[String], ctx: &mut Dispatch) -> Effect {
    match args.len() {
        0 => {
            let sep = ctx.config.separator;
            Effect::error(
                format!(
                    "link is a builtin command. To search for \"link\" try g{}link",
                    sep
                ),
                8000,
            )
        }
        1 if args[0] == "show" => show_all(ctx),
        1 => show_one(&args[0], ctx),
        2 | 3 if args[1] == "delete" => delete(&args[0], ctx),
        2 | 3 => add(args, ctx),
        // Longer forms are outside the grammar and do nothing.
        _ => Effect::None,
    }
}

fn show_all(ctx: &Dispatch) -> Effect {
    if ctx.config.links.is_empty() {
        return Effect::display("No links saved", 5000);
    }

    let listing = ctx
        .config
        .links
        .iter()
        .map(describe)
        .collect::<Vec<_>>()
        .join("\n");
    Effect::display(listing, 30000)
}

fn show_one(name: &str, ctx: &Dispatch) -> Effect {
    match ctx.config.links.find(name) {
        Some(link) => {
            let mut text = format!("\"{}\" links to {}", name, link.url);
            if !link.search.is_empty() {
                text.push_str(&format!(" ({})", link.search));
            }
            Effect::display(text, 10000)
        }
        // A missing name shows nothing, matching the lenient show path.
        None => Effect::None,
    }
}

fn delete(name: &str, ctx: &mut Dispatch) -> Effect {
    if ctx.config.links.remove(name) {
        ctx.mutated = true;
        Effect::display(format!("Link {} deleted", name), 5000)
    } else {
        Effect::None
    }
}

fn add(args: &[String], ctx: &mut Dispatch) -> Effect {
    let name = &args[0];

    // Reserved names are rejected at creation time, never at resolution time.
    if Builtin::is_reserved(name) || ctx.config.resolve_alias(name).is_some() {
        return Effect::error(format!("Cannot override builtin command: {}", name), 5000);
    }

    let full_url = url::build_url(&args[1], "", "");
    if !url::looks_like_url(&full_url) {
        return Effect::error("Invalid URL", 5000);
    }

    let search = args.get(2).cloned().unwrap_or_default();
    let link = Link::new(name.clone(), full_url, search);

    if ctx.config.links.contains(name) {
        // Suspend: the interpreter owns the confirmation protocol.
        ctx.pending_add = Some(link);
        return Effect::None;
    }

    let saved = Effect::display(format!("Link {} saved", name), 5000);
    ctx.config.links.upsert(link);
    ctx.mutated = true;
    saved
}

fn describe(link: &Link) -> String {
    let mut line = format!("{} --> {}", link.command, link.url);
    if !link.search.is_empty() {
        line.push_str(&format!(" ({})", link.search));
    }
    line
}
