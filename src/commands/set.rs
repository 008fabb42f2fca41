/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The `set` meta-command: nested settings with show-current, validate, and
//! mutate semantics. Every invalid value is recovered locally as an error
//! display; the configuration only changes on a fully valid input.

use crate::commands::{Builtin, Dispatch};
use crate::config::TaabConfig;
use crate::effects::Effect;
use crate::url;

pub fn execute(args: &[String], ctx: &mut Dispatch) -> Effect {
    let Some(key) = args.first() else {
        return Effect::error("No setting given. Try set;defaultCommand", 5000);
    };
    let value = args.get(1).map(String::as_str);

    match key.as_str() {
        "defaultCommand" => default_command(value, ctx),
        "bgColor" => color(value, ctx, ColorTarget::Background),
        "textColor" => color(value, ctx, ColorTarget::Text),
        "fontSize" => css_size(value, ctx, SizeTarget::Font),
        "clockSize" => css_size(value, ctx, SizeTarget::Clock),
        "newtab" | "alwaysNewTab" => always_new_tab(value, ctx),
        "clock" => clock(value, ctx),
        "defaults" => {
            *ctx.config = TaabConfig::default();
            ctx.mutated = true;
            Effect::display("Settings reset to defaults", 5000)
        }
        other => Effect::error(format!("\"{}\" is not a valid setting", other), 5000),
    }
}

fn default_command(value: Option<&str>, ctx: &mut Dispatch) -> Effect {
    let Some(target) = value else {
        return Effect::display(
            format!("Default command: {}", ctx.config.default_command),
            5000,
        );
    };

    // The fallback handler is looked up by canonical name only.
    let is_canonical = Builtin::ALL.iter().any(|b| b.name() == target);
    if !is_canonical {
        return Effect::error(
            format!(
                "Error: command {} not found; default command not changed",
                target
            ),
            10000,
        );
    }

    ctx.config.default_command = target.to_string();
    ctx.mutated = true;
    Effect::display(format!("Set default command to {}", target), 3000)
}

enum ColorTarget {
    Background,
    Text,
}

fn color(value: Option<&str>, ctx: &mut Dispatch, target: ColorTarget) -> Effect {
    let (label, current) = match target {
        ColorTarget::Background => ("background", &ctx.config.bg_color),
        ColorTarget::Text => ("text", &ctx.config.text_color),
    };

    let Some(hex) = value else {
        return Effect::display(format!("Current {} color: {}", label, current), 8000);
    };

    if !url::is_valid_hex_color(hex) {
        return Effect::error("Error: invalid hex value", 5000);
    }

    match target {
        ColorTarget::Background => ctx.config.bg_color = hex.to_string(),
        ColorTarget::Text => ctx.config.text_color = hex.to_string(),
    }
    ctx.mutated = true;
    Effect::display(format!("Set {} color to {}", label, hex), 3000)
}

enum SizeTarget {
    Font,
    Clock,
}

fn css_size(value: Option<&str>, ctx: &mut Dispatch, target: SizeTarget) -> Effect {
    let (label, current) = match target {
        SizeTarget::Font => ("input font", &ctx.config.font_size),
        SizeTarget::Clock => ("clock font", &ctx.config.clock_size),
    };

    match value {
        None => Effect::display(format!("Current {} size: {}", label, current), 8000),
        Some("") => Effect::error("Error: no size given", 5000),
        Some(size) => {
            match target {
                SizeTarget::Font => ctx.config.font_size = size.to_string(),
                SizeTarget::Clock => ctx.config.clock_size = size.to_string(),
            }
            ctx.mutated = true;
            Effect::display(format!("Set {} size to {}", label, size), 3000)
        }
    }
}

fn always_new_tab(value: Option<&str>, ctx: &mut Dispatch) -> Effect {
    match value {
        None => {
            let state = if ctx.config.always_new_tab { "on" } else { "off" };
            Effect::display(format!("alwaysNewTab is {}", state), 5000)
        }
        Some("on") => {
            ctx.config.always_new_tab = true;
            ctx.mutated = true;
            Effect::display("alwaysNewTab on", 3000)
        }
        Some("off") => {
            ctx.config.always_new_tab = false;
            ctx.mutated = true;
            Effect::display("alwaysNewTab off", 3000)
        }
        Some(_) => Effect::error("Must be set to either 'on' or 'off'", 5000),
    }
}

fn clock(value: Option<&str>, ctx: &mut Dispatch) -> Effect {
    let Some(value) = value else {
        return Effect::display(
            format!(
                "Clock is {}, {}-hour",
                if ctx.config.show_clock { "on" } else { "off" },
                if ctx.config.military_clock { "24" } else { "12" }
            ),
            5000,
        );
    };

    match value {
        "on" => ctx.config.show_clock = true,
        "off" => ctx.config.show_clock = false,
        "12" => ctx.config.military_clock = false,
        "24" => ctx.config.military_clock = true,
        _ => return Effect::error("Must be set to 'on', 'off', '12' or '24'", 5000),
    }
    ctx.mutated = true;
    Effect::display(format!("Clock set to {}", value), 3000)
}
