/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The `config` meta-command: export, inline import, and remote (gist)
//! import of the configuration blob.
//!
//! `config;fetch` is the one operation that needs the network. The handler
//! never fetches anything itself; it emits [`Effect::FetchConfig`] and the
//! caller resumes through
//! [`Interpreter::apply_remote_config`](crate::Interpreter::apply_remote_config).

use crate::commands::Dispatch;
use crate::config::TaabConfig;
use crate::effects::{DisplayRequest, Effect};
use crate::gist;

pub fn execute(args: &[String], ctx: &mut Dispatch) -> Effect {
    match args.first().map(String::as_str) {
        None => settings_summary(ctx.config),
        Some("export") => export(ctx.config),
        Some("import") => import(args, ctx),
        Some("open") => open_gist(ctx),
        Some("fetch") => fetch(args, ctx.config),
        Some(other) => Effect::error(
            format!(
                "\"{}\" is not a config action (try export, import, open, or fetch)",
                other
            ),
            5000,
        ),
    }
}

/// Human-readable dump of the current settings, also used for the bare
/// `config`/`options` keyword.
pub fn settings_summary(config: &TaabConfig) -> Effect {
    let text = format!(
        "separator: {}\n\
         defaultCommand: {}\n\
         alwaysNewTab: {}\n\
         clock: {}, {}-hour\n\
         bgColor: {}  textColor: {}\n\
         fontSize: {}  clockSize: {}\n\
         links: {}\n\
         gistID: {}",
        config.separator,
        config.default_command,
        if config.always_new_tab { "on" } else { "off" },
        if config.show_clock { "on" } else { "off" },
        if config.military_clock { "24" } else { "12" },
        config.bg_color,
        config.text_color,
        config.font_size,
        config.clock_size,
        config.links.len(),
        config.gist_id.as_deref().unwrap_or("(none)"),
    );
    Effect::display(text, 30000)
}

fn export(config: &TaabConfig) -> Effect {
    match config.to_json() {
        Ok(json) => Effect::display(json, 25000),
        Err(e) => Effect::error(format!("Error serializing config: {}", e), 5000),
    }
}

fn import(args: &[String], ctx: &mut Dispatch) -> Effect {
    if args.len() < 2 {
        return Effect::error("Error: no config given to import", 5000);
    }

    // The fragment was tokenized along with everything else; re-joining with
    // the separator restores the original JSON text.
    let fragment = args[1..].join(&ctx.config.separator.to_string());

    match ctx.config.merge_fragment(&fragment) {
        Ok(()) => {
            ctx.mutated = true;
            Effect::display("Config imported", 5000)
        }
        Err(e) => Effect::error(e, 5000),
    }
}

fn open_gist(ctx: &Dispatch) -> Effect {
    match &ctx.config.gist_id {
        Some(id) => ctx.navigate_new_tab(format!("https://gist.github.com/{}", id)),
        None => Effect::error(
            "Error: No gist ID found. Make sure you have fetched your config at least once.",
            8000,
        ),
    }
}

fn fetch(args: &[String], config: &TaabConfig) -> Effect {
    let gist_id = if let Some(arg) = args.get(1) {
        match gist::extract_gist_id(arg) {
            Some(id) => id,
            None => {
                return Effect::error(
                    "Error: unable to parse gist ID. Try entering just the 32 character ID string.",
                    8000,
                );
            }
        }
    } else if let Some(id) = &config.gist_id {
        id.clone()
    } else {
        return Effect::error("Error: no gist ID", 5000);
    };

    Effect::FetchConfig {
        gist_id,
        notice: DisplayRequest::normal("Fetching gist...", 2500),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Severity;

    fn run(args: &[&str], config: &mut TaabConfig) -> (Effect, bool) {
        let mut ctx = Dispatch {
            config,
            new_tab: false,
            mutated: false,
            pending_add: None,
        };
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let effect = execute(&args, &mut ctx);
        (effect, ctx.mutated)
    }

    #[test]
    fn export_displays_the_config_json() {
        let mut config = TaabConfig::default();
        let (effect, mutated) = run(&["export"], &mut config);
        match effect {
            Effect::Display(display) => {
                assert_eq!(display.severity, Severity::Normal);
                assert!(display.text.contains("\"defaultCommand\""));
            }
            other => panic!("expected display, got {:?}", other),
        }
        assert!(!mutated);
    }

    #[test]
    fn import_merges_inline_json() {
        let mut config = TaabConfig::default();
        let (effect, mutated) = run(&["import", r##"{"bgColor": "#123456"}"##], &mut config);
        assert_eq!(effect, Effect::display("Config imported", 5000));
        assert!(mutated);
        assert_eq!(config.bg_color, "#123456");
    }

    #[test]
    fn import_rejoins_tokens_split_on_the_separator() {
        // {"fontSize": "18px;22px"} contains the separator and arrives as two
        // argument tokens.
        let mut config = TaabConfig::default();
        let (effect, _) = run(
            &["import", r#"{"fontSize": "18px"#, r#"22px"}"#],
            &mut config,
        );
        assert_eq!(effect, Effect::display("Config imported", 5000));
        assert_eq!(config.font_size, "18px;22px");
    }

    #[test]
    fn import_parse_error_leaves_config_untouched() {
        let mut config = TaabConfig::default();
        let before = config.clone();
        let (effect, mutated) = run(&["import", "{broken"], &mut config);
        match effect {
            Effect::Display(display) => assert!(display.is_error()),
            other => panic!("expected display, got {:?}", other),
        }
        assert!(!mutated);
        assert_eq!(config, before);
    }

    #[test]
    fn open_requires_a_stored_gist_id() {
        let mut config = TaabConfig::default();
        let (effect, _) = run(&["open"], &mut config);
        match effect {
            Effect::Display(display) => assert!(display.is_error()),
            other => panic!("expected display, got {:?}", other),
        }

        config.gist_id = Some("d8fff6368b4f6b45b0b0cbc46f0a846b".to_string());
        let (effect, _) = run(&["open"], &mut config);
        match effect {
            Effect::Navigate(nav) => {
                assert_eq!(
                    nav.url,
                    "https://gist.github.com/d8fff6368b4f6b45b0b0cbc46f0a846b"
                );
                assert!(nav.new_tab);
            }
            other => panic!("expected navigation, got {:?}", other),
        }
    }

    #[test]
    fn fetch_extracts_the_id_from_a_url() {
        let mut config = TaabConfig::default();
        let (effect, _) = run(
            &[
                "fetch",
                "https://gist.github.com/user/d8fff6368b4f6b45b0b0cbc46f0a846b",
            ],
            &mut config,
        );
        match effect {
            Effect::FetchConfig { gist_id, notice } => {
                assert_eq!(gist_id, "d8fff6368b4f6b45b0b0cbc46f0a846b");
                assert_eq!(notice.text, "Fetching gist...");
            }
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn fetch_falls_back_to_the_stored_id() {
        let mut config = TaabConfig::default();
        config.gist_id = Some("d8fff6368b4f6b45b0b0cbc46f0a846b".to_string());
        let (effect, _) = run(&["fetch"], &mut config);
        assert!(matches!(effect, Effect::FetchConfig { .. }));
    }

    #[test]
    fn fetch_with_no_id_anywhere_is_an_error() {
        let mut config = TaabConfig::default();
        let (effect, _) = run(&["fetch"], &mut config);
        match effect {
            Effect::Display(display) => assert!(display.is_error()),
            other => panic!("expected display, got {:?}", other),
        }
    }

    #[test]
    fn unknown_action_is_an_error() {
        let mut config = TaabConfig::default();
        let (effect, mutated) = run(&["sync"], &mut config);
        match effect {
            Effect::Display(display) => assert!(display.is_error()),
            other => panic!("expected display, got {:?}", other),
        }
        assert!(!mutated);
    }
}
