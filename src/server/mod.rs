/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Web front end: point your browser's search engine at
//! `http://host:port/?cmd=%s` and every interpretation happens server-side.
//!
//! All shared state lives in one `Mutex<AppState>`; interpretation,
//! confirmation policy, gist fetch, and persistence all happen inside the
//! critical section, so a mutation is durable before the redirect that
//! depends on it is sent.

use std::sync::Mutex;

use rocket::response::Redirect;
use rocket::response::content::RawHtml;
use rocket::{State, catch, catchers, get, routes};

use crate::commands::Builtin;
use crate::config::TaabConfig;
use crate::effects::{DisplayRequest, Effect};
use crate::gist;
use crate::interpreter::Interpreter;

struct AppState {
    interpreter: Interpreter,
    config: TaabConfig,
}

/// Server knobs, supplied by the CLI.
pub struct ServerOptions {
    pub port: u16,
    pub address: String,
    pub log_level: String,
}

#[get("/?<cmd>")]
fn search(cmd: Option<&str>, state: &State<Mutex<AppState>>) -> Result<Redirect, RawHtml<String>> {
    let mut app = state.lock().expect("state lock poisoned");

    let Some(query) = cmd else {
        return Err(RawHtml(landing_page(&app.config)));
    };

    let outcome = {
        let AppState {
            interpreter,
            config,
        } = &mut *app;
        interpreter.interpret(query, config)
    };
    let mut dirty = outcome.config_mutated;

    let effect = match outcome.effect {
        // HTTP is one-shot: the confirmation protocol degenerates to a
        // decline plus instructions.
        Effect::ConfirmOverwrite(pending) => {
            let AppState {
                interpreter,
                config,
            } = &mut *app;
            interpreter.resolve_confirmation(pending.id, false, config);
            let sep = config.separator;
            Effect::error(
                format!(
                    "That shortcut already exists. Delete it first with link{0}<name>{0}delete, then add it again.",
                    sep
                ),
                8000,
            )
        }
        // The fetch suspension point: resolved inline, inside the critical
        // section, before any response leaves.
        Effect::FetchConfig { gist_id, .. } => match gist::fetch(&gist_id) {
            Ok(blob) => {
                let AppState {
                    interpreter,
                    config,
                } = &mut *app;
                let resumed = interpreter.apply_remote_config(&blob, &gist_id, config);
                dirty |= resumed.config_mutated;
                resumed.effect
            }
            Err(e) => Effect::error(e, 8000),
        },
        other => other,
    };

    if dirty && let Err(e) = app.config.save() {
        eprintln!("Warning: failed to persist config: {}", e);
    }

    match effect {
        Effect::Navigate(nav) => Ok(Redirect::to(nav.url)),
        Effect::Display(display) => Err(RawHtml(message_page(&display, &app.config))),
        Effect::None => Err(RawHtml(landing_page(&app.config))),
        // Both suspension effects were resolved above.
        Effect::ConfirmOverwrite(_) | Effect::FetchConfig { .. } => {
            Err(RawHtml(landing_page(&app.config)))
        }
    }
}

#[get("/health")]
fn health() -> &'static str {
    "ok"
}

#[catch(404)]
fn not_found() -> Redirect {
    Redirect::to("/")
}

pub async fn launch(config: TaabConfig, options: ServerOptions) -> Result<(), Box<rocket::Error>> {
    println!("taab listening on {}:{}", options.address, options.port);

    let figment = rocket::Config::figment()
        .merge(("address", options.address))
        .merge(("port", options.port))
        .merge(("log_level", options.log_level))
        .merge(("ident", format!("taab/{}", env!("CARGO_PKG_VERSION"))));

    let state = Mutex::new(AppState {
        interpreter: Interpreter::new(),
        config,
    });

    rocket::custom(figment)
        .manage(state)
        .mount("/", routes![search, health])
        .register("/", catchers![not_found])
        .launch()
        .await?;

    Ok(())
}

fn landing_page(config: &TaabConfig) -> String {
    let mut rows = String::new();
    for builtin in Builtin::ALL {
        let info = builtin.info();
        rows.push_str(&format!(
            "<tr>\
                <td class=\"cmd\">{}</td>\
                <td>{}</td>\
                <td>{}</td>\
                <td class=\"example\">{}</td>\
            </tr>\n",
            html_escape(info.name),
            html_escape(&info.aliases.join(", ")),
            html_escape(info.description),
            html_escape(info.example),
        ));
    }

    let mut link_rows = String::new();
    for link in config.links.iter() {
        link_rows.push_str(&format!(
            "<tr>\
                <td class=\"cmd\">{}</td>\
                <td>{}</td>\
                <td class=\"example\">{}</td>\
            </tr>\n",
            html_escape(&link.command),
            html_escape(&link.url),
            html_escape(&link.search),
        ));
    }
    let links_section = if link_rows.is_empty() {
        String::new()
    } else {
        format!(
            "<h2>Shortcuts</h2>\n<table>\n\
             <thead><tr><th>Shortcut</th><th>URL</th><th>Search suffix</th></tr></thead>\n\
             <tbody>\n{}</tbody>\n</table>\n",
            link_rows
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>taab</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>⌨️</text></svg>">
<style>
*{{margin:0;padding:0;box-sizing:border-box}}
body{{font-family:-apple-system,BlinkMacSystemFont,'Helvetica Neue',sans-serif;color:{text};background:{bg};max-width:900px;margin:0 auto;padding:48px 24px}}
header{{text-align:center;margin-bottom:48px}}
header h1{{font-size:1.4em;font-weight:600;margin-bottom:4px}}
header p{{opacity:.6;font-size:.8em;font-family:'SF Mono',Menlo,Consolas,monospace}}
h2{{font-size:1em;margin:32px 0 8px}}
table{{width:100%;border-collapse:collapse;font-size:.88em}}
th{{text-align:left;padding:6px 12px;border-bottom:2px solid rgba(128,128,128,.4);font-weight:600;opacity:.7;font-size:.75em;text-transform:uppercase;letter-spacing:.05em}}
td{{padding:7px 12px;border-bottom:1px solid rgba(128,128,128,.2);vertical-align:top}}
.cmd{{font-family:'SF Mono',Menlo,Consolas,monospace;font-weight:600;white-space:nowrap}}
.example{{font-family:'SF Mono',Menlo,Consolas,monospace;opacity:.6;font-size:.9em}}
</style>
</head>
<body>
<header>
<h1>taab</h1>
<p>/?cmd=&lt;command&gt;{sep}&lt;args&gt;</p>
</header>
<table>
<thead><tr><th>Command</th><th>Aliases</th><th>Description</th><th>Example</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
{links_section}</body>
</html>"#,
        text = html_escape(&config.text_color),
        bg = html_escape(&config.bg_color),
        sep = html_escape(&config.separator.to_string()),
        rows = rows,
        links_section = links_section,
    )
}

fn message_page(display: &DisplayRequest, config: &TaabConfig) -> String {
    let color = if display.is_error() {
        &config.error_msg_color
    } else {
        &config.default_msg_color
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>taab</title>
<style>
body{{font-family:-apple-system,BlinkMacSystemFont,'Helvetica Neue',sans-serif;background:{bg};color:{color};max-width:700px;margin:0 auto;padding:48px 24px}}
pre{{white-space:pre-wrap;word-break:break-word;font-size:1em;font-family:'SF Mono',Menlo,Consolas,monospace}}
a{{color:inherit;opacity:.6}}
</style>
</head>
<body>
<pre>{text}</pre>
<p><a href="/">back</a></p>
</body>
</html>"#,
        bg = html_escape(&config.bg_color),
        color = html_escape(color),
        text = html_escape(&display.text),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
