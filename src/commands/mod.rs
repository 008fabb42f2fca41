/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The builtin command registry.
//!
//! A closed set of commands, each with a canonical name, zero or more
//! aliases, and a handler mapping parsed arguments to a navigation or display
//! request. The meta-commands (`set`, `link`, `config`) live in their own
//! modules and mutate configuration instead of navigating.

pub mod link;
pub mod remote;
pub mod set;

use crate::config::TaabConfig;
use crate::effects::Effect;
use crate::links::Link;
use crate::url;

/// Where `help` points.
pub const HELP_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "#readme");

/// Per-invocation context threaded through command handlers.
///
/// Handlers report configuration changes through `mutated` and suspended
/// shortcut adds through `pending_add`; the interpreter folds both into the
/// final [`Outcome`](crate::effects::Outcome).
pub struct Dispatch<'a> {
    pub config: &'a mut TaabConfig,
    /// New-tab flag extracted from the input line.
    pub new_tab: bool,
    pub mutated: bool,
    pub pending_add: Option<Link>,
}

impl Dispatch<'_> {
    pub fn navigate(&self, url: impl Into<String>) -> Effect {
        Effect::navigate(url, self.new_tab || self.config.always_new_tab)
    }

    pub fn navigate_new_tab(&self, url: impl Into<String>) -> Effect {
        Effect::navigate(url, true)
    }
}

/// Static description of a builtin, for the bindings table and landing page.
pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub example: &'static str,
}

/// A builtin command with a compiled-in handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Amazon,
    Config,
    Dictionary,
    DuckDuckGo,
    GitHub,
    Gist,
    Gmail,
    Google,
    GoogleCalendar,
    GoogleDrive,
    GoogleImages,
    GoogleKeep,
    GoogleMaps,
    HackerNews,
    Help,
    Imdb,
    Link,
    Mdn,
    Netflix,
    Npm,
    PyPI,
    Reddit,
    Set,
    StackOverflow,
    Thesaurus,
    Trello,
    Wikipedia,
    WolframAlpha,
    YouTube,
}

impl Builtin {
    pub const ALL: &'static [Builtin] = &[
        Builtin::Amazon,
        Builtin::Config,
        Builtin::Dictionary,
        Builtin::DuckDuckGo,
        Builtin::GitHub,
        Builtin::Gist,
        Builtin::Gmail,
        Builtin::Google,
        Builtin::GoogleCalendar,
        Builtin::GoogleDrive,
        Builtin::GoogleImages,
        Builtin::GoogleKeep,
        Builtin::GoogleMaps,
        Builtin::HackerNews,
        Builtin::Help,
        Builtin::Imdb,
        Builtin::Link,
        Builtin::Mdn,
        Builtin::Netflix,
        Builtin::Npm,
        Builtin::PyPI,
        Builtin::Reddit,
        Builtin::Set,
        Builtin::StackOverflow,
        Builtin::Thesaurus,
        Builtin::Trello,
        Builtin::Wikipedia,
        Builtin::WolframAlpha,
        Builtin::YouTube,
    ];

    pub fn info(&self) -> CommandInfo {
        match self {
            Builtin::Amazon => CommandInfo {
                name: "a",
                aliases: &["amazon"],
                description: "Amazon search",
                example: "a;usb cable",
            },
            Builtin::Config => CommandInfo {
                name: "config",
                aliases: &["options"],
                description: "Export, import, or fetch configuration",
                example: "config;fetch;<gist id>",
            },
            Builtin::Dictionary => CommandInfo {
                name: "dict",
                aliases: &["dictionary"],
                description: "Dictionary.com lookup",
                example: "dict;ineffable",
            },
            Builtin::DuckDuckGo => CommandInfo {
                name: "dg",
                aliases: &["ddg", "duckduckgo"],
                description: "DuckDuckGo search",
                example: "dg;rust lang",
            },
            Builtin::GitHub => CommandInfo {
                name: "gh",
                aliases: &["github"],
                description: "GitHub profile or repo",
                example: "gh;rust-lang/rust",
            },
            Builtin::Gist => CommandInfo {
                name: "gist",
                aliases: &[],
                description: "GitHub gist by id or user",
                example: "gist;defunkt",
            },
            Builtin::Gmail => CommandInfo {
                name: "gm",
                aliases: &["gmail"],
                description: "Gmail search",
                example: "gm;from:alice",
            },
            Builtin::Google => CommandInfo {
                name: "g",
                aliases: &["google"],
                description: "Google search",
                example: "g;weather",
            },
            Builtin::GoogleCalendar => CommandInfo {
                name: "gc",
                aliases: &["calendar"],
                description: "Google Calendar",
                example: "gc",
            },
            Builtin::GoogleDrive => CommandInfo {
                name: "gd",
                aliases: &["drive"],
                description: "Google Drive search",
                example: "gd;tax documents",
            },
            Builtin::GoogleImages => CommandInfo {
                name: "img",
                aliases: &["images"],
                description: "Google Images search",
                example: "img;nebula",
            },
            Builtin::GoogleKeep => CommandInfo {
                name: "k",
                aliases: &["keep"],
                description: "Google Keep search",
                example: "k;groceries",
            },
            Builtin::GoogleMaps => CommandInfo {
                name: "map",
                aliases: &["maps"],
                description: "Google Maps search",
                example: "map;coffee near me",
            },
            Builtin::HackerNews => CommandInfo {
                name: "hn",
                aliases: &["news"],
                description: "Hacker News sections",
                example: "hn;show",
            },
            Builtin::Help => CommandInfo {
                name: "help",
                aliases: &[],
                description: "Open the README",
                example: "help",
            },
            Builtin::Imdb => CommandInfo {
                name: "imdb",
                aliases: &[],
                description: "IMDb search",
                example: "imdb;the thing",
            },
            Builtin::Link => CommandInfo {
                name: "link",
                aliases: &[],
                description: "Manage custom shortcuts",
                example: "link;hb;hub.example.com;/search?q=",
            },
            Builtin::Mdn => CommandInfo {
                name: "mdn",
                aliases: &[],
                description: "MDN web docs search",
                example: "mdn;flexbox",
            },
            Builtin::Netflix => CommandInfo {
                name: "n",
                aliases: &["netflix"],
                description: "Netflix search",
                example: "n;dark",
            },
            Builtin::Npm => CommandInfo {
                name: "npm",
                aliases: &[],
                description: "npm package search",
                example: "npm;left-pad",
            },
            Builtin::PyPI => CommandInfo {
                name: "pypi",
                aliases: &[],
                description: "Python package index search",
                example: "pypi;requests",
            },
            Builtin::Reddit => CommandInfo {
                name: "r",
                aliases: &["reddit"],
                description: "Subreddit, with optional sort and time range",
                example: "r;aww;top;week",
            },
            Builtin::Set => CommandInfo {
                name: "set",
                aliases: &[],
                description: "Change a setting",
                example: "set;bgColor;#282828",
            },
            Builtin::StackOverflow => CommandInfo {
                name: "so",
                aliases: &["stack"],
                description: "Stack Overflow search",
                example: "so;borrow checker",
            },
            Builtin::Thesaurus => CommandInfo {
                name: "thes",
                aliases: &["thesaurus"],
                description: "Thesaurus.com lookup",
                example: "thes;quick",
            },
            Builtin::Trello => CommandInfo {
                name: "tr",
                aliases: &["trello"],
                description: "Trello search",
                example: "tr;sprint board",
            },
            Builtin::Wikipedia => CommandInfo {
                name: "w",
                aliases: &["wiki"],
                description: "Wikipedia search",
                example: "w;ada lovelace",
            },
            Builtin::WolframAlpha => CommandInfo {
                name: "wa",
                aliases: &["wolfram"],
                description: "Wolfram Alpha query",
                example: "wa;integrate x^2",
            },
            Builtin::YouTube => CommandInfo {
                name: "y",
                aliases: &["youtube", "yt"],
                description: "YouTube search, or `subs` for subscriptions",
                example: "y;lofi",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// Resolve a token to a builtin.
    ///
    /// Canonical names are checked fully before any alias, so a token that is
    /// both a canonical name and an alias always resolves to the canonical
    /// command.
    pub fn lookup(token: &str) -> Option<Builtin> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == token)
            .or_else(|| {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|b| b.info().aliases.contains(&token))
            })
    }

    /// Whether a token is taken by a builtin name or alias and therefore
    /// unavailable as a shortcut name.
    pub fn is_reserved(token: &str) -> bool {
        Self::lookup(token).is_some()
    }

    pub fn execute(&self, args: &[String], ctx: &mut Dispatch) -> Effect {
        match self {
            Builtin::Amazon => search_or_home("https://amazon.com", "/s/?field-keywords=", args, ctx),
            Builtin::Config => remote::execute(args, ctx),
            Builtin::Dictionary => search_or_home("http://dictionary.com", "/browse/", args, ctx),
            Builtin::DuckDuckGo => search_or_home("https://duckduckgo.com", "/?q=", args, ctx),
            Builtin::GitHub => path_or_home("https://github.com", args, ctx),
            Builtin::Gist => path_or_home("https://gist.github.com", args, ctx),
            Builtin::Gmail => search_or_home("https://mail.google.com", "/mail/u/0/#search/", args, ctx),
            Builtin::Google => search_or_home("https://google.com", "/search?q=", args, ctx),
            Builtin::GoogleCalendar => ctx.navigate("https://calendar.google.com"),
            Builtin::GoogleDrive => search_or_home("https://drive.google.com", "/drive/search?q=", args, ctx),
            Builtin::GoogleImages => search_or_home("https://google.com", "/search?tbm=isch&q=", args, ctx),
            Builtin::GoogleKeep => search_or_home("https://keep.google.com", "/#search/text=", args, ctx),
            Builtin::GoogleMaps => search_or_home("https://google.com/maps", "/search/", args, ctx),
            Builtin::HackerNews => hacker_news(args, ctx),
            Builtin::Help => ctx.navigate_new_tab(HELP_URL),
            Builtin::Imdb => search_or_home("http://imdb.com", "/find?s=all&q=", args, ctx),
            Builtin::Link => link::execute(args, ctx),
            Builtin::Mdn => search_or_home("https://developer.mozilla.org", "/search?q=", args, ctx),
            Builtin::Netflix => search_or_home("https://netflix.com", "/search?q=", args, ctx),
            Builtin::Npm => search_or_home("https://npmjs.org", "/search?q=", args, ctx),
            Builtin::PyPI => search_or_home("https://pypi.org", "/search/?q=", args, ctx),
            Builtin::Reddit => reddit(args, ctx),
            Builtin::Set => set::execute(args, ctx),
            Builtin::StackOverflow => search_or_home("https://stackoverflow.com", "/search?q=", args, ctx),
            Builtin::Thesaurus => search_or_home("http://thesaurus.com", "/browse/", args, ctx),
            Builtin::Trello => search_or_home("https://trello.com", "/search?q=", args, ctx),
            Builtin::Wikipedia => search_or_home(
                "https://wikipedia.org",
                "/w/index.php?title=Special:Search&search=",
                args,
                ctx,
            ),
            Builtin::WolframAlpha => search_or_home("http://wolframalpha.com", "/input/?i=", args, ctx),
            Builtin::YouTube => youtube(args, ctx),
        }
    }
}

/// The common builtin shape: no arguments opens the service's homepage,
/// anything else becomes a search with the args joined by a single space.
fn search_or_home(base: &str, search: &str, args: &[String], ctx: &Dispatch) -> Effect {
    if args.is_empty() {
        ctx.navigate(base)
    } else {
        ctx.navigate(url::build_url(base, search, &args.join(" ")))
    }
}

/// GitHub-style path commands: args concatenate directly onto the path,
/// unencoded, so `gh;rust-lang/rust` works as typed.
fn path_or_home(base: &str, args: &[String], ctx: &Dispatch) -> Effect {
    if args.is_empty() {
        ctx.navigate(base)
    } else {
        ctx.navigate(format!("{}/{}", base, args.join("")))
    }
}

const REDDIT_SORTS: &[&str] = &[
    "hot",
    "new",
    "rising",
    "controversial",
    "top",
    "gilded",
    "wiki",
    "promoted",
];
const REDDIT_RANGES: &[&str] = &["day", "week", "month", "year", "all"];

fn reddit(args: &[String], ctx: &Dispatch) -> Effect {
    const BASE: &str = "https://reddit.com";

    match args {
        [] => ctx.navigate(BASE),
        [sub] => ctx.navigate(url::build_url(BASE, "/r/", sub)),
        [sub, sort] => {
            // An unrecognized sort is silently dropped.
            let sort_path = if REDDIT_SORTS.contains(&sort.as_str()) {
                format!("/{}", sort)
            } else {
                String::new()
            };
            ctx.navigate(format!("{}/r/{}{}", BASE, sub, sort_path))
        }
        [sub, sort, range] => {
            // Time ranges only exist for top/controversial; an invalid range
            // there drops the sort along with it.
            let tail = if matches!(sort.as_str(), "top" | "controversial") {
                if REDDIT_RANGES.contains(&range.as_str()) {
                    format!("/{}?t={}", sort, range)
                } else {
                    String::new()
                }
            } else if REDDIT_SORTS.contains(&sort.as_str()) {
                format!("/{}", sort)
            } else {
                String::new()
            };
            ctx.navigate(format!("{}/r/{}{}", BASE, sub, tail))
        }
        _ => Effect::None,
    }
}

fn hacker_news(args: &[String], ctx: &Dispatch) -> Effect {
    const BASE: &str = "https://news.ycombinator.com";

    let Some(section) = args.first() else {
        return ctx.navigate(BASE);
    };

    let path = match section.as_str() {
        "new" => "/newest",
        "comments" => "/newcomments",
        "show" => "/show",
        "ask" => "/ask",
        "jobs" => "/jobs",
        "submit" => "/submit",
        _ => return Effect::None,
    };

    ctx.navigate(format!("{}{}", BASE, path))
}

fn youtube(args: &[String], ctx: &Dispatch) -> Effect {
    const BASE: &str = "https://youtube.com";

    let Some(first) = args.first() else {
        return ctx.navigate(BASE);
    };

    if matches!(first.as_str(), "subs" | "s") {
        ctx.navigate(format!("{}/feed/subscriptions", BASE))
    } else {
        ctx.navigate(url::build_url(BASE, "/results?search_query=", first))
    }
}
