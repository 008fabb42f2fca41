/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::io::{BufRead, Write};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use tabled::{
    Table, Tabled,
    settings::{Modify, Style, Width, object::Columns},
};

use taab::server::ServerOptions;
use taab::{Builtin, Effect, Interpreter, Severity, TaabConfig, gist};

#[derive(Parser)]
#[command(name = "taab")]
#[command(about = "Command line for your browser's new tab page")]
#[command(version)]
#[command(override_usage = "taab [OPTIONS] [INPUT]...")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print the URL without opening a browser
    #[arg(short = 'd', long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the taab web server
    Serve {
        /// Port to bind the server to
        #[arg(short, long, default_value_t = 8085)]
        port: u16,

        /// Address to bind to (127.0.0.1 for localhost, 0.0.0.0 for network)
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Rocket log level (normal, debug, critical, off)
        #[arg(long, default_value = "normal")]
        log_level: String,
    },

    /// List builtin commands and saved shortcuts
    Bindings,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Interpret an input line (same as passing it directly)
    #[command(external_subcommand)]
    Input(Vec<String>),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match TaabConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: {}", e);
            eprintln!("Continuing with default configuration...");
            TaabConfig::default()
        }
    };

    match cli.command {
        Some(Commands::Serve {
            port,
            address,
            log_level,
        }) => {
            taab::server::launch(
                config,
                ServerOptions {
                    port,
                    address,
                    log_level,
                },
            )
            .await?;
            Ok(())
        }

        Some(Commands::Bindings) => {
            print_bindings(&config);
            Ok(())
        }

        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "taab", &mut std::io::stdout());
            Ok(())
        }

        Some(Commands::Input(args)) => execute_input(&args.join(" "), config, cli.dry_run),

        // Every positional input line arrives through the external
        // subcommand, so nothing is left to interpret here.
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn execute_input(
    raw: &str,
    mut config: TaabConfig,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interpreter = Interpreter::new();
    let mut outcome = interpreter.interpret(raw, &mut config);
    let mut dirty = outcome.config_mutated;

    // Both suspension points resolve locally: the confirmation on stdin,
    // the gist fetch inline.
    loop {
        match outcome.effect {
            Effect::None => break,

            Effect::Navigate(nav) => {
                println!("{}", nav.url);
                if !dry_run {
                    open::that(&nav.url)
                        .map_err(|e| format!("Failed to open browser: {}. URL printed above.", e))?;
                }
                break;
            }

            Effect::Display(display) => {
                match display.severity {
                    Severity::Normal => println!("{}", display.text),
                    Severity::Error => eprintln!("{}", display.text),
                }
                break;
            }

            Effect::ConfirmOverwrite(pending) => {
                let accepted = prompt_yes_no(&pending.prompt)?;
                outcome = interpreter.resolve_confirmation(pending.id, accepted, &mut config);
                dirty |= outcome.config_mutated;
            }

            Effect::FetchConfig { gist_id, notice } => {
                println!("{}", notice.text);
                outcome = match gist::fetch(&gist_id) {
                    Ok(blob) => interpreter.apply_remote_config(&blob, &gist_id, &mut config),
                    Err(e) => {
                        eprintln!("{}", e);
                        break;
                    }
                };
                dirty |= outcome.config_mutated;
            }
        }
    }

    if dirty {
        config.save()?;
    }

    Ok(())
}

fn prompt_yes_no(prompt: &str) -> Result<bool, Box<dyn std::error::Error>> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[derive(Tabled)]
struct CommandRow {
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Aliases")]
    aliases: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Example")]
    example: String,
}

fn print_bindings(config: &TaabConfig) {
    let rows: Vec<CommandRow> = Builtin::ALL
        .iter()
        .map(|builtin| {
            let info = builtin.info();
            CommandRow {
                command: info.name.to_string(),
                aliases: if info.aliases.is_empty() {
                    "—".to_string()
                } else {
                    info.aliases.join(", ")
                },
                description: info.description.to_string(),
                example: info.example.to_string(),
            }
        })
        .collect();

    let term_width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(120);
    let description_width = (term_width.saturating_sub(2) as f32 * 0.4).max(30.0) as usize;

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..=2)).with(Width::wrap(description_width)));
    println!("{}", table);

    if !config.links.is_empty() {
        let link_rows: Vec<CommandRow> = config
            .links
            .iter()
            .map(|link| CommandRow {
                command: link.command.clone(),
                aliases: "—".to_string(),
                description: link.url.clone(),
                example: link.search.clone(),
            })
            .collect();

        let mut table = Table::new(link_rows);
        table.with(Style::rounded());
        println!("\nShortcuts:\n{}", table);
    }

    println!("\nTip: taab 'r;aww;top;week' opens the URL in your browser");
    println!("     Use --dry-run to print the URL instead\n");
}
