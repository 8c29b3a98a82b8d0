//! CLI command handlers that bridge between `clap` and the bot

use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::ArgMatches;
use kube_bot::{chat::responder::argument_lines, ChatSession, Responder};
use kube_bot_core::{config, loader, Config, KeyLookup, Registry};
use tokio::io::BufReader;
use tracing::info;

use crate::cli::{commands::build_cli, init_tracing};

/// Format an error for user display (no stack traces)
pub fn format_error(err: &anyhow::Error) -> String {
    let msg = err.to_string();
    if let Some(source) = err.source() {
        let source_msg = source.to_string();
        if !msg.contains(&source_msg) && !source_msg.is_empty() {
            return format!("{msg}\nCause: {source_msg}");
        }
    }
    msg
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let loaded = match matches.get_one::<PathBuf>("config") {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    Ok(loaded?)
}

pub fn handle_parse(registry: &Registry, sub_m: &ArgMatches) -> Result<()> {
    let text = sub_m
        .get_many::<String>("text")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .ok_or_else(|| anyhow::anyhow!("Message text is required"))?;

    let request = registry
        .parse(&text)
        .map_err(kube_bot_core::Error::from)?;

    if sub_m.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    match request.subcommand() {
        Some(subcommand) => println!("{} {subcommand}", request.command()),
        None => println!("{}", request.command()),
    }
    for line in argument_lines(&request) {
        println!("{line}");
    }
    Ok(())
}

pub async fn handle_chat(registry: &Registry, config: &Config, sub_m: &ArgMatches) -> Result<()> {
    let sender = sub_m
        .get_one::<String>("sender")
        .map_or("cli-user", String::as_str);
    let channel = sub_m.get_one::<String>("channel").map_or("cli", String::as_str);

    let session = ChatSession::new(
        Responder::new(registry, config),
        sender,
        channel,
        config.slack.log_unhandled_events,
    );
    info!(bot = %config.bot.name, channel, "running bot");

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    session.run(input, &mut output, shutdown).await?;
    Ok(())
}

pub fn handle_commands(registry: &Registry) {
    for line in registry.help_lines() {
        println!("{line}");
    }
}

pub fn handle_config(config: &Config, sub_m: &ArgMatches) -> Result<()> {
    let Some(key) = sub_m.get_one::<String>("key") else {
        for (key, value) in config.entries() {
            println!("{key} = {value}");
        }
        return Ok(());
    };

    match config.lookup(key) {
        KeyLookup::Exact { value, .. } => {
            println!("{value}");
            Ok(())
        }
        KeyLookup::Candidates(found) => {
            for (key, value) in found {
                println!("{key} = {value}");
            }
            Ok(())
        }
        KeyLookup::Missing => anyhow::bail!("No setting named '{key}'"),
    }
}

pub async fn run_cli() -> Result<()> {
    let matches = match build_cli().try_get_matches() {
        Ok(m) => m,
        Err(e) => {
            // --help and --version arrive as errors but should exit 0
            use clap::error::ErrorKind;
            let should_exit_zero =
                matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            let _ = e.print();
            process::exit(if should_exit_zero { 0 } else { 2 });
        }
    };

    let config = load_config(&matches)?;
    init_tracing(&config.logging.level);
    let registry = loader::load_builtins()
        .map_err(kube_bot_core::Error::from)
        .context("Failed to load built-in commands")?;

    match matches.subcommand() {
        Some(("parse", sub_m)) => handle_parse(&registry, sub_m),
        Some(("chat", sub_m)) => handle_chat(&registry, &config, sub_m).await,
        Some(("commands", _)) => {
            handle_commands(&registry);
            Ok(())
        }
        Some(("config", sub_m)) => handle_config(&config, sub_m),
        _ => anyhow::bail!("Unknown command"),
    }
}
