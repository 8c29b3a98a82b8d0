//! CLI command definitions using `clap`

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command as ClapCommand};

pub fn after_help_text(examples: &[&str]) -> String {
    let mut text = String::from("EXAMPLES:\n");
    for example in examples {
        text.push_str("  ");
        text.push_str(example);
        text.push('\n');
    }
    text
}

pub fn cmd_parse() -> ClapCommand {
    ClapCommand::new("parse")
        .about("Parse one chat message and print the bound arguments")
        .arg(
            Arg::new("text")
                .required(true)
                .num_args(1..)
                .help("Message text, as it would be typed in chat"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .after_help(after_help_text(&[
            "kube-bot parse get pods/myapp",
            "kube-bot parse logs deployment/api top 50",
            "kube-bot parse --json track acme/widgets #ops mine",
        ]))
}

pub fn cmd_chat() -> ClapCommand {
    ClapCommand::new("chat")
        .about("Answer messages read from stdin, one per line")
        .long_about(
            "Answer messages read from stdin, one per line, until end of input or Ctrl-C.\n\n\
             Lines starting with '/' are transport events and get no reply.",
        )
        .arg(
            Arg::new("sender")
                .long("sender")
                .value_name("ID")
                .default_value("cli-user")
                .help("Sender recorded on each message"),
        )
        .arg(
            Arg::new("channel")
                .long("channel")
                .value_name("ID")
                .default_value("cli")
                .help("Channel recorded on each message"),
        )
}

pub fn cmd_commands() -> ClapCommand {
    ClapCommand::new("commands").about("List the commands the bot understands")
}

pub fn cmd_config() -> ClapCommand {
    ClapCommand::new("config")
        .about("Show the loaded configuration")
        .arg(Arg::new("key").help("Setting to show (dot notation: 'slack.token')"))
        .after_help(after_help_text(&[
            "kube-bot config                 Show every setting",
            "kube-bot config bot.name        Show one setting",
            "kube-bot config slack           Show settings containing 'slack'",
        ]))
}

pub fn build_cli() -> ClapCommand {
    ClapCommand::new("kube-bot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("kube-bot - run Kubernetes commands from chat")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Read settings from this file instead of the global and project files"),
        )
        .subcommand_required(true)
        .subcommand(cmd_parse())
        .subcommand(cmd_chat())
        .subcommand(cmd_commands())
        .subcommand(cmd_config())
}
