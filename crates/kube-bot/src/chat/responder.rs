//! Replies to chat messages

use kube_bot_core::{loader::args, BoundValue, CommandRequest, Config, KeyLookup, Registry};
use tracing::debug;

use super::transport::{strip_mention, IncomingMessage};

const STILL_LEARNING: &str = "I'm still learning, here are your arguments:";
const BRAIN_FART: &str = "Whoops I had a brain fart:";

/// Turns messages into reply text. Holds only shared references, so one
/// responder can serve every message of a session.
#[derive(Debug, Clone, Copy)]
pub struct Responder<'a> {
    registry: &'a Registry,
    config: &'a Config,
}

impl<'a> Responder<'a> {
    pub const fn new(registry: &'a Registry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    /// Reply to one message. Parse failures become an apology carrying the
    /// error text.
    pub fn respond(&self, message: &IncomingMessage) -> String {
        let text = strip_mention(&message.text, &self.config.bot.name);
        match self.registry.parse(text) {
            Ok(request) => {
                debug!(
                    sender = %message.sender,
                    channel = %message.channel,
                    command = request.command(),
                    "answering request"
                );
                self.answer(&request)
            }
            Err(err) => {
                debug!(kind = %err.kind(), "message did not parse");
                format!("{BRAIN_FART} {err}")
            }
        }
    }

    fn answer(&self, request: &CommandRequest<'_>) -> String {
        match request.command() {
            "help" => self.registry.help_lines().join("\n"),
            "version" => format!("kube-bot {}", env!("CARGO_PKG_VERSION")),
            "config" => self.config_reply(request),
            _ => std::iter::once(STILL_LEARNING.to_string())
                .chain(argument_lines(request))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn config_reply(&self, request: &CommandRequest<'_>) -> String {
        if !matches!(request.get(args::VALUE), None | Some(BoundValue::Unset)) {
            return "Settings can only be changed in the config file".to_string();
        }
        let Some(key) = request.text(args::KEY) else {
            return entry_lines(&self.config.entries()).join("\n");
        };
        match self.config.lookup(key) {
            KeyLookup::Exact { key, value } => format!("{key}={value}"),
            KeyLookup::Candidates(found) => std::iter::once(format!(
                "No setting named '{key}', did you mean:"
            ))
            .chain(entry_lines(&found))
            .collect::<Vec<_>>()
            .join("\n"),
            KeyLookup::Missing => format!("No setting named '{key}'"),
        }
    }
}

/// `- name=value` for each argument, in declaration order
pub fn argument_lines(request: &CommandRequest<'_>) -> Vec<String> {
    request
        .iter()
        .map(|(name, value)| format!("- {name}={value}"))
        .collect()
}

fn entry_lines(entries: &[(String, String)]) -> Vec<String> {
    entries
        .iter()
        .map(|(key, value)| format!("- {key}={value}"))
        .collect()
}
