//! Transport stand-in
//!
//! Events arrive one per line. A line starting with `/` is a transport event
//! (`/hello`, `/typing`, ...) the bot does not act on. Whitespace-only lines
//! carry nothing and are skipped. Anything else is a chat message.

/// A chat message as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub text: String,
    pub sender: String,
    pub channel: String,
}

impl IncomingMessage {
    pub fn new(
        text: impl Into<String>,
        sender: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sender: sender.into(),
            channel: channel.into(),
        }
    }
}

/// One event read from the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Message(IncomingMessage),
    /// Event kind, without the leading `/`
    Unhandled(String),
    /// Empty or whitespace-only line
    Blank,
}

impl ChatEvent {
    /// Classify one transport line
    pub fn from_line(line: &str, sender: &str, channel: &str) -> Self {
        if line.trim().is_empty() {
            return Self::Blank;
        }
        match line.trim_start().strip_prefix('/') {
            Some(kind) => Self::Unhandled(kind.trim().to_string()),
            None => Self::Message(IncomingMessage::new(line, sender, channel)),
        }
    }
}

/// Remove a leading bot address from `text`.
///
/// Accepts `<@name>`, `@name` (each optionally followed by `:`) and `name:`.
/// The address must be followed by whitespace or end the message. Text that
/// is not addressed to the bot is returned unchanged.
pub fn strip_mention<'t>(text: &'t str, bot_name: &str) -> &'t str {
    let trimmed = text.trim_start();
    let forms = [
        (format!("<@{bot_name}>"), false),
        (format!("@{bot_name}"), false),
        (bot_name.to_string(), true),
    ];
    forms
        .iter()
        .find_map(|(form, needs_colon)| {
            let rest = strip_prefix_ignore_case(trimmed, form)?;
            let rest = match rest.strip_prefix(':') {
                Some(after) => after,
                None if *needs_colon => return None,
                None => rest,
            };
            (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
        })
        .unwrap_or(text)
}

fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        text.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_at_mention() {
        assert_eq!(strip_mention("@kube-bot get pods/a", "kube-bot"), " get pods/a");
        assert_eq!(strip_mention("  @Kube-Bot: help", "kube-bot"), " help");
    }

    #[test]
    fn test_strip_slack_style_mention() {
        assert_eq!(strip_mention("<@kube-bot> logs pods/a", "kube-bot"), " logs pods/a");
    }

    #[test]
    fn test_strip_name_colon() {
        assert_eq!(strip_mention("kube-bot: version", "kube-bot"), " version");
    }

    #[test]
    fn test_bare_name_without_colon_is_kept() {
        assert_eq!(strip_mention("kube-bot version", "kube-bot"), "kube-bot version");
    }

    #[test]
    fn test_longer_name_is_not_a_mention() {
        assert_eq!(strip_mention("@kube-botty help", "kube-bot"), "@kube-botty help");
    }

    #[test]
    fn test_unaddressed_text_unchanged() {
        assert_eq!(strip_mention("get pods/a", "kube-bot"), "get pods/a");
        assert_eq!(strip_mention("", "kube-bot"), "");
    }

    #[test]
    fn test_mention_alone_leaves_nothing() {
        assert_eq!(strip_mention("@kube-bot", "kube-bot"), "");
    }

    #[test]
    fn test_event_classification() {
        assert_eq!(
            ChatEvent::from_line("/typing", "u1", "#ops"),
            ChatEvent::Unhandled("typing".to_string())
        );
        assert_eq!(
            ChatEvent::from_line("help", "u1", "#ops"),
            ChatEvent::Message(IncomingMessage::new("help", "u1", "#ops"))
        );
    }

    #[test]
    fn test_blank_lines_are_not_messages() {
        assert_eq!(ChatEvent::from_line("", "u1", "#ops"), ChatEvent::Blank);
        assert_eq!(ChatEvent::from_line("  \t ", "u1", "#ops"), ChatEvent::Blank);
        assert_eq!(
            ChatEvent::from_line("  version", "u1", "#ops"),
            ChatEvent::Message(IncomingMessage::new("  version", "u1", "#ops"))
        );
    }
}
