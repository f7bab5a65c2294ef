//! Built-in control commands.

/// Commands recognized on the leading word of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Summarize,
    Clear,
    Info,
}

impl Command {
    /// Parse the leading word-token of `text`, case-insensitively.
    ///
    /// Only the first run of `[A-Za-z0-9_]` characters counts, so
    /// "CLEAR now" clears while "pleaseclear" does not.
    #[must_use]
    pub fn parse_from_text(text: &str) -> Option<Self> {
        let token: String = text
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();

        if token.is_empty() {
            return None;
        }

        match token.to_ascii_lowercase().as_str() {
            "summarize" => Some(Self::Summarize),
            "clear" => Some(Self::Clear),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Static bot-identity reply for the `info` command.
    #[must_use]
    pub const fn info_text() -> &'static str {
        concat!(
            "relaybot v",
            env!("CARGO_PKG_VERSION"),
            "\nCommands: summarize, clear, info"
        )
    }
}
