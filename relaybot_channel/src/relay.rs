//! The conversation relay handler.
//!
//! Translates one inbound user message into either a direct command response
//! or a completion-service round trip, updating per-user state as a side
//! effect. Every internal failure degrades to one of two canned apology
//! strings; the transport never sees an error.

use std::fmt::Write as _;
use std::sync::Arc;

use relaybot_config::BotConfig;
use relaybot_conversation::ConversationStore;
use relaybot_core::{CompletionParams, CompletionProvider, ConversationTurn};
use tracing::{error, info};

use crate::activity::{Activity, ActivityKind};
use crate::command::Command;
use crate::{Error, Result};

const SUMMARY_EMPTY: &str = "No messages to summarize.";
const SUMMARY_MISSING: &str = "Unable to generate summary.";
const SUMMARY_FAILED: &str = "Sorry, something went wrong while summarizing.";
const CHAT_FAILED: &str = "Sorry, something went wrong while communicating with the AI.";
const REPLY_MISSING: &str = "No response from Azure Open AI.";
const CLEARED: &str = "Conversation history cleared.";

/// Tuning for the relay handler, usually taken from [`BotConfig`].
#[derive(Debug, Clone)]
pub struct RelayOptions {
    pub system_prompt: String,
    pub history_limit: usize,
    pub summary_window: usize,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub trim_incoming: bool,
    pub pin_seed: bool,
}

impl RelayOptions {
    #[must_use]
    pub fn from_config(bot: &BotConfig) -> Self {
        Self {
            system_prompt: bot.system_prompt.clone(),
            history_limit: bot.history_limit,
            summary_window: bot.summary_window,
            temperature: bot.temperature,
            max_tokens: bot.max_tokens,
            trim_incoming: bot.trim_incoming,
            pin_seed: bot.pin_seed,
        }
    }
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self::from_config(&BotConfig::default())
    }
}

/// Relay between the chat platform and the completion service.
///
/// The provider and store arrive as injected trait objects, so tests run
/// against a scripted provider and the in-memory store, and production can
/// swap either side out.
pub struct RelayHandler {
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn ConversationStore>,
    options: RelayOptions,
}

impl RelayHandler {
    #[must_use]
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        store: Arc<dyn ConversationStore>,
        options: RelayOptions,
    ) -> Self {
        Self {
            provider,
            store,
            options,
        }
    }

    /// Route one inbound activity. Non-message activities are acknowledged
    /// without a reply.
    pub async fn handle_activity(&self, activity: &Activity) -> Option<String> {
        match activity.kind() {
            ActivityKind::Message => {
                let Some(from) = activity.from.as_ref() else {
                    info!("message activity without a sender, ignoring");
                    return None;
                };
                let text = activity.text.as_deref().unwrap_or_default();
                info!("message from {}: {text}", from.id);
                Some(self.handle_message(&from.id, text).await)
            }
            ActivityKind::ConversationUpdate => {
                info!("conversation update received, ignoring");
                None
            }
            ActivityKind::Other => {
                info!(
                    "non-message activity received: {}, ignoring",
                    activity.activity_type
                );
                None
            }
        }
    }

    /// Handle one user message and produce the reply text.
    pub async fn handle_message(&self, user_id: &str, text: &str) -> String {
        let trimmed = text.trim();

        match Command::parse_from_text(trimmed) {
            Some(Command::Summarize) => match self.summarize(user_id).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("summarize failed for {user_id}: {e}");
                    SUMMARY_FAILED.to_string()
                }
            },
            Some(Command::Clear) => match self.clear(user_id).await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("clear failed for {user_id}: {e}");
                    CHAT_FAILED.to_string()
                }
            },
            Some(Command::Info) => Command::info_text().to_string(),
            None => {
                let stored = if self.options.trim_incoming { trimmed } else { text };
                match self.chat_turn(user_id, stored).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        error!("chat turn failed for {user_id}: {e}");
                        CHAT_FAILED.to_string()
                    }
                }
            }
        }
    }

    /// Summarize the recent dialogue in one isolated completion call.
    /// Stored history is never mutated here.
    async fn summarize(&self, user_id: &str) -> Result<String> {
        let slot = self.store.entry(user_id).await.map_err(Error::Store)?;
        let recent: Vec<ConversationTurn> = {
            let history = slot.lock().await;
            history
                .recent_dialogue(self.options.summary_window)
                .into_iter()
                .cloned()
                .collect()
        };

        if recent.is_empty() {
            return Ok(SUMMARY_EMPTY.to_string());
        }

        let mut prompt = String::from("Summarize the following conversation in 2-3 sentences:");
        for turn in &recent {
            let _ = write!(prompt, "\n{}: {}", turn.role, turn.content);
        }

        let request = [ConversationTurn::user(prompt)];
        let params = CompletionParams::new(self.options.temperature);

        let reply = self
            .provider
            .complete(&request, &params)
            .await
            .map_err(Error::Provider)?;

        Ok(reply
            .content
            .unwrap_or_else(|| SUMMARY_MISSING.to_string()))
    }

    async fn clear(&self, user_id: &str) -> Result<String> {
        let slot = self.store.entry(user_id).await.map_err(Error::Store)?;
        slot.lock().await.reset(&self.options.system_prompt);
        info!("cleared conversation history for {user_id}");
        Ok(CLEARED.to_string())
    }

    /// The default chat path: append, trim, complete, append, trim.
    async fn chat_turn(&self, user_id: &str, text: &str) -> Result<String> {
        let slot = self.store.entry(user_id).await.map_err(Error::Store)?;

        // Hold this user's slot across the completion call so a second
        // message from the same user cannot interleave with this turn.
        let mut history = slot.lock().await;

        history.seed_if_empty(&self.options.system_prompt);
        history.push(ConversationTurn::user(text));
        history.trim_to(self.options.history_limit, self.options.pin_seed);

        let mut params = CompletionParams::new(self.options.temperature);
        if let Some(cap) = self.options.max_tokens {
            params = params.with_max_tokens(cap);
        }

        // On failure the just-appended user turn stays stored, so the next
        // attempt resends it as context.
        let reply = self
            .provider
            .complete(history.turns(), &params)
            .await
            .map_err(Error::Provider)?;

        let content = reply
            .content
            .unwrap_or_else(|| REPLY_MISSING.to_string());

        history.push(ConversationTurn::assistant(content.clone()));
        history.trim_to(self.options.history_limit, self.options.pin_seed);

        Ok(content)
    }
}
