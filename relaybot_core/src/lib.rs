#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared vocabulary types for the conversational relay.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Speaker role of one conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// One message entry in a conversation, tagged with its speaker role.
///
/// Serializes to the wire shape `{"role": ..., "content": ...}` expected by
/// the completion service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl CompletionParams {
    #[must_use]
    pub const fn new(temperature: f32) -> Self {
        Self {
            temperature,
            max_tokens: None,
        }
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, cap: u32) -> Self {
        self.max_tokens = Some(cap);
        self
    }
}

/// Result of one completion call.
///
/// `content` stays optional: the service may return a choice with no message
/// content, and each call site supplies its own fallback text.
#[derive(Debug, Clone)]
pub struct CompletionReply {
    pub content: Option<String>,
    pub usage: Option<Usage>,
}

/// Token accounting attached to a completion reply, when reported.
#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The hosted completion endpoint, used as an opaque service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        params: &CompletionParams,
    ) -> anyhow::Result<CompletionReply>;
}
