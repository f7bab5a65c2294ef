//! Scripted completion provider for handler and route tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use relaybot_core::{CompletionParams, CompletionProvider, CompletionReply, ConversationTurn};
use tokio::sync::Mutex;

/// One scripted completion outcome.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    /// Succeed with this content (`None` models a choice without content).
    Reply(Option<&'static str>),
    /// Fail the whole call.
    Fail,
}

/// What the provider saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ConversationTurn>,
    pub max_tokens: Option<u32>,
}

/// Records every request and pops scripted outcomes in order, falling back
/// to a fixed reply once the script is exhausted.
pub struct ScriptedProvider {
    requests: Mutex<Vec<RecordedRequest>>,
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Outcome>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            fallback: Outcome::Reply(Some("ok")),
        }
    }

    /// A provider that always replies with `text`.
    pub fn replying(text: &'static str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            fallback: Outcome::Reply(Some(text)),
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        params: &CompletionParams,
    ) -> anyhow::Result<CompletionReply> {
        self.requests.lock().await.push(RecordedRequest {
            messages: messages.to_vec(),
            max_tokens: params.max_tokens,
        });

        let outcome = self
            .script
            .lock()
            .await
            .pop_front()
            .unwrap_or(self.fallback);

        match outcome {
            Outcome::Reply(content) => Ok(CompletionReply {
                content: content.map(str::to_string),
                usage: None,
            }),
            Outcome::Fail => Err(anyhow::anyhow!("scripted completion failure")),
        }
    }
}
