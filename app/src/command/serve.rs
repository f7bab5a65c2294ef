use std::sync::Arc;

use relaybot_channel::server::{self, AppState};
use relaybot_channel::{RelayHandler, RelayOptions};
use relaybot_config::Config;
use relaybot_conversation::MemoryConversationStore;
use relaybot_providers::AzureOpenAiProvider;
use tracing::info;

/// Input for the serve command.
pub struct ServeInput {
    /// Optional listen port (overrides config)
    pub port: Option<u16>,
}

/// Strategy for running the webhook listener.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        config.validate()?;

        let provider = AzureOpenAiProvider::new(
            config.provider.endpoint.clone(),
            config.provider.api_key.clone(),
            config.provider.deployment.clone(),
        )
        .with_api_version(config.provider.api_version.clone());

        let store = MemoryConversationStore::with_capacity(config.bot.max_conversations);
        let handler = RelayHandler::new(
            Arc::new(provider),
            Arc::new(store),
            RelayOptions::from_config(&config.bot),
        );

        let port = input.port.unwrap_or(config.server.port);
        info!("Starting relaybot webhook listener on port {port}");

        server::run(Arc::new(AppState { handler }), port).await?;
        Ok(())
    }
}
