use relaybot_config::Config;

/// Strategy for displaying the effective configuration.
///
/// Credentials are masked; everything else prints as loaded (file plus
/// environment overrides).
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== relaybot Configuration ===\n");

        println!("Completion service:");
        println!("  Endpoint: {}", or_not_set(&config.provider.endpoint));
        println!("  Deployment: {}", or_not_set(&config.provider.deployment));
        println!("  API Version: {}", config.provider.api_version);
        println!("  API Key: {}", mask(&config.provider.api_key));
        println!();

        println!("Channel adapter:");
        println!("  App ID: {}", or_not_set(&config.channel.app_id));
        println!("  App Password: {}", mask(&config.channel.app_password));
        println!();

        println!("Bot:");
        println!("  System Prompt: {}", truncate(&config.bot.system_prompt, 60));
        println!("  History Limit: {}", config.bot.history_limit);
        println!("  Summary Window: {}", config.bot.summary_window);
        println!("  Temperature: {}", config.bot.temperature);
        match config.bot.max_tokens {
            Some(cap) => println!("  Max Tokens: {cap}"),
            None => println!("  Max Tokens: (unset)"),
        }
        println!("  Trim Incoming: {}", config.bot.trim_incoming);
        println!("  Pin Seed: {}", config.bot.pin_seed);
        println!("  Max Conversations: {}", config.bot.max_conversations);
        println!();

        println!("Server:");
        println!("  Port: {}", config.server.port);

        Ok(())
    }
}

fn or_not_set(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else if secret.len() > 8 {
        format!("{}...{}", &secret[..4], &secret[secret.len() - 4..])
    } else {
        "***".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
