use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Conversation-handling knobs.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    #[serde(default = "BotConfig::default_system_prompt")]
    pub system_prompt: String,
    /// Stored history is tail-trimmed to this many turns.
    #[serde(default = "BotConfig::default_history_limit")]
    pub history_limit: usize,
    /// How many dialogue turns the `summarize` command covers.
    #[serde(default = "BotConfig::default_summary_window")]
    pub summary_window: usize,
    #[serde(default = "BotConfig::default_temperature")]
    pub temperature: f32,
    /// Optional cap on generated tokens for chat turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Trim whitespace from inbound text before storing it.
    #[serde(default = "BotConfig::default_trim_incoming")]
    pub trim_incoming: bool,
    /// Keep the seed `system` turn through history trimming.
    #[serde(default)]
    pub pin_seed: bool,
    /// Capacity of the in-memory conversation store.
    #[serde(default = "BotConfig::default_max_conversations")]
    pub max_conversations: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            system_prompt: Self::default_system_prompt(),
            history_limit: Self::default_history_limit(),
            summary_window: Self::default_summary_window(),
            temperature: Self::default_temperature(),
            max_tokens: None,
            trim_incoming: Self::default_trim_incoming(),
            pin_seed: false,
            max_conversations: Self::default_max_conversations(),
        }
    }
}

impl BotConfig {
    fn default_system_prompt() -> String {
        "You are a helpful assistant.".to_string()
    }

    const fn default_history_limit() -> usize {
        10
    }

    const fn default_summary_window() -> usize {
        5
    }

    const fn default_temperature() -> f32 {
        0.7
    }

    const fn default_trim_incoming() -> bool {
        true
    }

    const fn default_max_conversations() -> usize {
        10_000
    }
}

/// Azure OpenAI connection settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub deployment: String,
    #[serde(default = "ProviderConfig::default_api_version")]
    pub api_version: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: String::new(),
            api_version: Self::default_api_version(),
        }
    }
}

impl ProviderConfig {
    fn default_api_version() -> String {
        "2024-05-01-preview".to_string()
    }
}

/// Credentials for the chat-platform adapter. Held for the adapter; the
/// relay itself never reads them.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ChannelConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    const fn default_port() -> u16 {
        3978
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "bot": {
    "system_prompt": "You are a helpful assistant.",
    "history_limit": 10,
    "summary_window": 5,
    "temperature": 0.7,
    "trim_incoming": true,
    "pin_seed": false,
    "max_conversations": 10000
  },
  "provider": {
    "endpoint": "https://your-resource.openai.azure.com",
    "api_key": "your-azure-openai-key-here",
    "deployment": "gpt-4o-mini",
    "api_version": "2024-05-01-preview"
  },
  "channel": {
    "app_id": "",
    "app_password": ""
  },
  "server": {
    "port": 3978
  }
}"#;

impl Config {
    /// Load the config file if present, then apply environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Fail startup when the completion service is not reachable by
    /// configuration alone.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.provider.endpoint.is_empty() {
            anyhow::bail!(
                "Completion endpoint not configured. Set AZURE_OPENAI_ENDPOINT or run 'relaybot init' and edit the config file."
            );
        }
        if self.provider.api_key.is_empty() {
            anyhow::bail!("Completion API key not configured. Set AZURE_OPENAI_API_KEY.");
        }
        if self.provider.deployment.is_empty() {
            anyhow::bail!("Completion deployment not configured. Set AZURE_OPENAI_DEPLOYMENT.");
        }
        Ok(())
    }

    fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("relaybot");
        Ok(config_dir.join("config.json"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("relaybot");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Azure OpenAI endpoint, key, and deployment");
        println!("   2. Register the bot endpoint (/api/messages) with your channel adapter");
        println!("   3. Run 'relaybot serve' to start the webhook listener");
        println!();
        println!("🔧 Every credential can also come from the environment:");
        println!("   AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_API_KEY, AZURE_OPENAI_DEPLOYMENT,");
        println!("   OPENAI_API_VERSION, MICROSOFT_APP_ID, MICROSOFT_APP_PASSWORD, PORT");
        println!();
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_non_empty("AZURE_OPENAI_ENDPOINT") {
            self.provider.endpoint = value;
        }
        if let Some(value) = env_non_empty("AZURE_OPENAI_API_KEY") {
            self.provider.api_key = value;
        }
        if let Some(value) = env_non_empty("AZURE_OPENAI_DEPLOYMENT") {
            self.provider.deployment = value;
        }
        if let Some(value) = env_non_empty("OPENAI_API_VERSION") {
            self.provider.api_version = value;
        }
        if let Some(value) = env_non_empty("MICROSOFT_APP_ID") {
            self.channel.app_id = value;
        }
        if let Some(value) = env_non_empty("MICROSOFT_APP_PASSWORD") {
            self.channel.app_password = value;
        }
        if let Some(value) = env_non_empty("PORT") {
            match value.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PORT value: {value}"),
            }
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = Config::default();

        assert_eq!(config.server.port, 3978);
        assert_eq!(config.bot.history_limit, 10);
        assert_eq!(config.bot.summary_window, 5);
        assert!((config.bot.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.bot.max_tokens.is_none());
        assert!(config.bot.trim_incoming);
        assert!(!config.bot.pin_seed);
        assert_eq!(config.provider.api_version, "2024-05-01-preview");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Result<Config, _> =
            serde_json::from_str(r#"{"provider": {"endpoint": "https://x", "api_key": "k", "deployment": "d"}, "bot": {"max_tokens": 150}}"#);

        match parsed {
            Ok(config) => {
                assert_eq!(config.provider.endpoint, "https://x");
                assert_eq!(config.bot.max_tokens, Some(150));
                assert_eq!(config.bot.history_limit, 10);
                assert_eq!(config.server.port, 3978);
            }
            Err(e) => panic!("parse failed: {e}"),
        }
    }

    #[test]
    fn template_parses_and_validates() {
        let parsed: Result<Config, _> = serde_json::from_str(CONFIG_TEMPLATE);
        match parsed {
            Ok(config) => assert!(config.validate().is_ok()),
            Err(e) => panic!("template does not parse: {e}"),
        }
    }

    #[test]
    fn empty_provider_fails_validation() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }
}
