//! Configuration loading for the relay.
//!
//! Settings come from an optional JSON file at `~/relaybot/config.json`
//! (created by `relaybot init`), with environment variables overriding the
//! endpoint, credential, and port options.

mod schema;

pub use schema::{BotConfig, ChannelConfig, Config, ProviderConfig, ServerConfig};
