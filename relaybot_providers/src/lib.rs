//! Completion-service clients.

mod azure;

pub use azure::AzureOpenAiProvider;
