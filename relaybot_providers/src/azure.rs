use async_trait::async_trait;
use relaybot_core::{
    CompletionParams, CompletionProvider, CompletionReply, ConversationTurn, Usage,
};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

/// Azure OpenAI chat-completions client.
///
/// One suspend-until-complete call per invocation; no retry, and no timeout
/// beyond the client default.
pub struct AzureOpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
}

impl AzureOpenAiProvider {
    pub fn new(endpoint: String, api_key: String, deployment: String) -> Self {
        info!("Creating AzureOpenAiProvider for deployment {deployment}");
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            deployment,
            api_version: "2024-05-01-preview".to_string(),
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: String) -> Self {
        self.api_version = api_version;
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    fn build_request(
        &self,
        messages: &[ConversationTurn],
        params: &CompletionParams,
    ) -> serde_json::Value {
        let mut request = json!({
            "model": self.deployment,
            "messages": messages,
            "temperature": params.temperature,
        });
        if let Some(cap) = params.max_tokens {
            request["max_tokens"] = json!(cap);
        }
        request
    }
}

#[async_trait]
impl CompletionProvider for AzureOpenAiProvider {
    async fn complete(
        &self,
        messages: &[ConversationTurn],
        params: &CompletionParams,
    ) -> anyhow::Result<CompletionReply> {
        let request = self.build_request(messages, params);

        debug!(
            "Sending {} messages to deployment {}",
            messages.len(),
            self.deployment
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Keep the body: the service attaches a structured error payload
            // that the caller logs.
            let payload = response.text().await.unwrap_or_default();
            anyhow::bail!("completion service returned {status}: {payload}");
        }

        let body = response.json::<serde_json::Value>().await?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string);

        let usage = body["usage"].as_object().map(|u| Usage {
            prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
            completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
                .unwrap_or(0),
            total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        });

        Ok(CompletionReply { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AzureOpenAiProvider {
        AzureOpenAiProvider::new(
            "https://example.openai.azure.com/".to_string(),
            "key".to_string(),
            "gpt-test".to_string(),
        )
    }

    #[test]
    fn url_strips_trailing_slash_and_carries_api_version() {
        let url = provider()
            .with_api_version("2024-05-01-preview".to_string())
            .completions_url();
        assert_eq!(
            url,
            "https://example.openai.azure.com/openai/deployments/gpt-test/chat/completions?api-version=2024-05-01-preview"
        );
    }

    #[test]
    fn request_omits_token_cap_when_unset() {
        let request = provider().build_request(
            &[ConversationTurn::user("hi")],
            &CompletionParams::new(0.7),
        );

        assert!(request.get("max_tokens").is_none());
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][0]["content"], "hi");
    }

    #[test]
    fn request_carries_token_cap_when_set() {
        let request = provider().build_request(
            &[ConversationTurn::user("hi")],
            &CompletionParams::new(0.7).with_max_tokens(150),
        );

        assert_eq!(request["max_tokens"], 150);
    }
}
