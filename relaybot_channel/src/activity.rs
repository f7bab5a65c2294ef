//! The chat-platform activity envelope.
//!
//! Only the fields the relay reads are modeled; everything else in the
//! envelope is the adapter's business and passes through untouched.

use serde::{Deserialize, Serialize};

/// One inbound or outbound chat-platform event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(
        default,
        rename = "channelId",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel_id: Option<String>,
}

/// The sender or recipient of an activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The conversation an activity belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
}

/// Discriminated view of `Activity::activity_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Message,
    ConversationUpdate,
    Other,
}

impl Activity {
    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        match self.activity_type.as_str() {
            "message" => ActivityKind::Message,
            "conversationUpdate" => ActivityKind::ConversationUpdate,
            _ => ActivityKind::Other,
        }
    }

    /// Build an outbound message activity carrying `text`.
    #[must_use]
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            activity_type: "message".to_string(),
            text: Some(text.into()),
            from: None,
            conversation: None,
            channel_id: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_message_envelope() {
        let json = r#"{
            "type": "message",
            "id": "1",
            "channelId": "msteams",
            "text": "Hello",
            "from": { "id": "29:user-1", "name": "Someone" },
            "conversation": { "id": "a:1" },
            "serviceUrl": "https://smba.example.com/"
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();

        assert_eq!(activity.kind(), ActivityKind::Message);
        assert_eq!(activity.text.as_deref(), Some("Hello"));
        assert_eq!(activity.from.unwrap().id, "29:user-1");
        assert_eq!(activity.channel_id.as_deref(), Some("msteams"));
    }

    #[test]
    fn unknown_types_map_to_other() {
        let activity: Activity =
            serde_json::from_str(r#"{"type": "typing"}"#).unwrap();
        assert_eq!(activity.kind(), ActivityKind::Other);

        let update: Activity =
            serde_json::from_str(r#"{"type": "conversationUpdate"}"#).unwrap();
        assert_eq!(update.kind(), ActivityKind::ConversationUpdate);
    }

    #[test]
    fn reply_serializes_without_empty_fields() {
        let value = serde_json::to_value(Activity::reply("Hi there")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "message", "text": "Hi there" })
        );
    }
}
