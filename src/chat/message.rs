use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in the conversation.
///
/// Messages are never edited after creation; the session only appends.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Local creation time, display only.
    pub timestamp: DateTime<Local>,
    /// Stands in for a reply that never arrived. Not sent over the wire.
    pub failed: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Local::now(),
            failed: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Local::now(),
            failed: false,
        }
    }

    /// Assistant-authored error text shown in place of a reply.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            failed: true,
            ..Self::assistant(content)
        }
    }

    /// The role + content pair sent over the wire.
    pub fn to_wire(&self) -> WireMessage {
        WireMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Message shape in the backend request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

/// Request body: `{ "messages": [{ "role": ..., "content": ... }, ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_user() {
        let m = Message::user("hello");
        assert_eq!(m.role, Role::User);
        assert_eq!(m.content, "hello");
    }

    #[test]
    fn message_assistant() {
        let m = Message::assistant("hi there");
        assert_eq!(m.role, Role::Assistant);
        assert_eq!(m.content, "hi there");
    }

    #[test]
    fn failure_is_flagged_assistant_message() {
        let m = Message::failure("offline");
        assert_eq!(m.role, Role::Assistant);
        assert!(m.failed);
        assert!(!Message::assistant("offline").failed);
    }

    #[test]
    fn failure_wire_shape_is_plain() {
        let json = serde_json::to_value(Message::failure("offline").to_wire()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "assistant", "content": "offline"})
        );
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }

    #[test]
    fn wire_message_drops_timestamp() {
        let wire = Message::user("hello").to_wire();
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn request_body_shape() {
        let request = ChatRequest {
            messages: vec![
                Message::assistant("welcome").to_wire(),
                Message::user("hello").to_wire(),
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [
                    {"role": "assistant", "content": "welcome"},
                    {"role": "user", "content": "hello"},
                ]
            })
        );
    }
}
