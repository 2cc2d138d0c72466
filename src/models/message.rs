use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Sender, TriageCategory};

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TriageCategory>,
}

impl Message {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            category: None,
        }
    }

    pub fn from_assistant(text: impl Into<String>, category: Option<TriageCategory>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_no_category() {
        let msg = Message::from_user("hello");
        assert_eq!(msg.sender, Sender::User);
        assert!(msg.category.is_none());

        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["sender"], "user");
    }

    #[test]
    fn assistant_message_carries_category() {
        let msg = Message::from_assistant("careful", Some(TriageCategory::Warning));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "assistant");
        assert_eq!(json["category"], "warning");
    }

    #[test]
    fn ids_are_unique() {
        let a = Message::from_user("a");
        let b = Message::from_user("a");
        assert_ne!(a.id, b.id);
    }
}
