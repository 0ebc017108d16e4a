use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seed assistant turn of a fresh session.
pub const DEFAULT_WELCOME_MESSAGE: &str = "I am The Vault. Upload a document or ask me anything.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the transcript.
///
/// Fields are private: a turn never changes after it is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    created_at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            source: None,
            created_at: Utc::now(),
        }
    }

    /// An assistant turn without provenance (welcome, confirmations, errors).
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            source: None,
            created_at: Utc::now(),
        }
    }

    /// An assistant answer with the backend's provenance annotation.
    /// An empty source is stored as no source.
    pub fn answer(content: impl Into<String>, source: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            source: source.filter(|s| !s.is_empty()),
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_has_no_source() {
        let turn = Turn::user("What is X?");
        assert_eq!(turn.role(), Role::User);
        assert_eq!(turn.content(), "What is X?");
        assert!(turn.source().is_none());
    }

    #[test]
    fn answer_keeps_source() {
        let turn = Turn::answer("X is Y", Some("doc1.pdf".into()));
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.source(), Some("doc1.pdf"));
    }

    #[test]
    fn answer_drops_empty_source() {
        let turn = Turn::answer("X is Y", Some(String::new()));
        assert!(turn.source().is_none());

        let turn = Turn::answer("X is Y", None);
        assert!(turn.source().is_none());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn turn_json_omits_missing_source() {
        let json = serde_json::to_value(Turn::assistant("Saved.")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "Saved.");
        assert!(json.get("source").is_none());
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
