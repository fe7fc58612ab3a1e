//! Conversation types shared by requests and the chatbot history

use serde::{Deserialize, Serialize};

/// Author of a conversation turn
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The person asking
    User,
    /// The assistant
    Model,
}

/// One message of the chatbot history as the client keeps it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    /// Who said it
    pub role: ChatRole,
    /// What was said
    pub text: String,
}

impl ChatTurn {
    /// A user turn
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    /// A model turn
    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// A content entry on the wire: a role and its parts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    /// Omitted for system instructions
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<ChatRole>,
    /// Parts, text only
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user content entry with text
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some(ChatRole::User),
            parts: vec![Part::text(text)],
        }
    }

    /// A role-less entry, used for system instructions
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

impl From<&ChatTurn> for Content {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: Some(turn.role),
            parts: vec![Part::text(turn.text.clone())],
        }
    }
}

/// A text part. Non-text parts deserialize with `text: None`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

impl Part {
    /// Create a text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}
