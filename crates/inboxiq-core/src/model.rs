use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Backend assistant a message is routed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Channel {
    #[serde(rename = "gmail", alias = "email")]
    Email,
    #[serde(rename = "calendar")]
    Calendar,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "gmail",
            Self::Calendar => "calendar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Gmail",
            Self::Calendar => "Calendar",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PromptType {
    #[serde(alias = "gmail")]
    Email,
    Calendar,
    Unknown,
}

impl PromptType {
    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::Email => Some(Channel::Email),
            Self::Calendar => Some(Channel::Calendar),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub prompt_type: PromptType,
    pub confidence: f64,
    /// Diagnostic only; never branch on it.
    pub reasoning: String,
}

impl ClassificationResult {
    pub fn new(prompt_type: PromptType, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            prompt_type,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    pub fn unknown(reasoning: impl Into<String>) -> Self {
        Self::new(PromptType::Unknown, 0.0, reasoning)
    }
}

/// Explicit target chosen in the chat UI; `Auto` defers to the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    Auto,
    Email,
    Calendar,
}

impl ChatMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "email" | "gmail" => Some(Self::Email),
            "calendar" => Some(Self::Calendar),
            _ => None,
        }
    }
}

/// Server messages carry numeric row ids, optimistic ones carry a UUID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl MessageId {
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Replies the backend never stored arrive with a null id.
    #[serde(default = "MessageId::generate", deserialize_with = "null_as_generated")]
    pub id: MessageId,
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
    /// Null timestamps are stamped with the time of receipt.
    #[serde(default = "Utc::now", deserialize_with = "null_as_now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: Map<String, Value>,
}

impl ChatMessage {
    /// Optimistic user message, stamped locally.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: Map::new(),
        }
    }

    /// Synthetic assistant turn standing in for a failed request.
    pub fn error_reply(error: &impl fmt::Display) -> Self {
        let mut metadata = Map::new();
        metadata.insert("isError".to_string(), Value::Bool(true));
        Self {
            id: MessageId::generate(),
            role: MessageRole::Assistant,
            content: format!("I'm sorry, I encountered an error: {error}. Please try again."),
            timestamp: Utc::now(),
            metadata,
        }
    }

    pub fn is_error(&self) -> bool {
        self.metadata
            .get("isError")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn draft_count(&self) -> usize {
        self.metadata
            .get("drafts")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Draft awaiting confirmation, as attached by the email assistant.
    pub fn draft_id(&self) -> Option<i64> {
        self.metadata.get("draft_id").and_then(Value::as_i64)
    }

    pub fn is_event_draft(&self) -> bool {
        self.metadata.get("type").and_then(Value::as_str) == Some("event_draft")
    }
}

fn null_as_generated<'de, D>(deserializer: D) -> Result<MessageId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MessageId>::deserialize(deserializer)?.unwrap_or_else(MessageId::generate))
}

fn null_as_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?.unwrap_or_else(Utc::now))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Client-side view of one channel's conversation.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionState {
    pub messages: Vec<ChatMessage>,
    pub session_id: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_session_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}
