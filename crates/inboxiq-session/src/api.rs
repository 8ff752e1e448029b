use crate::ChannelError;
use async_trait::async_trait;
use inboxiq_core::{Channel, ChatMessage};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartSessionResponse {
    pub session_id: String,
    /// Welcome message, when the assistant sends one.
    #[serde(default)]
    pub message: Option<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// Request/response contract of one assistant backend.
///
/// Implementations hold no session state; callers pass the session id.
#[async_trait]
pub trait ChannelApi: Send + Sync {
    fn channel(&self) -> Channel;

    async fn start_session(&self) -> Result<StartSessionResponse, ChannelError>;

    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<SendMessageResponse, ChannelError>;

    async fn history(&self, session_id: &str) -> Result<HistoryResponse, ChannelError>;
}
