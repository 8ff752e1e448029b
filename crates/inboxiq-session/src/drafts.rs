use crate::http::decode;
use crate::ChannelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DraftAction {
    Send,
    Edit,
    Cancel,
}

impl DraftAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "send" => Some(Self::Send),
            "edit" => Some(Self::Edit),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

impl fmt::Display for DraftAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Send => "send",
            Self::Edit => "edit",
            Self::Cancel => "cancel",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailDraft {
    pub id: i64,
    pub recipient_name: Option<String>,
    pub recipient_email: String,
    pub subject: String,
    pub body: String,
}

/// Outcome of a draft confirmation. `edit` returns the draft instead of a
/// success flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftConfirmation {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub draft: Option<EmailDraft>,
}

#[derive(Serialize)]
struct ConfirmRequest {
    draft_id: i64,
    action: DraftAction,
}

/// Sends, edits or cancels drafts proposed by the email assistant.
#[derive(Debug, Clone)]
pub struct DraftClient {
    url: Url,
    http: reqwest::Client,
}

impl DraftClient {
    pub fn new(url: Url, http: reqwest::Client) -> Self {
        Self { url, http }
    }

    pub async fn confirm(
        &self,
        draft_id: i64,
        action: DraftAction,
    ) -> Result<DraftConfirmation, ChannelError> {
        tracing::debug!(draft_id, %action, "confirming email draft");
        let response = self
            .http
            .post(self.url.clone())
            .json(&ConfirmRequest { draft_id, action })
            .send()
            .await?;
        decode(response).await
    }
}
