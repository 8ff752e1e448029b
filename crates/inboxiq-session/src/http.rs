use crate::{ChannelApi, ChannelError, HistoryResponse, SendMessageResponse, StartSessionResponse};
use async_trait::async_trait;
use inboxiq_core::{Channel, SessionSummary};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Client shared by every channel so the backend session cookie travels with
/// each request.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ChannelError> {
    Ok(reqwest::Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .build()?)
}

#[derive(Debug, Clone)]
pub struct HttpChannelApi {
    channel: Channel,
    base: Url,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    session_id: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct SessionsResponse {
    sessions: Vec<SessionSummary>,
}

impl HttpChannelApi {
    /// `base` is the channel root, e.g. `http://localhost:8000/api/calendar/`.
    pub fn new(channel: Channel, base: Url, http: reqwest::Client) -> Self {
        Self {
            channel,
            base,
            http,
        }
    }

    /// Active sessions of the signed-in user. Only the email backend serves this.
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>, ChannelError> {
        let url = self.base.join("sessions/")?;
        tracing::debug!(channel = %self.channel, %url, "listing sessions");
        let response = self.http.get(url).send().await?;
        let body: SessionsResponse = decode(response).await?;
        Ok(body.sessions)
    }

    fn history_url(&self, session_id: &str) -> Result<Url, ChannelError> {
        let mut url = self.base.join("history/")?;
        url.path_segments_mut()
            .map_err(|_| ChannelError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(session_id)
            .push("");
        Ok(url)
    }
}

#[async_trait]
impl ChannelApi for HttpChannelApi {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn start_session(&self) -> Result<StartSessionResponse, ChannelError> {
        let url = self.base.join("start/")?;
        tracing::debug!(channel = %self.channel, %url, "starting session");
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        decode(response).await
    }

    async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<SendMessageResponse, ChannelError> {
        let url = self.base.join("send/")?;
        tracing::debug!(channel = %self.channel, %url, session_id, "sending message");
        let response = self
            .http
            .post(url)
            .json(&SendMessageRequest {
                session_id,
                message,
            })
            .send()
            .await?;
        decode(response).await
    }

    async fn history(&self, session_id: &str) -> Result<HistoryResponse, ChannelError> {
        let url = self.history_url(session_id)?;
        tracing::debug!(channel = %self.channel, %url, "fetching history");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ChannelError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ChannelError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ChannelError::Status {
            status: status.as_u16(),
            message: error_message(&body, status),
        });
    }

    Ok(response.json::<T>().await?)
}

/// Prefers the backend's `{"error": ...}` field, then the raw body.
fn error_message(body: &str, status: StatusCode) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|value| value.as_str())
                .map(str::to_string)
        });
    if let Some(message) = from_json {
        return message;
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_url_keeps_trailing_slash() {
        let api = HttpChannelApi::new(
            Channel::Calendar,
            Url::parse("http://localhost:8000/api/calendar/").unwrap(),
            reqwest::Client::new(),
        );
        assert_eq!(
            api.history_url("abc-123").unwrap().as_str(),
            "http://localhost:8000/api/calendar/history/abc-123/"
        );
    }

    #[test]
    fn error_message_prefers_json_field() {
        assert_eq!(
            error_message(r#"{"error": "Session not found"}"#, StatusCode::NOT_FOUND),
            "Session not found"
        );
        assert_eq!(
            error_message("upstream timeout\n", StatusCode::BAD_GATEWAY),
            "upstream timeout"
        );
        assert_eq!(
            error_message("", StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }
}
