use crate::{reduce, ChannelApi, ChannelError, SessionAction};
use inboxiq_core::{Channel, ChatMessage, SessionState};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Conversation state of one channel, driven by [`SessionAction`]s.
///
/// Errors returned by the action methods are already folded into the state;
/// they are handed back for logging and re-authentication checks only.
pub struct SessionStore {
    api: Arc<dyn ChannelApi>,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    state: SessionState,
    /// Bumped on reset so responses to older requests can be recognised.
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestTag {
    generation: u64,
    session_id: Option<String>,
}

impl Inner {
    fn tag(&self) -> RequestTag {
        RequestTag {
            generation: self.generation,
            session_id: self.state.session_id.clone(),
        }
    }
}

impl SessionStore {
    pub fn new(api: Arc<dyn ChannelApi>) -> Self {
        Self {
            api,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn channel(&self) -> Channel {
        self.api.channel()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    pub async fn start_session(&self) -> Result<(), ChannelError> {
        let tag = self.begin(SessionAction::RequestStarted).await;

        match self.api.start_session().await {
            Ok(response) => {
                tracing::info!(
                    channel = %self.channel(),
                    session_id = %response.session_id,
                    "session started"
                );
                self.settle(
                    &tag,
                    SessionAction::SessionStarted {
                        session_id: response.session_id,
                        welcome: response.message,
                    },
                )
                .await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(channel = %self.channel(), "failed to start session: {err}");
                self.settle(
                    &tag,
                    SessionAction::RequestFailed {
                        error: err.to_string(),
                        reply: None,
                    },
                )
                .await;
                Err(err)
            }
        }
    }

    /// Appends the user's message immediately, then the assistant's reply or
    /// an error reply in its place.
    pub async fn send_message(&self, text: &str) -> Result<(), ChannelError> {
        let tag = self
            .begin(SessionAction::MessageSubmitted(ChatMessage::user(text)))
            .await;

        let result = match tag.session_id.as_deref() {
            Some(session_id) => self
                .api
                .send_message(session_id, text)
                .await
                .map(|response| response.message),
            None => Err(ChannelError::NoSession),
        };

        match result {
            Ok(reply) => {
                self.settle(&tag, SessionAction::ReplyReceived(reply)).await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(channel = %self.channel(), "failed to send message: {err}");
                self.settle(
                    &tag,
                    SessionAction::RequestFailed {
                        error: err.to_string(),
                        reply: Some(ChatMessage::error_reply(&err)),
                    },
                )
                .await;
                Err(err)
            }
        }
    }

    /// Replaces the local log with the server's. Does nothing without a session.
    pub async fn load_history(&self) -> Result<(), ChannelError> {
        let (tag, session_id) = {
            let mut inner = self.inner.write().await;
            let Some(session_id) = inner.state.session_id.clone() else {
                return Ok(());
            };
            reduce(&mut inner.state, SessionAction::RequestStarted);
            (inner.tag(), session_id)
        };

        match self.api.history(&session_id).await {
            Ok(response) => {
                self.settle(&tag, SessionAction::HistoryLoaded(response.messages))
                    .await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(channel = %self.channel(), "failed to load history: {err}");
                self.settle(
                    &tag,
                    SessionAction::RequestFailed {
                        error: err.to_string(),
                        reply: None,
                    },
                )
                .await;
                Err(err)
            }
        }
    }

    /// Back to the initial state. Requests still in flight are not cancelled;
    /// their responses are dropped when they arrive.
    pub async fn reset_session(&self) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        reduce(&mut inner.state, SessionAction::Reset);
        tracing::info!(channel = %self.channel(), "session reset");
    }

    async fn begin(&self, action: SessionAction) -> RequestTag {
        let mut inner = self.inner.write().await;
        reduce(&mut inner.state, action);
        inner.tag()
    }

    async fn settle(&self, tag: &RequestTag, action: SessionAction) {
        let mut inner = self.inner.write().await;
        if inner.tag() != *tag {
            tracing::debug!(channel = %self.channel(), "discarding stale response");
            return;
        }
        reduce(&mut inner.state, action);
    }
}
