use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("no active session")]
    NoSession,
}

impl ChannelError {
    /// The backend rejected the session cookie; the user has to re-authenticate.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
