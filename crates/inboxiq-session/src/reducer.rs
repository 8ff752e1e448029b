use inboxiq_core::{ChatMessage, SessionState};

/// Every state change a [`crate::SessionStore`] can make.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    RequestStarted,
    SessionStarted {
        session_id: String,
        welcome: Option<ChatMessage>,
    },
    /// Optimistic user message, appended before the request goes out.
    MessageSubmitted(ChatMessage),
    ReplyReceived(ChatMessage),
    HistoryLoaded(Vec<ChatMessage>),
    RequestFailed {
        error: String,
        reply: Option<ChatMessage>,
    },
    Reset,
}

/// Applies one action. `is_loading` and `error` are never set together.
pub fn reduce(state: &mut SessionState, action: SessionAction) {
    match action {
        SessionAction::RequestStarted => {
            state.is_loading = true;
            state.error = None;
        }
        SessionAction::SessionStarted {
            session_id,
            welcome,
        } => {
            state.session_id = Some(session_id);
            state.is_session_active = true;
            state.messages.extend(welcome);
            state.is_loading = false;
        }
        SessionAction::MessageSubmitted(message) => {
            state.messages.push(message);
            state.is_loading = true;
            state.error = None;
        }
        SessionAction::ReplyReceived(message) => {
            state.messages.push(message);
            state.is_loading = false;
            state.error = None;
        }
        SessionAction::HistoryLoaded(messages) => {
            state.messages = messages;
            state.is_loading = false;
            state.error = None;
        }
        SessionAction::RequestFailed { error, reply } => {
            state.error = Some(error);
            state.is_loading = false;
            state.messages.extend(reply);
        }
        SessionAction::Reset => *state = SessionState::default(),
    }
}
