mod api;
mod drafts;
mod error;
mod http;
mod reducer;
mod store;
mod timeline;

pub use api::{ChannelApi, HistoryResponse, SendMessageResponse, StartSessionResponse};
pub use drafts::{DraftAction, DraftClient, DraftConfirmation, EmailDraft};
pub use error::ChannelError;
pub use http::{build_http_client, HttpChannelApi};
pub use reducer::{reduce, SessionAction};
pub use store::SessionStore;
pub use timeline::{merge_timeline, TimelineEntry};
