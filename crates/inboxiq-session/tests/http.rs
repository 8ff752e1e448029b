//! HTTP channel client tests against a mock backend.

use inboxiq_core::{Channel, MessageId, MessageRole};
use inboxiq_session::{
    build_http_client, ChannelApi, ChannelError, DraftAction, DraftClient, HttpChannelApi,
    SessionStore,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn calendar_api(server: &MockServer) -> HttpChannelApi {
    let base = Url::parse(&format!("{}/api/calendar/", server.uri())).unwrap();
    let http = build_http_client(Duration::from_secs(5)).unwrap();
    HttpChannelApi::new(Channel::Calendar, base, http)
}

fn message_json(id: i64, kind: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "type": kind,
        "content": content,
        "timestamp": "2025-03-01T09:00:00+00:00",
        "metadata": {}
    })
}

#[tokio::test]
async fn full_conversation_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/calendar/start/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sessionid=abc; Path=/")
                .set_body_json(json!({
                    "session_id": "cal-1",
                    "message": message_json(1, "assistant", "How can I help with your calendar?")
                })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/calendar/send/"))
        .and(header("cookie", "sessionid=abc"))
        .and(body_json(json!({"session_id": "cal-1", "message": "lunch friday"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {
                "id": 3,
                "type": "assistant",
                "content": "Draft ready",
                "timestamp": "2025-03-01T09:01:00+00:00",
                "metadata": {"type": "event_draft"}
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/calendar/history/cal-1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "cal-1",
            "messages": [
                message_json(1, "assistant", "How can I help with your calendar?"),
                message_json(2, "user", "lunch friday"),
                message_json(3, "assistant", "Draft ready")
            ]
        })))
        .mount(&server)
        .await;

    let store = SessionStore::new(Arc::new(calendar_api(&server)));
    store.start_session().await.expect("start");
    store.send_message("lunch friday").await.expect("send");

    let state = store.snapshot().await;
    assert_eq!(state.session_id.as_deref(), Some("cal-1"));
    assert_eq!(state.messages.len(), 3);
    let reply = state.messages.last().unwrap();
    assert_eq!(reply.id, MessageId::Number(3));
    assert!(reply.is_event_draft());

    store.load_history().await.expect("history");
    let state = store.snapshot().await;
    assert_eq!(state.messages.len(), 3);
    assert_eq!(state.messages[1].role, MessageRole::User);
    assert_eq!(state.messages[1].id, MessageId::Number(2));
}

#[tokio::test]
async fn unauthorized_maps_to_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calendar/start/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Not authenticated"})),
        )
        .mount(&server)
        .await;

    let store = SessionStore::new(Arc::new(calendar_api(&server)));
    let err = store.start_session().await.unwrap_err();
    assert!(err.is_session_expired());
    assert!(!store.snapshot().await.is_session_active);
}

#[tokio::test]
async fn error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calendar/start/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Calendar API quota exceeded"})),
        )
        .mount(&server)
        .await;

    let err = calendar_api(&server).start_session().await.unwrap_err();
    match err {
        ChannelError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Calendar API quota exceeded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unsaved_assistant_reply_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calendar/start/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session_id": "cal-2"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/calendar/send/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {
                "id": null,
                "type": "assistant",
                "content": "I'm having trouble analyzing your message: quota exceeded",
                "timestamp": null
            }
        })))
        .mount(&server)
        .await;

    let store = SessionStore::new(Arc::new(calendar_api(&server)));
    store.start_session().await.expect("start");
    store.send_message("lunch friday").await.expect("send");

    let state = store.snapshot().await;
    assert!(state.error.is_none());
    assert_eq!(state.messages.len(), 2);
    let reply = state.messages.last().unwrap();
    assert_eq!(reply.role, MessageRole::Assistant);
    assert_eq!(
        reply.content,
        "I'm having trouble analyzing your message: quota exceeded"
    );
    assert!(!reply.is_error());
}

#[tokio::test]
async fn lists_email_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/sessions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [{
                "session_id": "mail-1",
                "created_at": "2025-03-01T08:00:00+00:00",
                "updated_at": "2025-03-01T09:00:00+00:00",
                "message_count": 4
            }]
        })))
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api/chat/", server.uri())).unwrap();
    let api = HttpChannelApi::new(Channel::Email, base, reqwest::Client::new());
    let sessions = api.list_sessions().await.expect("sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].session_id, "mail-1");
    assert_eq!(sessions[0].message_count, 4);
}

#[tokio::test]
async fn confirms_and_cancels_drafts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/email/confirm/"))
        .and(body_json(json!({"draft_id": 12, "action": "send"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Email sent successfully to Ana!",
            "message_id": "18c2f"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/email/confirm/"))
        .and(body_json(json!({"draft_id": 13, "action": "cancel"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid action"})))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/api/email/confirm/", server.uri())).unwrap();
    let drafts = DraftClient::new(url, reqwest::Client::new());

    let sent = drafts.confirm(12, DraftAction::Send).await.expect("sent");
    assert!(sent.success);
    assert_eq!(sent.message_id.as_deref(), Some("18c2f"));

    let err = drafts.confirm(13, DraftAction::Cancel).await.unwrap_err();
    assert!(matches!(err, ChannelError::Status { status: 400, .. }));
}
