use anyhow::Context;
use inboxiq_config::AppConfig;
use inboxiq_core::{Channel, ChatMode};
use inboxiq_routing::{PromptClassifier, Router, RoutingPolicy, Vocabulary};
use inboxiq_session::{build_http_client, DraftClient, HttpChannelApi, SessionStore};
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) router: Router,
    pub(crate) mode: ChatMode,
    pub(crate) email_api: Arc<HttpChannelApi>,
    pub(crate) email: SessionStore,
    pub(crate) calendar: SessionStore,
    pub(crate) drafts: DraftClient,
}

impl AppState {
    pub fn initialize(config: AppConfig) -> anyhow::Result<Self> {
        let http = build_http_client(Duration::from_secs(config.api.request_timeout_secs))
            .context("build http client")?;

        let email_api = Arc::new(HttpChannelApi::new(
            Channel::Email,
            config
                .api
                .channel_base(Channel::Email)
                .context("resolve email endpoint")?,
            http.clone(),
        ));
        let calendar_api = Arc::new(HttpChannelApi::new(
            Channel::Calendar,
            config
                .api
                .channel_base(Channel::Calendar)
                .context("resolve calendar endpoint")?,
            http.clone(),
        ));
        let drafts = DraftClient::new(
            config
                .api
                .draft_confirm_url()
                .context("resolve draft endpoint")?,
            http,
        );

        let vocabulary = Vocabulary::default().with_extra_keywords(
            &config.routing.extra_calendar_keywords,
            &config.routing.extra_email_keywords,
        );
        let router = Router::new(
            PromptClassifier::new(vocabulary),
            RoutingPolicy {
                auto_route_threshold: config.routing.auto_route_threshold,
                auto_detection: config.routing.auto_detection,
            },
        );

        Ok(Self {
            mode: config.routing.default_mode,
            router,
            email: SessionStore::new(email_api.clone()),
            calendar: SessionStore::new(calendar_api),
            email_api,
            drafts,
            config,
        })
    }

    pub fn store(&self, channel: Channel) -> &SessionStore {
        match channel {
            Channel::Email => &self.email,
            Channel::Calendar => &self.calendar,
        }
    }

    pub fn stores(&self) -> [&SessionStore; 2] {
        [&self.email, &self.calendar]
    }
}
