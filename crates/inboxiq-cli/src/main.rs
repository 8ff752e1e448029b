mod commands;
mod state;

use anyhow::Context;
use commands::{parse_channel_choice, parse_command, Command, HELP};
use inboxiq_config::ConfigManager;
use inboxiq_core::{Channel, ChatMessage, MessageRole};
use inboxiq_routing::{suggestions, RouteDecision};
use inboxiq_session::{merge_timeline, ChannelError, DraftAction};
use state::AppState;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type InputLines = Lines<BufReader<Stdin>>;

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_manager = ConfigManager::new().context("initialize config manager")?;
    let config = config_manager.load().context("load app config")?;
    init_tracing(&config.logging.filter);
    tracing::debug!(path = %config_manager.config_path().display(), "config loaded");

    let mut state = AppState::initialize(config).context("initialize app state")?;
    for store in state.stores() {
        if let Err(err) = store.start_session().await {
            report_error(&state, store.channel(), &err);
        }
    }
    for store in state.stores() {
        if let Some(welcome) = store.snapshot().await.messages.last() {
            print_message(store.channel(), welcome);
        }
    }
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Chat(text) => chat(&state, &mut lines, &text).await?,
            Command::Mode(mode) => {
                state.mode = mode;
                println!("Routing mode: {mode:?}");
            }
            Command::History => {
                for store in state.stores() {
                    if let Err(err) = store.load_history().await {
                        report_error(&state, store.channel(), &err);
                    }
                }
                print_timeline(&state).await;
            }
            Command::Timeline => print_timeline(&state).await,
            Command::Sessions => match state.email_api.list_sessions().await {
                Ok(sessions) if sessions.is_empty() => println!("No active email sessions."),
                Ok(sessions) => {
                    for session in sessions {
                        println!(
                            "{}  {} messages  last active {}",
                            session.session_id,
                            session.message_count,
                            session.updated_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
                Err(err) => report_error(&state, Channel::Email, &err),
            },
            Command::Confirm { draft_id, action } => {
                confirm_draft(&state, draft_id, action).await;
            }
            Command::Reset => {
                for store in state.stores() {
                    store.reset_session().await;
                }
                for store in state.stores() {
                    if let Err(err) = store.start_session().await {
                        report_error(&state, store.channel(), &err);
                    }
                }
                println!("Conversations reset.");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

async fn chat(state: &AppState, lines: &mut InputLines, text: &str) -> anyhow::Result<()> {
    let channel = match state.router.route(state.mode, text) {
        RouteDecision::Ignore => return Ok(()),
        RouteDecision::Send(channel) => channel,
        RouteDecision::Disambiguate(result) => {
            for hint in suggestions(&result).suggestions {
                println!("  {hint}");
            }
            println!(
                "Not sure where this goes ({}). Send to [e]mail or [c]alendar?",
                result.reasoning
            );
            let Some(answer) = lines.next_line().await? else {
                return Ok(());
            };
            match parse_channel_choice(&answer) {
                Some(channel) => channel,
                None => {
                    println!("Message not sent.");
                    return Ok(());
                }
            }
        }
    };

    let store = state.store(channel);
    if let Err(err) = store.send_message(text).await {
        tracing::debug!(%channel, "send failed: {err}");
        if err.is_session_expired() {
            report_error(state, channel, &err);
        }
    }

    if let Some(reply) = store
        .snapshot()
        .await
        .messages
        .last()
        .filter(|message| message.role == MessageRole::Assistant)
    {
        print_message(channel, reply);
    }
    Ok(())
}

async fn confirm_draft(state: &AppState, draft_id: i64, action: DraftAction) {
    match state.drafts.confirm(draft_id, action).await {
        Ok(outcome) => {
            if let Some(draft) = outcome.draft {
                println!(
                    "Draft {} to {}\nSubject: {}\n\n{}",
                    draft.id, draft.recipient_email, draft.subject, draft.body
                );
            } else {
                println!(
                    "{}",
                    outcome
                        .message
                        .unwrap_or_else(|| format!("Draft {draft_id}: {action} done."))
                );
            }
        }
        Err(err) => report_error(state, Channel::Email, &err),
    }
}

async fn print_timeline(state: &AppState) {
    let email = state.email.snapshot().await;
    let calendar = state.calendar.snapshot().await;
    for entry in merge_timeline(&email.messages, &calendar.messages) {
        print_message(entry.channel, &entry.message);
    }
}

fn print_message(channel: Channel, message: &ChatMessage) {
    let time = message.timestamp.format("%H:%M");
    match message.role {
        MessageRole::User => println!("{time} you > {}", message.content),
        MessageRole::Assistant => {
            let marker = if message.is_error() { "!" } else { ">" };
            println!("{time} {} {marker} {}", channel.label(), message.content);
            let drafts = message.draft_count();
            if drafts > 0 {
                println!(
                    "      {drafts} email draft{}",
                    if drafts > 1 { "s" } else { "" }
                );
            }
            if let Some(draft_id) = message.draft_id() {
                println!("      /confirm {draft_id} send|edit|cancel");
            }
            if message.is_event_draft() {
                println!("      event draft");
            }
        }
    }
}

fn report_error(state: &AppState, channel: Channel, err: &ChannelError) {
    if err.is_session_expired() {
        println!(
            "Your session has expired. Sign in again at {}",
            state.config.api.auth_url
        );
    } else {
        tracing::warn!(%channel, "{err}");
    }
}
