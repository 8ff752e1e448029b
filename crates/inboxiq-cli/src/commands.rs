use inboxiq_core::{Channel, ChatMode};
use inboxiq_session::DraftAction;
use thiserror::Error;

pub const HELP: &str = "\
Type a message to chat; it is routed to Gmail or Calendar automatically.
  /mode auto|email|calendar        pick the routing mode
  /history                         reload both conversations from the server
  /timeline                        show both conversations merged
  /sessions                        list your email chat sessions
  /confirm <draft_id> send|edit|cancel
  /reset                           start over
  /help                            show this help
  /quit                            exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Chat(String),
    Mode(ChatMode),
    History,
    Timeline,
    Sessions,
    Confirm { draft_id: i64, action: DraftAction },
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command `/{0}`, try /help")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Chat(line.to_string())));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let args = parts.collect::<Vec<_>>();

    let command = match (name.as_str(), args.as_slice()) {
        ("mode", [mode]) => Command::Mode(
            ChatMode::parse(mode).ok_or(CommandError::Usage("/mode auto|email|calendar"))?,
        ),
        ("mode", _) => return Err(CommandError::Usage("/mode auto|email|calendar")),
        ("history", []) => Command::History,
        ("timeline", []) => Command::Timeline,
        ("sessions", []) => Command::Sessions,
        ("confirm", [draft_id, action]) => {
            const USAGE: &str = "/confirm <draft_id> send|edit|cancel";
            Command::Confirm {
                draft_id: draft_id.parse().map_err(|_| CommandError::Usage(USAGE))?,
                action: DraftAction::parse(action).ok_or(CommandError::Usage(USAGE))?,
            }
        }
        ("confirm", _) => return Err(CommandError::Usage("/confirm <draft_id> send|edit|cancel")),
        ("reset", []) => Command::Reset,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Answer to the "[e]mail or [c]alendar?" prompt.
pub fn parse_channel_choice(answer: &str) -> Option<Channel> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "e" | "email" | "gmail" => Some(Channel::Email),
        "c" | "calendar" => Some(Channel::Calendar),
        _ => None,
    }
}
