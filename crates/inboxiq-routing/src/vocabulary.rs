#[rustfmt::skip]
const CALENDAR_KEYWORDS: &[&str] = &[
    // event creation
    "schedule", "meeting", "appointment", "event", "book", "reserve", "plan", "organize",
    "arrange", "set up", "create event",
    // time
    "calendar", "date", "time", "when", "tomorrow", "today", "next week", "next month",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "morning",
    "afternoon", "evening", "night", "am", "pm", "o'clock", "hour", "minute",
    // calendar actions
    "free time", "available", "busy", "conflict", "reschedule", "cancel", "postpone", "move",
    "change time", "find time", "check calendar", "my schedule", "upcoming events", "agenda",
    "diary",
    // meetings
    "conference call", "video call", "zoom", "teams", "skype", "presentation", "demo",
    "review", "standup", "sync", "one-on-one", "1:1", "all-hands", "team meeting",
    // reminders
    "remind", "reminder", "alert", "notification", "notify",
    // recurrence
    "weekly", "daily", "monthly", "recurring", "repeat", "every",
    // location
    "room", "conference room", "office", "location", "venue", "where",
];

// Repeated entries ("draft", "compose", "newsletter") each add to the tally.
#[rustfmt::skip]
const EMAIL_KEYWORDS: &[&str] = &[
    // actions
    "email", "mail", "send", "compose", "draft", "reply", "forward", "message", "letter",
    "correspondence", "communication",
    // mailbox management
    "inbox", "sent", "archive", "delete", "spam", "trash", "folder", "label", "filter",
    "search", "find email",
    // composition
    "write", "type", "draft", "compose", "send to", "email to", "cc", "bcc", "subject",
    "attachment", "attach",
    // recipients
    "recipient", "to", "from", "sender", "receiver",
    // email types
    "newsletter", "notification", "confirmation", "invoice", "receipt", "update",
    "announcement", "newsletter",
    // status
    "read", "unread", "important", "starred", "priority", "urgent", "follow up", "follow-up",
];

const STRONG_CALENDAR_PHRASES: &[&str] = &[
    "schedule a meeting",
    "book an appointment",
    "create event",
    "check my calendar",
    "find free time",
    "when am i free",
    "upcoming events",
    "my schedule",
    "calendar invite",
    "meeting request",
    "block time",
    "time slot",
];

const STRONG_EMAIL_PHRASES: &[&str] = &[
    "send an email",
    "compose email",
    "draft email",
    "email draft",
    "write email",
    "send message",
    "reply to email",
    "forward email",
    "check inbox",
    "email someone",
    "send to",
];

#[rustfmt::skip]
const TIME_INDICATORS: &[&str] = &[
    "at", "on", "in", "during", "before", "after", ":", "am", "pm", "morning", "afternoon",
    "evening", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "tomorrow", "today", "next",
];

const EMAIL_INDICATORS: &[&str] = &[
    "@",
    ".com",
    ".org",
    ".net",
    "subject:",
    "dear",
    "sincerely",
    "best regards",
    "thank you",
    "please",
    "attachment",
];

/// Phrase tables the classifier matches against. Entries are lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub calendar_keywords: Vec<String>,
    pub email_keywords: Vec<String>,
    pub strong_calendar_phrases: Vec<String>,
    pub strong_email_phrases: Vec<String>,
    pub time_indicators: Vec<String>,
    pub email_indicators: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            calendar_keywords: owned(CALENDAR_KEYWORDS),
            email_keywords: owned(EMAIL_KEYWORDS),
            strong_calendar_phrases: owned(STRONG_CALENDAR_PHRASES),
            strong_email_phrases: owned(STRONG_EMAIL_PHRASES),
            time_indicators: owned(TIME_INDICATORS),
            email_indicators: owned(EMAIL_INDICATORS),
        }
    }
}

impl Vocabulary {
    /// Appends user-configured keywords to the tally vocabularies.
    pub fn with_extra_keywords<I, J>(mut self, calendar: I, email: J) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        self.calendar_keywords.extend(normalized(calendar));
        self.email_keywords.extend(normalized(email));
        self
    }
}

fn owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|entry| (*entry).to_string()).collect()
}

fn normalized<I>(entries: I) -> impl Iterator<Item = String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
}
