use crate::Vocabulary;
use inboxiq_core::{ClassificationResult, PromptType};
use std::sync::OnceLock;

const STRONG_PHRASE_CONFIDENCE: f64 = 0.95;
const KEYWORD_SCALE: f64 = 0.8;
const KEYWORD_CAP: f64 = 0.9;
const CONTEXT_CONFIDENCE: f64 = 0.6;
const AMBIGUOUS_CONFIDENCE: f64 = 0.3;
const CLARIFICATION_BELOW: f64 = 0.5;

/// Decides whether a prompt belongs to the email or the calendar assistant.
///
/// Matching is plain substring containment on the lowercased prompt, so a
/// keyword also hits inside longer words ("to" in "tomato").
#[derive(Debug, Clone, Default)]
pub struct PromptClassifier {
    vocabulary: Vocabulary,
}

impl PromptClassifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn classify(&self, prompt: &str) -> ClassificationResult {
        let normalized = prompt.trim().to_lowercase();
        if normalized.is_empty() {
            return ClassificationResult::unknown("Invalid or empty prompt");
        }

        let vocab = &self.vocabulary;
        let strong_calendar = contains_any(&normalized, &vocab.strong_calendar_phrases);
        let strong_email = contains_any(&normalized, &vocab.strong_email_phrases);
        match (strong_calendar, strong_email) {
            (true, false) => {
                return ClassificationResult::new(
                    PromptType::Calendar,
                    STRONG_PHRASE_CONFIDENCE,
                    "Strong calendar phrase detected",
                );
            }
            (false, true) => {
                return ClassificationResult::new(
                    PromptType::Email,
                    STRONG_PHRASE_CONFIDENCE,
                    "Strong email phrase detected",
                );
            }
            _ => {}
        }

        let calendar_matches = count_matches(&normalized, &vocab.calendar_keywords);
        let email_matches = count_matches(&normalized, &vocab.email_keywords);
        let total = calendar_matches + email_matches;
        if total == 0 {
            return ClassificationResult::unknown("No relevant keywords found");
        }

        let calendar_score = calendar_matches as f64 / total as f64;
        let email_score = email_matches as f64 / total as f64;

        if calendar_score > email_score {
            return ClassificationResult::new(
                PromptType::Calendar,
                keyword_confidence(calendar_score),
                format!("Calendar keywords: {calendar_matches}, Email keywords: {email_matches}"),
            );
        }
        if email_score > calendar_score {
            return ClassificationResult::new(
                PromptType::Email,
                keyword_confidence(email_score),
                format!("Email keywords: {email_matches}, Calendar keywords: {calendar_matches}"),
            );
        }

        let time_context = contains_any(&normalized, &vocab.time_indicators);
        let email_context = contains_any(&normalized, &vocab.email_indicators);
        match (time_context, email_context) {
            (true, false) => ClassificationResult::new(
                PromptType::Calendar,
                CONTEXT_CONFIDENCE,
                "Equal keyword matches but time context suggests calendar",
            ),
            (false, true) => ClassificationResult::new(
                PromptType::Email,
                CONTEXT_CONFIDENCE,
                "Equal keyword matches but email context suggests email",
            ),
            _ => ClassificationResult::new(
                PromptType::Unknown,
                AMBIGUOUS_CONFIDENCE,
                "Equal keyword matches with no clear context",
            ),
        }
    }
}

/// Classifies with the built-in vocabulary.
pub fn classify(prompt: &str) -> ClassificationResult {
    static DEFAULT: OnceLock<PromptClassifier> = OnceLock::new();
    DEFAULT.get_or_init(PromptClassifier::default).classify(prompt)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
    pub needs_clarification: bool,
}

/// Example prompts to show when a classification is too weak to act on.
pub fn suggestions(result: &ClassificationResult) -> Suggestions {
    if result.confidence < CLARIFICATION_BELOW {
        return Suggestions {
            suggestions: vec![
                "For calendar: Try 'Schedule a meeting for tomorrow at 2 PM'".to_string(),
                "For email: Try 'Send an email to John about the project update'".to_string(),
            ],
            needs_clarification: true,
        };
    }

    Suggestions {
        suggestions: Vec::new(),
        needs_clarification: false,
    }
}

fn keyword_confidence(score: f64) -> f64 {
    (score * KEYWORD_SCALE).min(KEYWORD_CAP)
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| text.contains(needle.as_str()))
}

fn count_matches(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count()
}
