use crate::PromptClassifier;
use inboxiq_core::{Channel, ChatMode, ClassificationResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingPolicy {
    pub auto_route_threshold: f64,
    pub auto_detection: bool,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            auto_route_threshold: 0.6,
            auto_detection: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Nothing to send.
    Ignore,
    Send(Channel),
    /// Too weak to act on; the user has to pick a channel.
    Disambiguate(ClassificationResult),
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    classifier: PromptClassifier,
    policy: RoutingPolicy,
}

impl Router {
    pub fn new(classifier: PromptClassifier, policy: RoutingPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn route(&self, mode: ChatMode, text: &str) -> RouteDecision {
        if text.trim().is_empty() {
            return RouteDecision::Ignore;
        }

        match mode {
            ChatMode::Email => RouteDecision::Send(Channel::Email),
            ChatMode::Calendar => RouteDecision::Send(Channel::Calendar),
            ChatMode::Auto if !self.policy.auto_detection => RouteDecision::Send(Channel::Email),
            ChatMode::Auto => {
                let result = self.classifier.classify(text);
                tracing::debug!(
                    prompt_type = ?result.prompt_type,
                    confidence = result.confidence,
                    reasoning = %result.reasoning,
                    "classified prompt"
                );
                self.decide(result)
            }
        }
    }

    pub fn decide(&self, result: ClassificationResult) -> RouteDecision {
        match result.prompt_type.channel() {
            Some(channel) if result.confidence > self.policy.auto_route_threshold => {
                RouteDecision::Send(channel)
            }
            _ => RouteDecision::Disambiguate(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inboxiq_core::PromptType;

    #[test]
    fn confident_prompts_are_auto_routed() {
        let router = Router::default();
        assert_eq!(
            router.route(ChatMode::Auto, "Schedule a meeting for tomorrow at 2 PM"),
            RouteDecision::Send(Channel::Calendar)
        );
        assert_eq!(
            router.route(ChatMode::Auto, "Send an email to John about the project"),
            RouteDecision::Send(Channel::Email)
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let router = Router::default();
        match router.route(ChatMode::Auto, "sync mail tomorrow") {
            RouteDecision::Disambiguate(result) => {
                assert_eq!(result.prompt_type, PromptType::Calendar);
                assert!((result.confidence - 0.6).abs() < 1e-9);
            }
            other => panic!("expected disambiguation, got {other:?}"),
        }
    }

    #[test]
    fn unknown_is_never_auto_routed() {
        let router = Router::new(
            PromptClassifier::default(),
            RoutingPolicy {
                auto_route_threshold: 0.0,
                auto_detection: true,
            },
        );
        assert!(matches!(
            router.route(ChatMode::Auto, "schedule sync email bob@x.io tomorrow"),
            RouteDecision::Disambiguate(_)
        ));
    }

    #[test]
    fn forced_modes_skip_classification() {
        let router = Router::default();
        assert_eq!(
            router.route(ChatMode::Calendar, "send an email"),
            RouteDecision::Send(Channel::Calendar)
        );
        assert_eq!(
            router.route(ChatMode::Email, "check my calendar"),
            RouteDecision::Send(Channel::Email)
        );
    }

    #[test]
    fn disabled_detection_defaults_to_email() {
        let router = Router::new(
            PromptClassifier::default(),
            RoutingPolicy {
                auto_route_threshold: 0.6,
                auto_detection: false,
            },
        );
        assert_eq!(
            router.route(ChatMode::Auto, "check my calendar"),
            RouteDecision::Send(Channel::Email)
        );
    }

    #[test]
    fn blank_input_is_ignored() {
        assert_eq!(
            Router::default().route(ChatMode::Auto, "  "),
            RouteDecision::Ignore
        );
    }
}
