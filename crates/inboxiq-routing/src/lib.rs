mod classifier;
mod router;
mod vocabulary;

pub use classifier::{classify, suggestions, PromptClassifier, Suggestions};
pub use router::{RouteDecision, Router, RoutingPolicy};
pub use vocabulary::Vocabulary;
