//! Model classifier adapters.
//!
//! - `MockModelClassifier` - scripted replies for tests and offline runs
//! - `OpenAIClassifier` - OpenAI chat completions in JSON mode

mod mock_classifier;
mod openai_classifier;
mod reply_parser;

pub use mock_classifier::{MockModelClassifier, MockReply};
pub use openai_classifier::{OpenAIClassifier, OpenAIConfig};
pub use reply_parser::parse_classification;
