//! Contract drafting domain.
//!
//! Everything here is pure: the AI call lives behind
//! [`crate::ports::AIProvider`] and is driven by the application layer.
//! The functions in this module turn a raw model reply into a
//! [`GeneratedContract`] that is always well formed.

mod extract;
mod generated;
mod language;
mod normalize;
mod plain_text;
mod prompt;
mod repair;
mod request;
mod templates;
mod tolerant_json;

pub use extract::extract_json_candidate;
pub use generated::{GeneratedContract, GenerationOutcome, ResolutionStage, RiskItem, RiskLevel};
pub use language::{detect_language, Locale};
pub use normalize::{normalize, ParsedResponse, RecognizedFields};
pub use plain_text::parse_plain_text;
pub use prompt::compose_prompt;
pub use repair::repair_text;
pub use request::{ContractRequest, Currency, Party};
pub use templates::{format_date, messages, offline_template, upstream_failure, Messages};
pub use tolerant_json::parse_json_tolerant;
