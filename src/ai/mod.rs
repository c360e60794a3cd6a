// LLM-backed steps: property evaluation and client email drafting, both
// through Gemini's JSON response mode.

pub mod composer;
pub mod evaluator;
pub mod gemini;

pub use composer::{draft_email_for_selection, EmailDraft};
pub use evaluator::evaluate_properties;
pub use gemini::{GeminiClient, GeminiError};
