//! # scout-llm
//!
//! Text-generation client for Scout.
//!
//! The pipeline only needs one capability from a language model: send a
//! prompt, optionally constrained to a JSON Schema, and get raw text back.
//! That capability is the [`TextGenerator`] trait. [`GeminiClient`] is the
//! production implementation; tests use scripted fakes.
//!
//! Parsing and validating the returned text is `scout-schema`'s job.

mod error;
mod gemini;
mod schema;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use schema::to_response_schema;

use std::future::Future;

/// A service that turns prompts into text.
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    ///
    /// When `response_schema` is given, the service is asked for a JSON
    /// document matching it. The returned text is not validated here.
    fn generate(
        &self,
        prompt: &str,
        response_schema: Option<&serde_json::Value>,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
