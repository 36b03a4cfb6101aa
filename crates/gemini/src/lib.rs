//! Client for the Gemini `generateContent` REST API.
//!
//! [`api::GeminiApi`] wraps the raw HTTP call; [`generator::GeminiGenerator`]
//! layers the story-generation contract on top: fixed system instruction,
//! fixed sampling parameters, one synchronous call per invocation, and
//! normalization of every provider fault into
//! [`generator::GenerationError`]. Consumers depend on the
//! [`generator::StoryGenerator`] trait so tests can substitute a stub.

pub mod api;
pub mod generator;
pub mod messages;

pub use generator::{GeminiConfig, GeminiGenerator, GenerationError, StoryGenerator};
