//! Fixed sampling parameters for the generation call.

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
/// Default nucleus sampling cutoff.
pub const DEFAULT_TOP_P: f64 = 0.95;
/// Default top-k sampling cutoff.
pub const DEFAULT_TOP_K: i32 = 64;
/// Hard ceiling on generated tokens per story.
pub const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 8192;
/// Stories are requested as plain text, never structured output.
pub const RESPONSE_MIME_TYPE: &str = "text/plain";

/// Sampling controls sent with every generation call.
///
/// Process-wide and immutable: constructed once via [`Default`] and never
/// exposed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: i32,
    pub max_output_tokens: i32,
    pub response_mime_type: &'static str,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            response_mime_type: RESPONSE_MIME_TYPE,
        }
    }
}
