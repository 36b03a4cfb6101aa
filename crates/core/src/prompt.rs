//! Prompt assembly: fixed template substitution over the form inputs.

use crate::story::StoryRequest;

/// System instruction sent with every generation call. Fixed; never
/// user-configurable.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert storyteller. Create engaging and \
     immersive stories based on the user's hints, genre, and desired length.";

/// Build the user prompt for a story request.
///
/// Pure and deterministic. Empty hints pass through verbatim, which yields a
/// degenerate but valid prompt ending in `hints: .` -- the provider copes.
pub fn build_prompt(request: &StoryRequest) -> String {
    format!(
        "Create a {} story in the {} genre that includes the following hints: {}.",
        request.length, request.genre, request.hints
    )
}
