//! Story request types: the three user inputs behind the form.
//!
//! [`Genre`] and [`StoryLength`] are closed sets; their serde forms match the
//! labels the form page submits, so the `Json` extractor rejects anything
//! outside the sets before domain code runs.

use serde::{Deserialize, Serialize};

/// Story genre selected in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Mystery,
    Romance,
    Horror,
    Adventure,
}

impl Genre {
    /// Human-readable label, as shown in the form and used in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Horror => "Horror",
            Genre::Adventure => "Adventure",
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Desired story length selected in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    Medium,
    Long,
}

impl StoryLength {
    pub fn label(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Medium => "medium",
            StoryLength::Long => "long",
        }
    }
}

impl std::fmt::Display for StoryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One generation request, scoped to a single form submission.
///
/// `hints` may be empty; it is passed through to the prompt verbatim, without
/// escaping or sanitization (the provider is trusted to handle arbitrary
/// text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    #[serde(default)]
    pub hints: String,
    pub genre: Genre,
    pub length: StoryLength,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_labels_match_form_values() {
        assert_eq!(Genre::ScienceFiction.to_string(), "Science Fiction");
        assert_eq!(Genre::Fantasy.to_string(), "Fantasy");
    }

    #[test]
    fn genre_deserializes_from_form_label() {
        let genre: Genre = serde_json::from_str(r#""Science Fiction""#).unwrap();
        assert_eq!(genre, Genre::ScienceFiction);
    }

    #[test]
    fn unknown_genre_is_rejected() {
        let result: Result<Genre, _> = serde_json::from_str(r#""Western""#);
        assert!(result.is_err());
    }

    #[test]
    fn length_uses_lowercase_form() {
        let length: StoryLength = serde_json::from_str(r#""medium""#).unwrap();
        assert_eq!(length, StoryLength::Medium);
        assert_eq!(StoryLength::Long.to_string(), "long");
    }

    #[test]
    fn request_defaults_missing_hints_to_empty() {
        let request: StoryRequest =
            serde_json::from_str(r#"{"genre":"Horror","length":"short"}"#).unwrap();
        assert_eq!(request.hints, "");
        assert_eq!(request.genre, Genre::Horror);
    }
}
