//! The single-shot generation cycle, modeled as an explicit state machine.
//!
//! One form submission drives exactly one cycle:
//!
//! ```text
//! Idle -> Submitted -> (Success | Failed) -> Idle
//! ```
//!
//! `Submitted` covers prompt assembly and the outbound call; the terminal
//! states hold what the form renders (the story text or a user-facing error
//! message). [`StoryCycle::reset`] is the "next render" edge back to `Idle`.
//! A cycle never has more than one request in flight -- `submit` refuses to
//! start a second one.

use crate::prompt::build_prompt;
use crate::story::StoryRequest;

/// State of one generation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryCycle {
    /// No request in flight.
    Idle,
    /// Prompt assembled, waiting on the provider round trip.
    Submitted(StoryRequest),
    /// The provider returned story text.
    Success(String),
    /// Something failed; holds the user-facing description.
    Failed(String),
}

/// Invalid transition attempts. Reaching one of these at runtime is a bug in
/// the caller, not a user error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("a story request is already in flight")]
    AlreadyInFlight,
    #[error("no story request is in flight")]
    NotInFlight,
}

impl StoryCycle {
    pub fn new() -> Self {
        StoryCycle::Idle
    }

    /// `Idle -> Submitted`. Assembles and returns the prompt for the request.
    pub fn submit(&mut self, request: StoryRequest) -> Result<String, CycleError> {
        match self {
            StoryCycle::Idle => {
                let prompt = build_prompt(&request);
                *self = StoryCycle::Submitted(request);
                Ok(prompt)
            }
            _ => Err(CycleError::AlreadyInFlight),
        }
    }

    /// `Submitted -> Success`.
    pub fn succeed(&mut self, story: String) -> Result<(), CycleError> {
        match self {
            StoryCycle::Submitted(_) => {
                *self = StoryCycle::Success(story);
                Ok(())
            }
            _ => Err(CycleError::NotInFlight),
        }
    }

    /// `Submitted -> Failed`. Takes the human-readable description that the
    /// form shows, not an internal code.
    pub fn fail(&mut self, message: String) -> Result<(), CycleError> {
        match self {
            StoryCycle::Submitted(_) => {
                *self = StoryCycle::Failed(message);
                Ok(())
            }
            _ => Err(CycleError::NotInFlight),
        }
    }

    /// Return to `Idle` for the next interaction. Valid from any state.
    pub fn reset(&mut self) {
        *self = StoryCycle::Idle;
    }

    /// Whether the cycle reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, StoryCycle::Success(_) | StoryCycle::Failed(_))
    }
}

impl Default for StoryCycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{Genre, StoryLength};

    fn request() -> StoryRequest {
        StoryRequest {
            hints: "dragon".to_string(),
            genre: Genre::Fantasy,
            length: StoryLength::Short,
        }
    }

    #[test]
    fn full_success_cycle() {
        let mut cycle = StoryCycle::new();
        assert_eq!(cycle, StoryCycle::Idle);

        let prompt = cycle.submit(request()).unwrap();
        assert!(prompt.contains("dragon"));
        assert!(matches!(cycle, StoryCycle::Submitted(_)));

        cycle.succeed("Once upon a time...".to_string()).unwrap();
        assert_eq!(cycle, StoryCycle::Success("Once upon a time...".to_string()));
        assert!(cycle.is_finished());

        cycle.reset();
        assert_eq!(cycle, StoryCycle::Idle);
    }

    #[test]
    fn failure_holds_user_facing_message() {
        let mut cycle = StoryCycle::new();
        cycle.submit(request()).unwrap();
        cycle
            .fail("Could not reach the generation service".to_string())
            .unwrap();
        assert_eq!(
            cycle,
            StoryCycle::Failed("Could not reach the generation service".to_string())
        );
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut cycle = StoryCycle::new();
        cycle.submit(request()).unwrap();
        assert_eq!(cycle.submit(request()), Err(CycleError::AlreadyInFlight));

        // Terminal states also refuse a new submission until reset.
        cycle.succeed("story".to_string()).unwrap();
        assert_eq!(cycle.submit(request()), Err(CycleError::AlreadyInFlight));
        cycle.reset();
        assert!(cycle.submit(request()).is_ok());
    }

    #[test]
    fn outcome_requires_submission() {
        let mut cycle = StoryCycle::new();
        assert_eq!(
            cycle.succeed("story".to_string()),
            Err(CycleError::NotInFlight)
        );
        assert_eq!(cycle.fail("boom".to_string()), Err(CycleError::NotInFlight));
    }

    #[test]
    fn config_failure_is_recorded_without_any_submission_outcome() {
        // A missing credential fails the cycle before any provider call: the
        // request is submitted, immediately failed with the config message,
        // and nothing ever produced a story.
        let mut cycle = StoryCycle::new();
        cycle.submit(request()).unwrap();
        cycle
            .fail("secret `api_key` not found in secret store".to_string())
            .unwrap();
        assert!(matches!(cycle, StoryCycle::Failed(_)));
    }
}
