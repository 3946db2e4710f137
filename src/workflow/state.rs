//! Workflow state machine
//!
//! An explicit enumerated state plus a transition-guard table. Each stage
//! entry applies its transition through [`WorkflowState::apply`], which
//! rejects any transition attempted from a disallowed source state. Such a
//! rejection is a programming error in the stage sequence, never a business
//! failure of the message being processed.

use crate::domain::{GatewayError, Result};
use std::fmt;

/// Processing states of a workflow instance
///
/// There is no explicit terminal success state; a successful run simply
/// stops after `Sync`. `Error` is terminal for failure paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Parse,
    Validate,
    Transform,
    Persist,
    Transmit,
    Sync,
    Error,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Parse => "parse",
            WorkflowState::Validate => "validate",
            WorkflowState::Transform => "transform",
            WorkflowState::Persist => "persist",
            WorkflowState::Transmit => "transmit",
            WorkflowState::Sync => "sync",
            WorkflowState::Error => "error",
        }
    }

    /// Apply a transition, returning the target state
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] if `self` is not a
    /// permitted source state for the transition.
    pub fn apply(self, transition: Transition) -> Result<WorkflowState> {
        if transition.sources().contains(&self) {
            Ok(transition.target())
        } else {
            Err(GatewayError::InvalidTransition {
                transition: transition.as_str(),
                from: self.as_str(),
            })
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guarded transitions between workflow states, one per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Validate,
    Transform,
    Persist,
    Transmit,
    Sync,
    Error,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Validate => "validate",
            Transition::Transform => "transform",
            Transition::Persist => "persist",
            Transition::Transmit => "transmit",
            Transition::Sync => "sync",
            Transition::Error => "error",
        }
    }

    /// Valid source states for this transition
    pub fn sources(&self) -> &'static [WorkflowState] {
        use WorkflowState::*;
        match self {
            Transition::Validate => &[Parse],
            Transition::Transform => &[Validate],
            Transition::Persist => &[Parse, Validate, Transform],
            Transition::Transmit => &[Persist],
            Transition::Sync => &[Persist, Transmit],
            Transition::Error => &[Parse, Validate, Transform, Persist, Transmit, Sync],
        }
    }

    /// State the workflow enters when this transition fires
    pub fn target(&self) -> WorkflowState {
        match self {
            Transition::Validate => WorkflowState::Validate,
            Transition::Transform => WorkflowState::Transform,
            Transition::Persist => WorkflowState::Persist,
            Transition::Transmit => WorkflowState::Transmit,
            Transition::Sync => WorkflowState::Sync,
            Transition::Error => WorkflowState::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Transition as T, WorkflowState as S};
    use crate::domain::GatewayError;
    use test_case::test_case;

    #[test_case(S::Parse, T::Validate, S::Validate; "parse to validate")]
    #[test_case(S::Validate, T::Transform, S::Transform; "validate to transform")]
    #[test_case(S::Parse, T::Persist, S::Persist; "parse directly to persist")]
    #[test_case(S::Validate, T::Persist, S::Persist; "validate to persist")]
    #[test_case(S::Transform, T::Persist, S::Persist; "transform to persist")]
    #[test_case(S::Persist, T::Transmit, S::Transmit; "persist to transmit")]
    #[test_case(S::Persist, T::Sync, S::Sync; "persist to sync")]
    #[test_case(S::Transmit, T::Sync, S::Sync; "transmit to sync")]
    fn test_permitted_transitions(from: S, transition: T, expected: S) {
        assert_eq!(from.apply(transition).unwrap(), expected);
    }

    #[test_case(S::Parse, T::Transmit; "transmit before persist")]
    #[test_case(S::Parse, T::Sync; "sync before persist")]
    #[test_case(S::Transform, T::Validate; "validate after transform")]
    #[test_case(S::Sync, T::Persist; "persist after sync")]
    #[test_case(S::Error, T::Validate; "no exit from error")]
    #[test_case(S::Error, T::Error; "error is terminal")]
    fn test_rejected_transitions(from: S, transition: T) {
        let result = from.apply(transition);
        assert!(matches!(
            result,
            Err(GatewayError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_error_reachable_from_all_working_states() {
        for state in [S::Parse, S::Validate, S::Transform, S::Persist, S::Transmit, S::Sync] {
            assert_eq!(state.apply(T::Error).unwrap(), S::Error);
        }
    }

    #[test]
    fn test_state_display() {
        assert_eq!(S::Parse.to_string(), "parse");
        assert_eq!(S::Error.to_string(), "error");
    }
}
