//! Error types.
//!
//! Conflicts found while checking a single candidate are ordinary values
//! ([`ConflictCheck`](crate::conflict::ConflictCheck)); they only become a
//! [`ConflictError`] when a caller asks for a `Result`, or a
//! [`PlacementError`] when editing a timetable. A failed build is reported
//! as a [`BuildError`] and is terminal for that build.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conflict::ConflictKind;
use crate::validation::ValidationError;

/// A rejected manual placement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConflictError {
    /// Conflict category.
    pub kind: ConflictKind,
    /// Human-readable description.
    pub message: String,
}

/// A rejected change to an existing timetable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// No session with this ID exists.
    #[error("session {0} not found")]
    NotFound(u32),
    /// The change would break a timetable rule.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// Why the builder stopped trying to place a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionCause {
    /// No candidate slots were left in the pool.
    SlotPoolEmpty,
    /// The per-assignment attempt cap was reached.
    AttemptLimit,
}

/// Failure of a timetable build.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    /// The request failed structural validation.
    #[error("invalid timetable request: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Not every required session of a subject could be placed.
    #[error(
        "could not schedule all sessions of {subject_name} due to conflicts ({scheduled} of {required} placed, {})",
        cause_text(.cause)
    )]
    SchedulingExhausted {
        /// Subject that could not be fully placed.
        subject_id: u32,
        /// Subject display name.
        subject_name: String,
        /// Sessions placed before giving up.
        scheduled: u32,
        /// Sessions required per week.
        required: u32,
        /// What ran out.
        cause: ExhaustionCause,
    },
}

impl BuildError {
    /// Name of the subject that could not be scheduled, if that is the
    /// failure.
    pub fn subject_name(&self) -> Option<&str> {
        match self {
            BuildError::SchedulingExhausted { subject_name, .. } => Some(subject_name),
            BuildError::InvalidInput(_) => None,
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn cause_text(cause: &ExhaustionCause) -> &'static str {
    match cause {
        ExhaustionCause::SlotPoolEmpty => "no free slots left",
        ExhaustionCause::AttemptLimit => "attempt limit reached",
    }
}
