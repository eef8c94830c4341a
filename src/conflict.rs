//! Conflict detection for candidate sessions.
//!
//! Evaluates one candidate session against an existing session set and
//! teacher availability records. All checks are pure: no mutation of
//! inputs, no hidden state, same inputs → same verdict.
//!
//! # Checks (in priority order)
//!
//! | Kind | Fails when |
//! |------|-----------|
//! | `teacher` | Teacher already teaches another division in the slot |
//! | `division` | Division already has a session in the slot |
//! | `subject_limit` | Division already has `max_per_week` sessions of the subject |
//! | `teacher_availability` | Slot is outside the teacher's declared availability |
//!
//! [`check_all_conflicts`] reports only the first failing check.
//!
//! # Session Sets
//! Every function takes `sessions` as any cloneable iterator of `&Session`,
//! so both `&[Session]` and a chain of two slices can be checked without
//! allocating.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConflictError;
use crate::models::{Session, TeacherAvailability};

/// Category of a placement conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Teacher double-booked across divisions.
    Teacher,
    /// Division double-booked.
    Division,
    /// Weekly quota for the subject already met.
    SubjectLimit,
    /// Teacher not available in the slot.
    TeacherAvailability,
}

impl ConflictKind {
    /// Wire tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::Teacher => "teacher",
            ConflictKind::Division => "division",
            ConflictKind::SubjectLimit => "subject_limit",
            ConflictKind::TeacherAvailability => "teacher_availability",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`check_all_conflicts`].
///
/// Either no conflict (`kind` and `message` both `None`) or the
/// highest-priority conflict found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheck {
    /// Conflict category, if any.
    pub kind: Option<ConflictKind>,
    /// Human-readable description, if any.
    pub message: Option<String>,
}

impl ConflictCheck {
    /// A passing check.
    pub fn clear() -> Self {
        Self::default()
    }

    /// A failing check.
    pub fn conflict(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            message: Some(message.into()),
        }
    }

    /// Whether a conflict was found.
    #[inline]
    pub fn has_conflict(&self) -> bool {
        self.kind.is_some()
    }

    /// Converts into a `Result`, for callers that propagate with `?`.
    pub fn into_result(self) -> Result<(), ConflictError> {
        match self.kind {
            None => Ok(()),
            Some(kind) => Err(ConflictError {
                kind,
                message: self.message.unwrap_or_else(|| kind.as_str().to_string()),
            }),
        }
    }
}

/// Whether the candidate's teacher already teaches a *different* division
/// in the same slot.
///
/// Same-division duplicates are left to [`has_division_conflict`].
pub fn has_teacher_conflict<'a, I>(sessions: I, candidate: &Session) -> bool
where
    I: IntoIterator<Item = &'a Session>,
{
    sessions.into_iter().any(|s| {
        s.teacher_id == candidate.teacher_id
            && s.same_slot(candidate)
            && s.division_id != candidate.division_id
    })
}

/// Whether the candidate's division already has a session in the same
/// slot, regardless of teacher.
pub fn has_division_conflict<'a, I>(sessions: I, candidate: &Session) -> bool
where
    I: IntoIterator<Item = &'a Session>,
{
    sessions
        .into_iter()
        .any(|s| s.division_id == candidate.division_id && s.same_slot(candidate))
}

/// Whether the division already holds `max_per_week` (or more) sessions of
/// the candidate's subject, counted before the candidate is added.
pub fn has_subject_limit_exceeded<'a, I>(
    sessions: I,
    candidate: &Session,
    max_per_week: u32,
) -> bool
where
    I: IntoIterator<Item = &'a Session>,
{
    let count = sessions
        .into_iter()
        .filter(|s| s.subject_id == candidate.subject_id && s.division_id == candidate.division_id)
        .count();
    count >= max_per_week as usize
}

/// Whether the candidate's slot lies outside its teacher's availability.
///
/// Uses the first record for the teacher. A teacher with no record is
/// available everywhere.
pub fn is_teacher_unavailable(candidate: &Session, availability: &[TeacherAvailability]) -> bool {
    match availability
        .iter()
        .find(|a| a.teacher_id == candidate.teacher_id)
    {
        None => false,
        Some(record) => !record.is_available(&candidate.slot),
    }
}

/// Runs every check and returns the first conflict found.
///
/// Priority: teacher > division > subject limit > teacher availability.
///
/// # Example
///
/// ```
/// use u_timetable::conflict::{check_all_conflicts, ConflictKind};
/// use u_timetable::models::{Session, TimeSlot, Weekday};
///
/// let monday_1 = TimeSlot::new(Weekday::Monday, 1);
/// let existing = vec![Session::new(1, 1, 1, monday_1)];
///
/// // Same teacher, other division, same slot
/// let candidate = Session::new(2, 1, 3, monday_1);
/// let check = check_all_conflicts(&existing, &candidate, 5, &[]);
/// assert_eq!(check.kind, Some(ConflictKind::Teacher));
/// ```
pub fn check_all_conflicts<'a, I>(
    sessions: I,
    candidate: &Session,
    max_per_week: u32,
    availability: &[TeacherAvailability],
) -> ConflictCheck
where
    I: IntoIterator<Item = &'a Session>,
    I::IntoIter: Clone,
{
    let sessions = sessions.into_iter();

    if has_teacher_conflict(sessions.clone(), candidate) {
        return ConflictCheck::conflict(
            ConflictKind::Teacher,
            "Teacher is already booked in another division at this time",
        );
    }

    if has_division_conflict(sessions.clone(), candidate) {
        return ConflictCheck::conflict(
            ConflictKind::Division,
            "Division already has another session at this time",
        );
    }

    if has_subject_limit_exceeded(sessions, candidate, max_per_week) {
        return ConflictCheck::conflict(
            ConflictKind::SubjectLimit,
            format!("Weekly limit for this subject reached ({max_per_week} sessions per week)"),
        );
    }

    if is_teacher_unavailable(candidate, availability) {
        return ConflictCheck::conflict(
            ConflictKind::TeacherAvailability,
            "Teacher is not available at this time",
        );
    }

    ConflictCheck::clear()
}
