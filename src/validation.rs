//! Input validation for timetable builds.
//!
//! Checks structural integrity of a build request before any slot is
//! drawn. Detects:
//! - Missing division
//! - Empty assignment or study day lists
//! - Duplicate assignment IDs and duplicate study days
//! - Assignments belonging to another division
//! - Zero weekly frequencies and zero-length days
//!
//! All problems are collected; validation does not stop at the first one.

use std::collections::HashSet;

use crate::scheduler::BuildRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No division was specified.
    MissingDivision,
    /// The division has no subject assignments.
    NoAssignments,
    /// No active study days.
    NoStudyDays,
    /// Two entities share the same ID.
    DuplicateId,
    /// The same weekday is configured twice.
    DuplicateStudyDay,
    /// An assignment belongs to a different division than the request.
    ForeignAssignment,
    /// An assignment requires zero sessions per week.
    ZeroFrequency,
    /// A day (or the build-wide maximum) has no periods.
    InvalidPeriodCount,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a build request.
///
/// `max_sessions_per_day` is the effective periods-per-day bound (the
/// request's own value, or the builder's default).
///
/// Checks:
/// 1. Division ID is non-zero
/// 2. At least one assignment; no duplicate assignment IDs
/// 3. Every assignment targets the request's division with a non-zero frequency
/// 4. At least one active study day; no weekday listed twice
/// 5. Periods per day are non-zero
///
/// Demand larger than the slot space is not an input error: the build runs
/// and fails on the first subject it cannot place.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &BuildRequest, max_sessions_per_day: u32) -> ValidationResult {
    let mut errors = Vec::new();

    if request.division_id == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingDivision,
            "A division must be specified to build a timetable",
        ));
    }

    if request.assignments.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoAssignments,
            format!(
                "No subjects are assigned to division {}",
                request.division_id
            ),
        ));
    }

    let mut assignment_ids = HashSet::new();
    for a in &request.assignments {
        if !assignment_ids.insert(a.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject assignment ID: {}", a.id),
            ));
        }

        if a.division_id != request.division_id {
            errors.push(ValidationError::new(
                ValidationErrorKind::ForeignAssignment,
                format!(
                    "Subject assignment {} belongs to division {}, not {}",
                    a.id, a.division_id, request.division_id
                ),
            ));
        }

        if a.weekly_frequency == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroFrequency,
                format!("Subject assignment {} requires zero sessions per week", a.id),
            ));
        }
    }

    if !request.study_days.iter().any(|d| d.is_active) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoStudyDays,
            "No active study days are defined",
        ));
    }

    let mut days = HashSet::new();
    for d in &request.study_days {
        if !days.insert(d.day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateStudyDay,
                format!("Study day {} is defined more than once", d.day),
            ));
        }

        if d.is_active && d.sessions_count == Some(0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPeriodCount,
                format!("Study day {} has no sessions", d.day),
            ));
        }
    }

    if max_sessions_per_day == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPeriodCount,
            "Maximum sessions per day must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
