//! Subject assignment model.
//!
//! A subject assignment states that a division receives a subject from a
//! specific teacher a fixed number of times per week. It is the unit of
//! demand the timetable builder places.
//!
//! Teacher qualification for the subject is enforced upstream, where
//! assignments are created.

use serde::{Deserialize, Serialize};

use super::{Session, TimeSlot};

/// A weekly teaching requirement for one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAssignment {
    /// Unique assignment identifier.
    pub id: u32,
    /// Division receiving the subject.
    pub division_id: u32,
    /// Subject taught.
    pub subject_id: u32,
    /// Teacher giving the subject.
    pub teacher_id: u32,
    /// Required sessions per week.
    pub weekly_frequency: u32,
    /// Subject display name, used in failure reports.
    #[serde(default)]
    pub subject_name: String,
}

impl SubjectAssignment {
    /// Creates a new assignment.
    pub fn new(
        id: u32,
        division_id: u32,
        subject_id: u32,
        teacher_id: u32,
        weekly_frequency: u32,
    ) -> Self {
        Self {
            id,
            division_id,
            subject_id,
            teacher_id,
            weekly_frequency,
            subject_name: String::new(),
        }
    }

    /// Sets the subject display name.
    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }

    /// Name to report for this subject: the display name, or the subject
    /// id when no name was supplied.
    pub fn display_name(&self) -> String {
        if self.subject_name.is_empty() {
            format!("subject {}", self.subject_id)
        } else {
            self.subject_name.clone()
        }
    }

    /// Proposes a session for this assignment at `slot`.
    pub fn session_at(&self, slot: TimeSlot) -> Session {
        Session::new(self.division_id, self.teacher_id, self.subject_id, slot)
            .with_assignment(self.id)
    }
}
