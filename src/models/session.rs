//! Session model.
//!
//! A session is one scheduled occurrence of a subject, taught by a teacher
//! to a division, at a specific day and period.

use serde::{Deserialize, Serialize};

use super::{TimeSlot, Weekday};

/// A scheduled (or proposed) class session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Persistent identifier. `None` for sessions not yet stored.
    pub id: Option<u32>,
    /// Division (class section) attending the session.
    pub division_id: u32,
    /// Teacher giving the session.
    pub teacher_id: u32,
    /// Subject taught.
    pub subject_id: u32,
    /// Subject assignment this session fulfils, if known.
    pub subject_assignment_id: Option<u32>,
    /// Day and period.
    pub slot: TimeSlot,
}

impl Session {
    /// Creates a new unsaved session.
    pub fn new(division_id: u32, teacher_id: u32, subject_id: u32, slot: TimeSlot) -> Self {
        Self {
            id: None,
            division_id,
            teacher_id,
            subject_id,
            subject_assignment_id: None,
            slot,
        }
    }

    /// Sets the persistent identifier.
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Links the session to its subject assignment.
    pub fn with_assignment(mut self, assignment_id: u32) -> Self {
        self.subject_assignment_id = Some(assignment_id);
        self
    }

    /// Day of the week.
    #[inline]
    pub fn day(&self) -> Weekday {
        self.slot.day
    }

    /// 1-based period within the day.
    #[inline]
    pub fn period(&self) -> u32 {
        self.slot.period
    }

    /// Whether both sessions occupy the same day and period.
    #[inline]
    pub fn same_slot(&self, other: &Session) -> bool {
        self.slot == other.slot
    }
}
