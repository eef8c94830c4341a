//! Timetable (solution) model.
//!
//! A timetable is the set of committed sessions across divisions. Besides
//! lookups, it supports checked manual edits: placing one session and
//! moving an existing session to another slot. Both run the full conflict
//! check before mutating.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Session, TeacherAvailability, TimeSlot};
use crate::conflict::check_all_conflicts;
use crate::error::{ConflictError, PlacementError};

/// A set of committed sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Sessions in insertion order.
    pub sessions: Vec<Session>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a session without checking it.
    pub fn add_session(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Appends a session if it passes every conflict check.
    ///
    /// `max_per_week` is the weekly frequency of the session's subject
    /// assignment.
    pub fn place(
        &mut self,
        session: Session,
        max_per_week: u32,
        availability: &[TeacherAvailability],
    ) -> Result<(), ConflictError> {
        check_all_conflicts(&self.sessions, &session, max_per_week, availability)
            .into_result()?;
        self.sessions.push(session);
        Ok(())
    }

    /// Moves the session with `session_id` to `slot`.
    ///
    /// The session is checked against every *other* session, so moving it
    /// onto its own current slot is allowed.
    pub fn move_session(
        &mut self,
        session_id: u32,
        slot: TimeSlot,
        max_per_week: u32,
        availability: &[TeacherAvailability],
    ) -> Result<(), PlacementError> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == Some(session_id))
            .ok_or(PlacementError::NotFound(session_id))?;

        let mut moved = self.sessions[index].clone();
        moved.slot = slot;

        let others = self
            .sessions
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, s)| s);
        check_all_conflicts(others, &moved, max_per_week, availability).into_result()?;

        self.sessions[index] = moved;
        Ok(())
    }

    /// Removes and returns every session of a division.
    pub fn remove_division(&mut self, division_id: u32) -> Vec<Session> {
        let (removed, kept): (Vec<Session>, Vec<Session>) = std::mem::take(&mut self.sessions)
            .into_iter()
            .partition(|s| s.division_id == division_id);
        self.sessions = kept;
        removed
    }

    /// Returns all sessions of a division.
    pub fn sessions_for_division(&self, division_id: u32) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.division_id == division_id)
            .collect()
    }

    /// Returns all sessions given by a teacher.
    pub fn sessions_for_teacher(&self, teacher_id: u32) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.teacher_id == teacher_id)
            .collect()
    }

    /// Returns a division's sessions of one subject.
    pub fn sessions_for_subject(&self, division_id: u32, subject_id: u32) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.division_id == division_id && s.subject_id == subject_id)
            .collect()
    }

    /// Finds a division's session in a slot.
    pub fn session_at(&self, division_id: u32, slot: TimeSlot) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| s.division_id == division_id && s.slot == slot)
    }

    /// Whether no division and no teacher is booked twice in one slot.
    pub fn is_conflict_free(&self) -> bool {
        let mut divisions = HashSet::new();
        let mut teachers = HashSet::new();
        self.sessions.iter().all(|s| {
            divisions.insert((s.division_id, s.slot)) && teachers.insert((s.teacher_id, s.slot))
        })
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Consumes the timetable, returning its sessions.
    pub fn into_sessions(self) -> Vec<Session> {
        self.sessions
    }
}

impl From<Vec<Session>> for Timetable {
    fn from(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }
}
