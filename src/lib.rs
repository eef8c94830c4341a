//! Weekly school timetable construction.
//!
//! Assigns class sessions (subject + teacher + division) to day/period
//! slots without double-booking anyone.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Weekday`, `TimeSlot`, `Session`,
//!   `SubjectAssignment`, `TeacherAvailability`, `StudyDay`, `Timetable`
//! - **`conflict`**: Pure checks of one candidate session against existing
//!   sessions and teacher availability
//! - **`validation`**: Input integrity checks for build requests
//! - **`scheduler`**: Randomized greedy `TimetableBuilder`
//! - **`error`**: Placement and build errors
//!
//! # Scope
//!
//! Persistence, CRUD and presentation belong to the caller. This crate
//! takes the data they load and returns sessions to store, or a
//! structured reason why it could not.
//!
//! # Logging
//!
//! Build progress is emitted through `tracing`; no subscriber is installed.

pub mod conflict;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
