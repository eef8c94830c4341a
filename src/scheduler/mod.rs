//! Timetable construction.
//!
//! Provides a randomized greedy builder that fills one division's week
//! from its subject assignments.
//!
//! # Algorithm
//!
//! `TimetableBuilder` shuffles the day × period grid, then draws slots for
//! each assignment in turn and keeps every draw that passes the conflict
//! checks. It does not backtrack and does not optimize; a build either
//! places every required session or fails naming the subject it could not
//! finish.
//!
//! # Randomness
//!
//! The RNG is supplied by the caller. Seeded generators give reproducible
//! timetables.

mod builder;
mod config;

pub use builder::{BuildRequest, TimetableBuilder};
pub use config::{BuilderConfig, SlotPoolStrategy};
