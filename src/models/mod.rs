//! Timetable domain models.
//!
//! Provides the core data types for weekly school timetables: the slot
//! grid, sessions, the weekly demand that produces them, and the
//! availability data that constrains them.
//!
//! # Domain Mappings
//!
//! | u-timetable | School term |
//! |-------------|-------------|
//! | Division | Class section (e.g. Grade 7-B) |
//! | SubjectAssignment | "Section X takes subject Y with teacher Z, n times a week" |
//! | TimeSlot | Day + period |
//! | Session | One lesson on the timetable |
//! | StudyDay | A teaching day of the week |

mod assignment;
mod availability;
mod session;
mod slot;
mod study_day;
mod timetable;

pub use assignment::SubjectAssignment;
pub use availability::TeacherAvailability;
pub use session::Session;
pub use slot::{ParseWeekdayError, TimeSlot, Weekday};
pub use study_day::{active_days_ordered, slot_space, StudyDay};
pub use timetable::Timetable;
