//! Teacher availability model.
//!
//! Availability is positive-only: a record lists the slots in which a
//! teacher may teach. A teacher without any record is treated as always
//! available.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{TimeSlot, Weekday};

/// Slots in which a teacher can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAvailability {
    /// Teacher this record applies to.
    pub teacher_id: u32,
    /// Available (day, period) slots.
    pub available: BTreeSet<TimeSlot>,
}

impl TeacherAvailability {
    /// Creates a record with no available slots.
    ///
    /// Note that an empty record means "never available", unlike a missing
    /// record.
    pub fn new(teacher_id: u32) -> Self {
        Self {
            teacher_id,
            available: BTreeSet::new(),
        }
    }

    /// Adds one available slot.
    pub fn with_slot(mut self, day: Weekday, period: u32) -> Self {
        self.available.insert(TimeSlot::new(day, period));
        self
    }

    /// Marks periods `1..=periods` of `day` as available.
    pub fn with_day(mut self, day: Weekday, periods: u32) -> Self {
        self.available
            .extend((1..=periods).map(|period| TimeSlot::new(day, period)));
        self
    }

    /// Whether the teacher can teach in `slot`.
    #[inline]
    pub fn is_available(&self, slot: &TimeSlot) -> bool {
        self.available.contains(slot)
    }
}
