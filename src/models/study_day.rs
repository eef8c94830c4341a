//! Study day model.
//!
//! Study days define which weekdays carry lessons, in which order they are
//! presented, and optionally how many periods each day holds.
//!
//! # Slot Space
//! The candidate slots for a build are every active day crossed with
//! periods `1..=n`, where `n` is the day's own `sessions_count` capped by
//! the build-wide maximum periods per day.

use serde::{Deserialize, Serialize};

use super::{TimeSlot, Weekday};

/// A configured study day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDay {
    /// Weekday.
    pub day: Weekday,
    /// Position in the week as presented (ascending).
    pub order: u32,
    /// Inactive days are never scheduled.
    pub is_active: bool,
    /// Periods on this day. `None` = use the build-wide maximum.
    pub sessions_count: Option<u32>,
}

impl StudyDay {
    /// Creates an active study day.
    pub fn new(day: Weekday, order: u32) -> Self {
        Self {
            day,
            order,
            is_active: true,
            sessions_count: None,
        }
    }

    /// Sets the number of periods on this day.
    pub fn with_sessions_count(mut self, count: u32) -> Self {
        self.sessions_count = Some(count);
        self
    }

    /// Marks the day inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Number of periods on this day under a build-wide `max_per_day`.
    pub fn period_count(&self, max_per_day: u32) -> u32 {
        self.sessions_count
            .map_or(max_per_day, |count| count.min(max_per_day))
    }

    /// Builds active study days from an ordered day list.
    pub fn from_ordered(days: &[Weekday]) -> Vec<StudyDay> {
        days.iter()
            .zip(0u32..)
            .map(|(&day, order)| StudyDay::new(day, order))
            .collect()
    }
}

/// Returns active days sorted by `order`.
pub fn active_days_ordered(days: &[StudyDay]) -> Vec<Weekday> {
    active_sorted(days).into_iter().map(|d| d.day).collect()
}

/// Enumerates every bookable slot: active days (in order) × periods.
///
/// # Complexity
/// O(d × p) where d=active days, p=periods per day.
pub fn slot_space(days: &[StudyDay], max_per_day: u32) -> Vec<TimeSlot> {
    active_sorted(days)
        .into_iter()
        .flat_map(|d| (1..=d.period_count(max_per_day)).map(move |p| TimeSlot::new(d.day, p)))
        .collect()
}

fn active_sorted(days: &[StudyDay]) -> Vec<&StudyDay> {
    let mut active: Vec<&StudyDay> = days.iter().filter(|d| d.is_active).collect();
    // Stable: equal orders keep their input order
    active.sort_by_key(|d| d.order);
    active
}
