//! Builder configuration.
//!
//! All fields have defaults, so a partial (or empty) document deserializes
//! into a usable config.

use serde::{Deserialize, Serialize};

/// How candidate slots are drawn across a division's assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPoolStrategy {
    /// One shuffled pool for the whole division, consumed destructively.
    /// Rejected slots are gone for every later assignment too.
    #[default]
    Shared,
    /// A fresh shuffled pool per assignment, holding every slot the
    /// division has not filled yet.
    PerAssignment,
}

/// Timetable builder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Periods per day when the request does not specify one.
    pub max_sessions_per_day: u32,
    /// Slot draws allowed per subject assignment.
    pub max_attempts: u32,
    /// Slot pool policy.
    pub pool_strategy: SlotPoolStrategy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_sessions_per_day: 8,
            max_attempts: 100,
            pool_strategy: SlotPoolStrategy::Shared,
        }
    }
}

impl BuilderConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default periods per day.
    pub fn with_max_sessions_per_day(mut self, max: u32) -> Self {
        self.max_sessions_per_day = max;
        self
    }

    /// Sets the per-assignment attempt cap.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the slot pool policy.
    pub fn with_pool_strategy(mut self, strategy: SlotPoolStrategy) -> Self {
        self.pool_strategy = strategy;
        self
    }
}
