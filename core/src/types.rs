//! Shared primitive types used across the scheduler.

use serde::{Deserialize, Serialize};

/// Minutes since midnight, or a duration in minutes.
pub type Minute = u32;

/// Position of an operating day within the week, starting at 0.
pub type DayIndex = usize;

/// Position of a slot within an operating day, starting at 0.
pub type SlotIndex = usize;

/// A stable, unique identifier for an employee within a roster.
pub type EmployeeId = String;

pub const MINUTES_PER_DAY: Minute = 24 * 60;

/// A half-open minute window `[start_minute, end_minute)` on one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interval {
    pub day:          DayIndex,
    pub start_minute: Minute,
    pub end_minute:   Minute,
}

impl Interval {
    pub fn new(day: DayIndex, start_minute: Minute, end_minute: Minute) -> Self {
        Self { day, start_minute, end_minute }
    }

    pub fn length(&self) -> Minute {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// True when `[start, end)` lies entirely inside this window.
    pub fn contains(&self, start: Minute, end: Minute) -> bool {
        start >= self.start_minute && end <= self.end_minute
    }

    /// True when `[start, end)` shares at least one minute with this window.
    pub fn overlaps(&self, start: Minute, end: Minute) -> bool {
        start < self.end_minute && end > self.start_minute
    }
}
