//! Employee record: contract data, constraints, and per-day worked time.
//!
//! Constraint setters keep one interval per day per kind; a second call
//! for the same day replaces the first. Worked minutes are written only
//! by the allocation pass.

use crate::types::{DayIndex, EmployeeId, Interval, Minute};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id:                      EmployeeId,
    pub weekly_contract_minutes: Minute,
    pub is_manager:              bool,
    pub max_daily_minutes:       Minute,
    /// Recorded for reporting; allocation does not enforce contiguity.
    pub min_consecutive_minutes: Minute,
    must_work:                   BTreeMap<DayIndex, Interval>,
    must_be_off:                 BTreeMap<DayIndex, Interval>,
    daily_worked_minutes:        Vec<Minute>,
}

impl Employee {
    pub fn new(
        id: impl Into<EmployeeId>,
        weekly_contract_minutes: Minute,
        is_manager: bool,
        max_daily_minutes: Minute,
        min_consecutive_minutes: Minute,
    ) -> Self {
        Self {
            id: id.into(),
            weekly_contract_minutes,
            is_manager,
            max_daily_minutes,
            min_consecutive_minutes,
            must_work: BTreeMap::new(),
            must_be_off: BTreeMap::new(),
            daily_worked_minutes: Vec::new(),
        }
    }

    /// False iff `[start, end)` lies entirely inside the must-be-off
    /// window recorded for `day`. A window that only partially overlaps
    /// the off-window is accepted.
    pub fn is_available(&self, day: DayIndex, start_minute: Minute, end_minute: Minute) -> bool {
        match self.must_be_off.get(&day) {
            Some(off) => !off.contains(start_minute, end_minute),
            None => true,
        }
    }

    /// Add the interval length to the day's worked minutes.
    /// No cap check here; the caller decides whether the work fits.
    pub fn record_work(&mut self, day: DayIndex, start_minute: Minute, end_minute: Minute) {
        if self.daily_worked_minutes.len() <= day {
            self.daily_worked_minutes.resize(day + 1, 0);
        }
        self.daily_worked_minutes[day] += end_minute.saturating_sub(start_minute);
    }

    pub fn add_must_work_constraint(&mut self, day: DayIndex, start_minute: Minute, end_minute: Minute) {
        self.must_work.insert(day, Interval::new(day, start_minute, end_minute));
    }

    pub fn add_must_be_off_constraint(&mut self, day: DayIndex, start_minute: Minute, end_minute: Minute) {
        self.must_be_off.insert(day, Interval::new(day, start_minute, end_minute));
    }

    pub fn must_work(&self, day: DayIndex) -> Option<&Interval> {
        self.must_work.get(&day)
    }

    pub fn must_be_off(&self, day: DayIndex) -> Option<&Interval> {
        self.must_be_off.get(&day)
    }

    pub fn worked_minutes(&self, day: DayIndex) -> Minute {
        self.daily_worked_minutes.get(day).copied().unwrap_or(0)
    }

    pub fn weekly_worked_minutes(&self) -> Minute {
        self.daily_worked_minutes.iter().sum()
    }

    /// True while another `slot_minutes` of work keeps the day within
    /// `max_daily_minutes`.
    pub fn has_room_for(&self, day: DayIndex, slot_minutes: Minute) -> bool {
        self.worked_minutes(day) + slot_minutes <= self.max_daily_minutes
    }

    /// Zero all worked-minute cells for a fresh run of `day_count` days.
    pub fn reset_accumulators(&mut self, day_count: usize) {
        self.daily_worked_minutes.clear();
        self.daily_worked_minutes.resize(day_count, 0);
    }
}
