//! Operating days and their slot grid.

use crate::{
    error::{ScheduleError, ScheduleResult},
    types::{DayIndex, Minute, SlotIndex, MINUTES_PER_DAY},
};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub const DEFAULT_SLOT_MINUTES: Minute = 30;

/// Closed set of day shapes. Each maps to a fixed opening window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayProfile {
    /// 08:00–20:30
    Standard,
    /// 07:30–20:30
    Extended,
    /// 08:00–14:00
    HalfDay,
    Custom {
        open_minute:  Minute,
        close_minute: Minute,
    },
}

impl DayProfile {
    /// (open_minute, close_minute) for this profile.
    pub fn window(&self) -> (Minute, Minute) {
        match *self {
            Self::Standard => (8 * 60, 20 * 60 + 30),
            Self::Extended => (7 * 60 + 30, 20 * 60 + 30),
            Self::HalfDay  => (8 * 60, 14 * 60),
            Self::Custom { open_minute, close_minute } => (open_minute, close_minute),
        }
    }
}

/// One day's opening window, cut into fixed-length slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperatingDay {
    pub index:               DayIndex,
    pub label:               String,
    pub profile:             DayProfile,
    pub open_minute:         Minute,
    pub close_minute:        Minute,
    pub granularity_minutes: Minute,
}

impl OperatingDay {
    pub fn new(
        index: DayIndex,
        label: impl Into<String>,
        profile: DayProfile,
        granularity_minutes: Minute,
    ) -> ScheduleResult<Self> {
        let label = label.into();
        if granularity_minutes == 0 {
            return Err(ScheduleError::InvalidGranularity { minutes: granularity_minutes });
        }
        let (open_minute, close_minute) = profile.window();
        if close_minute <= open_minute || close_minute > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidDayProfile { label, open_minute, close_minute });
        }
        let day = Self { index, label, profile, open_minute, close_minute, granularity_minutes };
        if day.slot_count() == 0 {
            return Err(ScheduleError::EmptyDay { label: day.label });
        }
        let remainder = (close_minute - open_minute) % granularity_minutes;
        if remainder != 0 {
            log::warn!(
                "day '{}': last {remainder} minutes do not fill a {granularity_minutes}-minute slot and are not scheduled",
                day.label
            );
        }
        Ok(day)
    }

    pub fn slot_count(&self) -> usize {
        ((self.close_minute - self.open_minute) / self.granularity_minutes) as usize
    }

    /// Slot indices in chronological order. Each call starts a fresh pass.
    pub fn slots(&self) -> Range<SlotIndex> {
        0..self.slot_count()
    }

    /// `[start, end)` minutes covered by `slot`.
    pub fn slot_window(&self, slot: SlotIndex) -> (Minute, Minute) {
        let start = self.open_minute + slot as Minute * self.granularity_minutes;
        (start, start + self.granularity_minutes)
    }

    /// Start of `slot` as (hour, minute).
    pub fn slot_to_clock_time(&self, slot: SlotIndex) -> (u32, u32) {
        let (start, _) = self.slot_window(slot);
        (start / 60, start % 60)
    }

    pub fn slot_time(&self, slot: SlotIndex) -> Option<NaiveTime> {
        let (hour, minute) = self.slot_to_clock_time(slot);
        NaiveTime::from_hms_opt(hour, minute, 0)
    }

    /// `HHhMM` label for the start of `slot`.
    pub fn slot_label(&self, slot: SlotIndex) -> String {
        match self.slot_time(slot) {
            Some(t) => format!("{:02}h{:02}", t.hour(), t.minute()),
            None => {
                let (hour, minute) = self.slot_to_clock_time(slot);
                format!("{hour:02}h{minute:02}")
            }
        }
    }
}

/// Employee-row × slot-column assignment flags for one day.
/// Row order is the roster order and never changes during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OccupancyGrid {
    slot_count: usize,
    rows:       Vec<Vec<bool>>,
}

impl OccupancyGrid {
    pub fn new(employee_count: usize, slot_count: usize) -> Self {
        Self {
            slot_count,
            rows: vec![vec![false; slot_count]; employee_count],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn assign(&mut self, row: usize, slot: SlotIndex) {
        self.rows[row][slot] = true;
    }

    pub fn is_assigned(&self, row: usize, slot: SlotIndex) -> bool {
        self.rows[row][slot]
    }

    /// Number of employees working `slot`.
    pub fn headcount(&self, slot: SlotIndex) -> usize {
        self.rows.iter().filter(|r| r[slot]).count()
    }

    pub fn assigned_slots(&self, row: usize) -> impl Iterator<Item = SlotIndex> + '_ {
        self.rows[row]
            .iter()
            .enumerate()
            .filter_map(|(slot, &on)| on.then_some(slot))
    }

    /// Maximal runs of consecutive assigned slots as (start slot, length).
    pub fn blocks(&self, row: usize) -> Vec<(SlotIndex, usize)> {
        let mut blocks = Vec::new();
        let mut current: Option<(SlotIndex, usize)> = None;
        for (slot, &on) in self.rows[row].iter().enumerate() {
            current = match (current, on) {
                (Some((start, len)), true) => Some((start, len + 1)),
                (None, true) => Some((slot, 1)),
                (Some(block), false) => {
                    blocks.push(block);
                    None
                }
                (None, false) => None,
            };
        }
        blocks.extend(current);
        blocks
    }
}
