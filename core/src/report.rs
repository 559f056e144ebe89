//! Structured schedule results and the reporting seam.
//!
//! RULE: The engine hands finished days to a ScheduleSink and never
//! formats or writes anything itself. Diagnostics are informational;
//! nothing in here can fail a run.

use crate::{
    allocation::AllocationPolicy,
    day::{DayProfile, OccupancyGrid, OperatingDay},
    employee::Employee,
    types::{DayIndex, EmployeeId, Minute, SlotIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotGap {
    pub employee: EmployeeId,
    pub slot:     SlotIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortBlock {
    pub employee:   EmployeeId,
    pub start_slot: SlotIndex,
    pub minutes:    Minute,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayDiagnostics {
    /// Slots nobody works.
    pub uncovered_slots: Vec<SlotIndex>,
    /// Must-work slots left unassigned.
    pub unmet_must_work: Vec<SlotGap>,
    /// Contiguous runs shorter than the employee's minimum block.
    pub short_blocks:    Vec<ShortBlock>,
}

impl DayDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.uncovered_slots.is_empty()
            && self.unmet_must_work.is_empty()
            && self.short_blocks.is_empty()
    }
}

/// One finished operating day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    pub day_index:           DayIndex,
    pub label:               String,
    pub profile:             DayProfile,
    pub open_minute:         Minute,
    pub close_minute:        Minute,
    pub granularity_minutes: Minute,
    /// `HHhMM` start time of each slot.
    pub slot_labels:         Vec<String>,
    /// Column order of the report and row order of `occupancy`.
    pub employee_ids:        Vec<EmployeeId>,
    pub occupancy:           OccupancyGrid,
    pub worked_minutes:      Vec<Minute>,
    pub diagnostics:         DayDiagnostics,
}

impl DaySchedule {
    pub fn from_allocation(day: &OperatingDay, employees: &[Employee], occupancy: OccupancyGrid) -> Self {
        let diagnostics = diagnose(day, employees, &occupancy);
        Self {
            day_index: day.index,
            label: day.label.clone(),
            profile: day.profile,
            open_minute: day.open_minute,
            close_minute: day.close_minute,
            granularity_minutes: day.granularity_minutes,
            slot_labels: day.slots().map(|slot| day.slot_label(slot)).collect(),
            employee_ids: employees.iter().map(|e| e.id.clone()).collect(),
            worked_minutes: employees.iter().map(|e| e.worked_minutes(day.index)).collect(),
            occupancy,
            diagnostics,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.occupancy.slot_count()
    }

    pub fn time_labels(&self) -> &[String] {
        &self.slot_labels
    }

    /// Per-employee worked time as (id, hours, minutes).
    pub fn summary(&self) -> Vec<(&str, Minute, Minute)> {
        self.employee_ids
            .iter()
            .zip(&self.worked_minutes)
            .map(|(id, &m)| (id.as_str(), m / 60, m % 60))
            .collect()
    }

    pub fn worked_minutes_for(&self, employee: &str) -> Option<Minute> {
        let row = self.employee_ids.iter().position(|id| id == employee)?;
        Some(self.worked_minutes[row])
    }

    pub fn row_of(&self, employee: &str) -> Option<usize> {
        self.employee_ids.iter().position(|id| id == employee)
    }
}

fn diagnose(day: &OperatingDay, employees: &[Employee], grid: &OccupancyGrid) -> DayDiagnostics {
    let uncovered_slots = day.slots().filter(|&slot| grid.headcount(slot) == 0).collect();

    let mut unmet_must_work = Vec::new();
    let mut short_blocks = Vec::new();
    for (row, employee) in employees.iter().enumerate() {
        if let Some(window) = employee.must_work(day.index) {
            for slot in day.slots() {
                let (start, end) = day.slot_window(slot);
                if window.contains(start, end) && !grid.is_assigned(row, slot) {
                    unmet_must_work.push(SlotGap { employee: employee.id.clone(), slot });
                }
            }
        }
        for (start_slot, len) in grid.blocks(row) {
            let minutes = len as Minute * day.granularity_minutes;
            if minutes < employee.min_consecutive_minutes {
                short_blocks.push(ShortBlock { employee: employee.id.clone(), start_slot, minutes });
            }
        }
    }

    DayDiagnostics { uncovered_slots, unmet_must_work, short_blocks }
}

/// Worked time over the whole run against the contracted target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyTotal {
    pub employee:                EmployeeId,
    pub worked_minutes:          Minute,
    pub weekly_contract_minutes: Minute,
    /// worked − contract; negative means under target.
    pub contract_delta_minutes:  i64,
}

impl WeeklyTotal {
    pub fn from_employee(employee: &Employee) -> Self {
        let worked = employee.weekly_worked_minutes();
        Self {
            employee: employee.id.clone(),
            worked_minutes: worked,
            weekly_contract_minutes: employee.weekly_contract_minutes,
            contract_delta_minutes: i64::from(worked) - i64::from(employee.weekly_contract_minutes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekSchedule {
    pub seed:          u64,
    pub policy:        AllocationPolicy,
    pub days:          Vec<DaySchedule>,
    pub weekly_totals: Vec<WeeklyTotal>,
}

impl WeekSchedule {
    pub fn uncovered_slot_count(&self) -> usize {
        self.days.iter().map(|d| d.diagnostics.uncovered_slots.len()).sum()
    }
}

/// Receives each day as soon as it is allocated.
pub trait ScheduleSink {
    fn day_completed(&mut self, day: &DaySchedule) -> anyhow::Result<()>;
}
