//! Per-day slot assignment: the heart of the scheduler.
//!
//! POLICIES:
//!   Unified       : slots in order; per slot, shuffle the employees who
//!                   are eligible and still under their daily cap, take
//!                   up to `capacity`. Enforces both bounds.
//!   EmployeeQuota : employees in shuffled order; each walks its own
//!                   shuffled eligible slots until the daily cap is met.
//!                   Slot crowding is unbounded.
//!   SlotCapacity  : slots in order; per slot, shuffle eligible
//!                   employees, take up to `capacity`. Daily load is
//!                   unbounded.
//!
//! RULES:
//!   - Allocation never fails. Uncovered slots and idle employees are
//!     reported by the caller, not raised here.
//!   - Every shuffle draws from the day's ScheduleRng and nothing else.
//!   - Worked minutes are written only through assign().

use crate::{
    availability::AvailabilityResolver,
    day::{OccupancyGrid, OperatingDay},
    employee::Employee,
    rng::ScheduleRng,
    types::SlotIndex,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SLOT_CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    #[default]
    Unified,
    EmployeeQuota,
    SlotCapacity,
}

impl AllocationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unified       => "unified",
            Self::EmployeeQuota => "employee_quota",
            Self::SlotCapacity  => "slot_capacity",
        }
    }

    /// Whether this policy bounds the number of employees per slot.
    pub fn caps_slots(&self) -> bool {
        !matches!(self, Self::EmployeeQuota)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Allocator {
    pub policy:            AllocationPolicy,
    pub capacity:          usize,
    pub resolver:          AvailabilityResolver,
    pub enforce_must_work: bool,
}

impl Allocator {
    pub fn new(policy: AllocationPolicy, capacity: usize, resolver: AvailabilityResolver) -> Self {
        Self { policy, capacity, resolver, enforce_must_work: false }
    }

    pub fn with_must_work(mut self, enforce: bool) -> Self {
        self.enforce_must_work = enforce;
        self
    }

    /// Fill one day's grid. `employees` is the roster in row order; their
    /// worked-minute cells for `day` are updated as slots are assigned.
    pub fn allocate_day(
        &self,
        day: &OperatingDay,
        employees: &mut [Employee],
        rng: &mut ScheduleRng,
    ) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(employees.len(), day.slot_count());

        if self.enforce_must_work {
            self.force_must_work(day, employees, &mut grid);
        }

        match self.policy {
            AllocationPolicy::Unified       => self.fill_by_slot(day, employees, &mut grid, rng, true),
            AllocationPolicy::SlotCapacity  => self.fill_by_slot(day, employees, &mut grid, rng, false),
            AllocationPolicy::EmployeeQuota => self.fill_by_employee(day, employees, &mut grid, rng),
        }
        grid
    }

    /// Assign must-work slots up front, skipping any that would break a
    /// hard bound. Skipped slots surface later as unmet must-work.
    fn force_must_work(&self, day: &OperatingDay, employees: &mut [Employee], grid: &mut OccupancyGrid) {
        for row in 0..employees.len() {
            let Some(window) = employees[row].must_work(day.index).copied() else {
                continue;
            };
            for slot in day.slots() {
                let (start, end) = day.slot_window(slot);
                if !window.contains(start, end) {
                    continue;
                }
                let employee = &employees[row];
                let slot_full = self.policy.caps_slots() && grid.headcount(slot) >= self.capacity;
                if slot_full
                    || !self.resolver.is_eligible(employee, day, slot)
                    || !employee.has_room_for(day.index, day.granularity_minutes)
                {
                    continue;
                }
                assign(grid, employees, row, day, slot);
            }
        }
    }

    fn fill_by_slot(
        &self,
        day: &OperatingDay,
        employees: &mut [Employee],
        grid: &mut OccupancyGrid,
        rng: &mut ScheduleRng,
        respect_daily_cap: bool,
    ) {
        for slot in day.slots() {
            let open = self.capacity.saturating_sub(grid.headcount(slot));
            if open == 0 {
                continue;
            }
            let mut candidates: Vec<usize> = (0..employees.len())
                .filter(|&row| {
                    let employee = &employees[row];
                    !grid.is_assigned(row, slot)
                        && self.resolver.is_eligible(employee, day, slot)
                        && (!respect_daily_cap
                            || employee.has_room_for(day.index, day.granularity_minutes))
                })
                .collect();
            rng.shuffle(&mut candidates);
            for &row in candidates.iter().take(open) {
                assign(grid, employees, row, day, slot);
            }
        }
    }

    fn fill_by_employee(
        &self,
        day: &OperatingDay,
        employees: &mut [Employee],
        grid: &mut OccupancyGrid,
        rng: &mut ScheduleRng,
    ) {
        let mut order: Vec<usize> = (0..employees.len()).collect();
        rng.shuffle(&mut order);

        for row in order {
            let mut slots: Vec<SlotIndex> = self
                .resolver
                .eligible_slots(&employees[row], day)
                .into_iter()
                .filter(|&slot| !grid.is_assigned(row, slot))
                .collect();
            rng.shuffle(&mut slots);

            let cap = employees[row].max_daily_minutes;
            let mut running = employees[row].worked_minutes(day.index);
            for slot in slots {
                if running >= cap {
                    break;
                }
                assign(grid, employees, row, day, slot);
                running += day.granularity_minutes;
            }
        }
    }
}

fn assign(
    grid: &mut OccupancyGrid,
    employees: &mut [Employee],
    row: usize,
    day: &OperatingDay,
    slot: SlotIndex,
) {
    let (start, end) = day.slot_window(slot);
    grid.assign(row, slot);
    employees[row].record_work(day.index, start, end);
}
