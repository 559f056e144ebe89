//! Availability resolution: may this employee take this slot?
//!
//! Pure and stateless apart from the configured off-window rule. Every
//! allocation policy asks here, so constraint logic lives in one place.

use crate::{
    day::OperatingDay,
    employee::Employee,
    types::SlotIndex,
};
use serde::{Deserialize, Serialize};

/// How a slot is tested against a must-be-off window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OffWindowRule {
    /// Reject only slots lying entirely inside the off-window.
    #[default]
    Containment,
    /// Reject any slot sharing a minute with the off-window.
    Overlap,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityResolver {
    pub rule: OffWindowRule,
}

impl AvailabilityResolver {
    pub fn new(rule: OffWindowRule) -> Self {
        Self { rule }
    }

    pub fn is_eligible(&self, employee: &Employee, day: &OperatingDay, slot: SlotIndex) -> bool {
        let (start, end) = day.slot_window(slot);
        match self.rule {
            OffWindowRule::Containment => employee.is_available(day.index, start, end),
            OffWindowRule::Overlap => employee
                .must_be_off(day.index)
                .is_none_or(|off| !off.overlaps(start, end)),
        }
    }

    /// Slots of `day` this employee may take, in chronological order.
    pub fn eligible_slots(&self, employee: &Employee, day: &OperatingDay) -> Vec<SlotIndex> {
        day.slots()
            .filter(|&slot| self.is_eligible(employee, day, slot))
            .collect()
    }
}
