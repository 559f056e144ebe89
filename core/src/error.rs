use crate::types::{DayIndex, EmployeeId, Minute};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Day '{label}' has close {close_minute} not after open {open_minute}")]
    InvalidDayProfile {
        label:        String,
        open_minute:  Minute,
        close_minute: Minute,
    },

    #[error("Slot granularity must be > 0 minutes, got {minutes}")]
    InvalidGranularity { minutes: Minute },

    #[error("Day '{label}' has no whole slot at the configured granularity")]
    EmptyDay { label: String },

    #[error("Slot capacity must be > 0")]
    InvalidCapacity,

    #[error("Roster has no employees")]
    EmptyRoster,

    #[error("Week has no operating days")]
    EmptyWeek,

    #[error("Duplicate employee id '{id}'")]
    DuplicateEmployee { id: EmployeeId },

    #[error("Constraint for '{employee}' on day {day} ({start_minute}..{end_minute}) rejected: {reason}")]
    ConstraintOutOfRange {
        employee:     EmployeeId,
        day:          DayIndex,
        start_minute: Minute,
        end_minute:   Minute,
        reason:       &'static str,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
