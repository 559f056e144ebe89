//! Shared builders for integration tests.

#![allow(dead_code)]

use shiftplan_core::{
    allocation::AllocationPolicy,
    availability::OffWindowRule,
    config::{DaySpec, EmployeeSpec, ScheduleConfig},
    day::DayProfile,
    types::{Interval, Minute},
};

pub fn employee(id: &str, max_daily_minutes: Minute) -> EmployeeSpec {
    EmployeeSpec {
        id: id.into(),
        weekly_contract_minutes: 35 * 60,
        is_manager: false,
        max_daily_minutes,
        min_consecutive_minutes: 0,
        must_work: Vec::new(),
        must_be_off: Vec::new(),
    }
}

pub fn window(open_minute: Minute, close_minute: Minute) -> DaySpec {
    DaySpec {
        profile: DayProfile::Custom { open_minute, close_minute },
        label: format!("{open_minute}-{close_minute}"),
    }
}

pub fn config(
    employees: Vec<EmployeeSpec>,
    days: Vec<DaySpec>,
    slot_capacity: usize,
    policy: AllocationPolicy,
) -> ScheduleConfig {
    ScheduleConfig {
        employees,
        days,
        slot_granularity_minutes: 30,
        slot_capacity,
        policy,
        off_window_rule: OffWindowRule::Containment,
        enforce_must_work: false,
    }
}

/// The reference roster: seven staff over a six-day week.
pub fn shop_week(policy: AllocationPolicy) -> ScheduleConfig {
    let mut a = employee("A", 8 * 60 + 30);
    a.is_manager = true;
    a.weekly_contract_minutes = 39 * 60;
    a.must_work.push(Interval::new(0, 12 * 60 + 30, 15 * 60 + 30));
    a.must_work.push(Interval::new(4, 12 * 60 + 30, 15 * 60 + 30));

    let mut b = employee("B", 8 * 60 + 30);
    b.is_manager = true;
    b.weekly_contract_minutes = 39 * 60;
    b.must_work.push(Interval::new(0, 12 * 60 + 30, 15 * 60 + 30));
    b.must_be_off.push(Interval::new(2, 17 * 60, 20 * 60 + 30));

    let mut g = employee("G", 8 * 60);
    g.weekly_contract_minutes = 15 * 60;
    for day in 0..4 {
        g.must_be_off.push(Interval::new(day, 0, 24 * 60));
    }

    let standard = |label: &str| DaySpec { profile: DayProfile::Standard, label: label.into() };
    ScheduleConfig {
        employees: vec![
            a,
            b,
            employee("C", 8 * 60),
            employee("D", 8 * 60),
            employee("E", 8 * 60 + 30),
            employee("F", 8 * 60 + 30),
            g,
        ],
        days: vec![
            standard("Mardi"),
            standard("Mercredi"),
            standard("Jeudi"),
            standard("Vendredi"),
            DaySpec { profile: DayProfile::Extended, label: "Samedi".into() },
            DaySpec { profile: DayProfile::HalfDay, label: "Dimanche".into() },
        ],
        slot_granularity_minutes: 30,
        slot_capacity: 4,
        policy,
        off_window_rule: OffWindowRule::Containment,
        enforce_must_work: false,
    }
}
