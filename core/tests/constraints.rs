//! Hard bounds: daily cap, slot capacity, and must-be-off windows.

mod common;

use shiftplan_core::{
    allocation::AllocationPolicy,
    availability::OffWindowRule,
    engine::ScheduleEngine,
    types::Interval,
};

#[test]
fn unified_policy_keeps_every_employee_under_daily_cap() {
    for seed in 0..25u64 {
        let mut engine = ScheduleEngine::new(&common::shop_week(AllocationPolicy::Unified), seed).unwrap();
        let week = engine.run();
        for employee in engine.employees() {
            for day in engine.days() {
                assert!(
                    employee.worked_minutes(day.index) <= employee.max_daily_minutes,
                    "seed {seed}: {} worked {} on {} (cap {})",
                    employee.id,
                    employee.worked_minutes(day.index),
                    day.label,
                    employee.max_daily_minutes
                );
            }
        }
        assert_eq!(week.days.len(), 6);
    }
}

#[test]
fn unified_policy_keeps_every_slot_within_capacity() {
    for seed in 0..25u64 {
        let mut engine = ScheduleEngine::new(&common::shop_week(AllocationPolicy::Unified), seed).unwrap();
        for day in engine.run().days {
            for slot in 0..day.slot_count() {
                assert!(
                    day.occupancy.headcount(slot) <= 4,
                    "seed {seed}: {} slot {slot} has {} staff",
                    day.label,
                    day.occupancy.headcount(slot)
                );
            }
        }
    }
}

#[test]
fn worked_minutes_match_assigned_slots() {
    let mut engine = ScheduleEngine::new(&common::shop_week(AllocationPolicy::Unified), 11).unwrap();
    for day in engine.run().days {
        for row in 0..day.employee_ids.len() {
            let slots = day.occupancy.assigned_slots(row).count() as u32;
            assert_eq!(day.worked_minutes[row], slots * day.granularity_minutes);
        }
    }
}

#[test]
fn off_window_slots_are_never_assigned() {
    for policy in [
        AllocationPolicy::Unified,
        AllocationPolicy::EmployeeQuota,
        AllocationPolicy::SlotCapacity,
    ] {
        for seed in 0..25u64 {
            let mut engine = ScheduleEngine::new(&common::shop_week(policy), seed).unwrap();
            let week = engine.run();

            // B is off Wednesday from 17:00 to close.
            let wednesday = &week.days[2];
            let b = wednesday.row_of("B").unwrap();
            for slot in wednesday.occupancy.assigned_slots(b) {
                let start = wednesday.open_minute + slot as u32 * 30;
                assert!(start < 17 * 60, "{policy:?} seed {seed}: B assigned at {start}");
            }

            // G is off all of Tuesday to Friday.
            let g = week.days[0].row_of("G").unwrap();
            for day in &week.days[..4] {
                assert_eq!(day.occupancy.assigned_slots(g).count(), 0);
                assert_eq!(day.worked_minutes[g], 0);
            }
        }
    }
}

#[test]
fn partial_overlap_with_off_window_is_allowed_under_containment() {
    // 08:00–09:00; off 08:15–09:00. Slot 08:00 straddles, slot 08:30 is inside.
    let mut a = common::employee("A", 10 * 60);
    a.must_be_off.push(Interval::new(0, 8 * 60 + 15, 9 * 60));
    let config = common::config(vec![a], vec![common::window(8 * 60, 9 * 60)], 1, AllocationPolicy::Unified);

    for seed in 0..10u64 {
        let week = ScheduleEngine::new(&config, seed).unwrap().run();
        let day = &week.days[0];
        assert!(day.occupancy.is_assigned(0, 0), "straddling slot should be assignable");
        assert!(!day.occupancy.is_assigned(0, 1), "contained slot must stay free");
        assert_eq!(day.worked_minutes[0], 30);
    }
}

#[test]
fn overlap_rule_rejects_straddling_slot() {
    let mut a = common::employee("A", 10 * 60);
    a.must_be_off.push(Interval::new(0, 8 * 60 + 15, 9 * 60));
    let mut config = common::config(vec![a], vec![common::window(8 * 60, 9 * 60)], 1, AllocationPolicy::Unified);
    config.off_window_rule = OffWindowRule::Overlap;

    let week = ScheduleEngine::new(&config, 3).unwrap().run();
    assert_eq!(week.days[0].worked_minutes[0], 0);
}

#[test]
fn second_off_constraint_for_a_day_replaces_the_first() {
    let mut a = common::employee("A", 10 * 60);
    a.must_be_off.push(Interval::new(0, 8 * 60, 8 * 60 + 30));
    a.must_be_off.push(Interval::new(0, 8 * 60 + 30, 9 * 60));
    let config = common::config(vec![a], vec![common::window(8 * 60, 9 * 60)], 1, AllocationPolicy::Unified);

    for seed in 0..10u64 {
        let week = ScheduleEngine::new(&config, seed).unwrap().run();
        let day = &week.days[0];
        assert!(day.occupancy.is_assigned(0, 0), "first range must no longer apply");
        assert!(!day.occupancy.is_assigned(0, 1), "second range must apply");
    }
}

#[test]
fn employee_quota_policy_respects_cap_but_crowds_slots() {
    let employees = (0..5).map(|i| common::employee(&format!("E{i}"), 60)).collect();
    let config = common::config(employees, vec![common::window(8 * 60, 9 * 60)], 1, AllocationPolicy::EmployeeQuota);

    let week = ScheduleEngine::new(&config, 42).unwrap().run();
    let day = &week.days[0];
    // Every employee takes both slots: capacity 1 is not a bound here.
    assert_eq!(day.occupancy.headcount(0), 5);
    assert_eq!(day.occupancy.headcount(1), 5);
    assert!(day.worked_minutes.iter().all(|&m| m == 60));
}

#[test]
fn slot_capacity_policy_respects_capacity_but_not_daily_cap() {
    let config = common::config(
        vec![common::employee("A", 60)],
        vec![common::window(8 * 60, 10 * 60)],
        4,
        AllocationPolicy::SlotCapacity,
    );

    let mut engine = ScheduleEngine::new(&config, 42).unwrap();
    let week = engine.run();
    // Four slots, sole candidate each time: 120 minutes against a 60 cap.
    assert_eq!(week.days[0].worked_minutes[0], 120);
    assert!(engine.employees()[0].worked_minutes(0) > engine.employees()[0].max_daily_minutes);
}

#[test]
fn employee_quota_stops_once_counter_reaches_cap() {
    // A 45-minute cap on 30-minute slots: the second slot starts below
    // the cap, so the counter ends one slot past it.
    let config = common::config(
        vec![common::employee("A", 45)],
        vec![common::window(8 * 60, 10 * 60)],
        4,
        AllocationPolicy::EmployeeQuota,
    );
    let week = ScheduleEngine::new(&config, 5).unwrap().run();
    assert_eq!(week.days[0].worked_minutes[0], 60);

    let mut unified = config.clone();
    unified.policy = AllocationPolicy::Unified;
    let week = ScheduleEngine::new(&unified, 5).unwrap().run();
    assert_eq!(week.days[0].worked_minutes[0], 30);
}
