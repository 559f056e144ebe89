//! The weekly orchestrator.
//!
//! EXECUTION ORDER (fixed):
//!   1. Reset every employee's worked-minute cells for the run.
//!   2. For each operating day in week order:
//!        a. draw that day's ScheduleRng from the RngBank
//!        b. allocate the day (Allocator)
//!        c. build the DaySchedule and hand it to the sink
//!   3. Summarise weekly totals.
//!
//! RULES:
//!   - Configuration is validated before an engine exists.
//!   - Days only share state through employee accumulators, which are
//!     indexed by day and never reset between days of one run.
//!   - All randomness flows through the RngBank.

use crate::{
    allocation::{AllocationPolicy, Allocator},
    availability::AvailabilityResolver,
    config::ScheduleConfig,
    day::OperatingDay,
    employee::Employee,
    error::ScheduleResult,
    report::{DaySchedule, ScheduleSink, WeekSchedule, WeeklyTotal},
    rng::RngBank,
    types::DayIndex,
};

pub struct ScheduleEngine {
    pub rng_bank: RngBank,
    allocator:    Allocator,
    days:         Vec<OperatingDay>,
    employees:    Vec<Employee>,
}

impl ScheduleEngine {
    pub fn new(config: &ScheduleConfig, seed: u64) -> ScheduleResult<Self> {
        config.validate()?;
        let allocator = Allocator::new(
            config.policy,
            config.slot_capacity,
            AvailabilityResolver::new(config.off_window_rule),
        )
        .with_must_work(config.enforce_must_work);

        Ok(Self {
            rng_bank: RngBank::new(seed),
            allocator,
            days: config.operating_days()?,
            employees: config.roster(),
        })
    }

    /// Engine over ScheduleConfig::default_test().
    pub fn build_test(seed: u64) -> ScheduleResult<Self> {
        Self::new(&ScheduleConfig::default_test(), seed)
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.allocator.policy = policy;
        self
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.allocator.policy
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn days(&self) -> &[OperatingDay] {
        &self.days
    }

    /// Schedule the whole week. Always succeeds.
    pub fn run(&mut self) -> WeekSchedule {
        self.begin_run();
        let days = (0..self.days.len()).map(|i| self.allocate_day(i)).collect();
        self.finish_run(days)
    }

    /// Schedule the whole week, handing each finished day to `sink`.
    /// Only a sink failure can make this return an error.
    pub fn run_with_sink(&mut self, sink: &mut dyn ScheduleSink) -> ScheduleResult<WeekSchedule> {
        self.begin_run();
        let mut days = Vec::with_capacity(self.days.len());
        for i in 0..self.days.len() {
            let day = self.allocate_day(i);
            sink.day_completed(&day)?;
            days.push(day);
        }
        Ok(self.finish_run(days))
    }

    fn begin_run(&mut self) {
        log::info!(
            "schedule run: seed={} policy={} days={} employees={}",
            self.rng_bank.base_seed(),
            self.allocator.policy.name(),
            self.days.len(),
            self.employees.len()
        );
        let day_count = self.days.len();
        for employee in &mut self.employees {
            employee.reset_accumulators(day_count);
        }
    }

    fn allocate_day(&mut self, index: DayIndex) -> DaySchedule {
        let day = &self.days[index];
        let mut rng = self.rng_bank.for_day(day.index);
        let grid = self.allocator.allocate_day(day, &mut self.employees, &mut rng);
        let schedule = DaySchedule::from_allocation(day, &self.employees, grid);

        let diagnostics = &schedule.diagnostics;
        log::debug!(
            "day={} '{}': slots={} uncovered={} unmet_must_work={} short_blocks={}",
            index,
            schedule.label,
            schedule.slot_count(),
            diagnostics.uncovered_slots.len(),
            diagnostics.unmet_must_work.len(),
            diagnostics.short_blocks.len()
        );
        if !diagnostics.uncovered_slots.is_empty() {
            log::warn!(
                "day '{}': {} slot(s) have no staff",
                schedule.label,
                diagnostics.uncovered_slots.len()
            );
        }
        if !diagnostics.unmet_must_work.is_empty() {
            log::warn!(
                "day '{}': {} must-work slot(s) unassigned",
                schedule.label,
                diagnostics.unmet_must_work.len()
            );
        }
        schedule
    }

    fn finish_run(&self, days: Vec<DaySchedule>) -> WeekSchedule {
        let weekly_totals: Vec<WeeklyTotal> =
            self.employees.iter().map(WeeklyTotal::from_employee).collect();
        let week = WeekSchedule {
            seed: self.rng_bank.base_seed(),
            policy: self.allocator.policy,
            days,
            weekly_totals,
        };
        log::info!(
            "schedule run complete: days={} uncovered_slots={}",
            week.days.len(),
            week.uncovered_slot_count()
        );
        week
    }
}
