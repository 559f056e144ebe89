use crate::{
    allocation::{AllocationPolicy, DEFAULT_SLOT_CAPACITY},
    availability::OffWindowRule,
    day::{DayProfile, OperatingDay, DEFAULT_SLOT_MINUTES},
    employee::Employee,
    error::{ScheduleError, ScheduleResult},
    types::{EmployeeId, Interval, Minute, MINUTES_PER_DAY},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Roster ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSpec {
    pub id: EmployeeId,
    pub weekly_contract_minutes: Minute,
    #[serde(default)]
    pub is_manager: bool,
    pub max_daily_minutes: Minute,
    #[serde(default)]
    pub min_consecutive_minutes: Minute,
    #[serde(default)]
    pub must_work: Vec<Interval>,
    #[serde(default)]
    pub must_be_off: Vec<Interval>,
}

impl EmployeeSpec {
    /// Build the runtime record. Constraints are applied in file order,
    /// so a later interval for the same day replaces an earlier one.
    pub fn to_employee(&self) -> Employee {
        let mut employee = Employee::new(
            self.id.clone(),
            self.weekly_contract_minutes,
            self.is_manager,
            self.max_daily_minutes,
            self.min_consecutive_minutes,
        );
        for w in &self.must_work {
            employee.add_must_work_constraint(w.day, w.start_minute, w.end_minute);
        }
        for off in &self.must_be_off {
            employee.add_must_be_off_constraint(off.day, off.start_minute, off.end_minute);
        }
        employee
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RosterFile {
    employees: Vec<EmployeeSpec>,
}

// ── Week ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySpec {
    pub profile: DayProfile,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
struct WeekFile {
    #[serde(default = "default_granularity")]
    slot_granularity_minutes: Minute,
    #[serde(default = "default_capacity")]
    slot_capacity: usize,
    #[serde(default)]
    policy: AllocationPolicy,
    #[serde(default)]
    off_window_rule: OffWindowRule,
    #[serde(default)]
    enforce_must_work: bool,
    days: Vec<DaySpec>,
}

fn default_granularity() -> Minute { DEFAULT_SLOT_MINUTES }
fn default_capacity() -> usize { DEFAULT_SLOT_CAPACITY }

// ── Top level ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub employees: Vec<EmployeeSpec>,
    pub days: Vec<DaySpec>,
    pub slot_granularity_minutes: Minute,
    pub slot_capacity: usize,
    pub policy: AllocationPolicy,
    pub off_window_rule: OffWindowRule,
    pub enforce_must_work: bool,
}

impl ScheduleConfig {
    /// Load `roster.json` and `week.json` from the data/ directory.
    /// In tests, use ScheduleConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let roster_path = format!("{data_dir}/roster.json");
        let roster_content = std::fs::read_to_string(&roster_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {roster_path}: {e}"))?;
        let roster: RosterFile = serde_json::from_str(&roster_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {roster_path}: {e}"))?;

        let week_path = format!("{data_dir}/week.json");
        let week_content = std::fs::read_to_string(&week_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {week_path}: {e}"))?;
        let week: WeekFile = serde_json::from_str(&week_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {week_path}: {e}"))?;

        let config = Self {
            employees: roster.employees,
            days: week.days,
            slot_granularity_minutes: week.slot_granularity_minutes,
            slot_capacity: week.slot_capacity,
            policy: week.policy,
            off_window_rule: week.off_window_rule,
            enforce_must_work: week.enforce_must_work,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine must never see.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.employees.is_empty() {
            return Err(ScheduleError::EmptyRoster);
        }
        if self.slot_capacity == 0 {
            return Err(ScheduleError::InvalidCapacity);
        }
        let days = self.operating_days()?;

        let mut seen = HashSet::new();
        for spec in &self.employees {
            if !seen.insert(spec.id.as_str()) {
                return Err(ScheduleError::DuplicateEmployee { id: spec.id.clone() });
            }
            for interval in spec.must_work.iter().chain(&spec.must_be_off) {
                check_interval(&spec.id, interval, &days)?;
            }
        }
        Ok(())
    }

    /// The week as validated operating days, indexed in file order.
    pub fn operating_days(&self) -> ScheduleResult<Vec<OperatingDay>> {
        if self.days.is_empty() {
            return Err(ScheduleError::EmptyWeek);
        }
        self.days
            .iter()
            .enumerate()
            .map(|(index, d)| {
                OperatingDay::new(index, d.label.clone(), d.profile, self.slot_granularity_minutes)
            })
            .collect()
    }

    /// Runtime employee records in roster order.
    pub fn roster(&self) -> Vec<Employee> {
        self.employees.iter().map(EmployeeSpec::to_employee).collect()
    }

    /// Config with hardcoded defaults for use in unit tests.
    /// Three employees over a standard day and a half day.
    pub fn default_test() -> Self {
        let spec = |id: &str, max_daily: Minute| EmployeeSpec {
            id: id.into(),
            weekly_contract_minutes: 20 * 60,
            is_manager: false,
            max_daily_minutes: max_daily,
            min_consecutive_minutes: 2 * 60,
            must_work: Vec::new(),
            must_be_off: Vec::new(),
        };
        let mut manager = spec("A", 8 * 60 + 30);
        manager.is_manager = true;
        manager.weekly_contract_minutes = 39 * 60;

        let mut part_timer = spec("C", 4 * 60);
        part_timer.must_be_off.push(Interval::new(1, 0, MINUTES_PER_DAY));

        Self {
            employees: vec![manager, spec("B", 8 * 60), part_timer],
            days: vec![
                DaySpec { profile: DayProfile::Standard, label: "Mardi".into() },
                DaySpec { profile: DayProfile::HalfDay, label: "Dimanche".into() },
            ],
            slot_granularity_minutes: DEFAULT_SLOT_MINUTES,
            slot_capacity: 2,
            policy: AllocationPolicy::Unified,
            off_window_rule: OffWindowRule::Containment,
            enforce_must_work: false,
        }
    }
}

fn check_interval(employee: &str, interval: &Interval, days: &[OperatingDay]) -> ScheduleResult<()> {
    let reject = |reason: &'static str| ScheduleError::ConstraintOutOfRange {
        employee: employee.to_string(),
        day: interval.day,
        start_minute: interval.start_minute,
        end_minute: interval.end_minute,
        reason,
    };
    let Some(day) = days.get(interval.day) else {
        return Err(reject("day is not part of the week"));
    };
    if interval.start_minute >= interval.end_minute {
        return Err(reject("start is not before end"));
    }
    if interval.end_minute > MINUTES_PER_DAY {
        return Err(reject("ends after midnight"));
    }
    if !interval.overlaps(day.open_minute, day.close_minute) {
        return Err(reject("lies outside the operating window"));
    }
    Ok(())
}
