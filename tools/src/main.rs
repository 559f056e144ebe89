//! shift-runner: headless schedule generator.
//!
//! Usage:
//!   shift-runner --seed 12345 --data-dir ./data
//!   shift-runner --seed 12345 --format csv --out schedule.csv
//!   shift-runner --policy employee_quota --format json

mod render;

use anyhow::Result;
use render::{write_summary, Format, WriterSink};
use shiftplan_core::{
    allocation::AllocationPolicy,
    config::ScheduleConfig,
    engine::ScheduleEngine,
};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let format: Format = flag_value(&args, "--format").unwrap_or("text").parse()?;
    let out_path = flag_value(&args, "--out");

    let config = ScheduleConfig::load(data_dir)?;
    let mut engine = ScheduleEngine::new(&config, seed)?;
    if let Some(policy) = flag_value(&args, "--policy") {
        engine = engine.with_policy(parse_policy(policy)?);
    }

    // Keep stdout clean for the schedule itself unless it goes to a file.
    let chatty = out_path.is_some();
    if chatty {
        println!("shift-runner");
        println!("  seed:      {seed}");
        println!("  data_dir:  {data_dir}");
        println!("  policy:    {}", engine.policy().name());
        println!("  started:   {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        println!();
    }

    let writer: Box<dyn Write> = match out_path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut sink = WriterSink::new(writer, format);
    let week = engine.run_with_sink(&mut sink)?;
    sink.finish(&week)?;

    // The summary always closes the run; it moves to stderr when the
    // schedule itself is on stdout.
    let destination = out_path.unwrap_or("stdout");
    if chatty {
        write_summary(&mut io::stdout().lock(), &week, destination)?;
    } else {
        write_summary(&mut io::stderr().lock(), &week, destination)?;
    }
    Ok(())
}

fn parse_policy(value: &str) -> Result<AllocationPolicy> {
    match value {
        "unified"        => Ok(AllocationPolicy::Unified),
        "employee_quota" => Ok(AllocationPolicy::EmployeeQuota),
        "slot_capacity"  => Ok(AllocationPolicy::SlotCapacity),
        other => {
            log::warn!("Unknown policy: {other}");
            anyhow::bail!("unknown policy '{other}' (expected unified, employee_quota or slot_capacity)")
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
