//! Output formats for finished schedules.
//!
//! Text mirrors the classic shift sheet: one `HHhMM,0,1,...,` row per
//! slot followed by a daily summary. CSV is one row per slot with the
//! day label up front. JSON is the whole week, written once at the end.

use anyhow::Result;
use shiftplan_core::report::{DaySchedule, ScheduleSink, WeekSchedule};
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "csv"  => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other  => anyhow::bail!("unknown format '{other}' (expected text, csv or json)"),
        }
    }
}

pub struct WriterSink<W: Write> {
    out:            W,
    format:         Format,
    header_written: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self { out, format, header_written: false }
    }

    /// Write anything that needs the whole week, flush, and hand the
    /// writer back.
    pub fn finish(mut self, week: &WeekSchedule) -> Result<W> {
        if self.format == Format::Json {
            serde_json::to_writer_pretty(&mut self.out, week)?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_text(&mut self, day: &DaySchedule) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "\n\n{}: (in {}-minute slots)", day.label, day.granularity_minutes)?;
        writeln!(out, "     ,{}", day.employee_ids.join(","))?;

        for (slot, label) in day.time_labels().iter().enumerate() {
            write!(out, "{label},")?;
            for row in 0..day.employee_ids.len() {
                write!(out, "{},", u8::from(day.occupancy.is_assigned(row, slot)))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "\nDaily summary:")?;
        for (id, hours, minutes) in day.summary() {
            writeln!(out, "{id}: {hours} hours {minutes} minutes")?;
        }
        if !day.diagnostics.uncovered_slots.is_empty() {
            let labels = day.time_labels();
            let gaps: Vec<&str> = day
                .diagnostics
                .uncovered_slots
                .iter()
                .map(|&slot| labels[slot].as_str())
                .collect();
            writeln!(out, "Uncovered: {}", gaps.join(" "))?;
        }
        writeln!(out, "\n")?;
        Ok(())
    }

    fn write_csv(&mut self, day: &DaySchedule) -> Result<()> {
        if !self.header_written {
            writeln!(self.out, "day,time,{}", day.employee_ids.join(","))?;
            self.header_written = true;
        }
        for (slot, label) in day.time_labels().iter().enumerate() {
            let cells: Vec<&str> = (0..day.employee_ids.len())
                .map(|row| if day.occupancy.is_assigned(row, slot) { "1" } else { "0" })
                .collect();
            writeln!(self.out, "{},{label},{}", day.label, cells.join(","))?;
        }
        Ok(())
    }
}

impl<W: Write> ScheduleSink for WriterSink<W> {
    fn day_completed(&mut self, day: &DaySchedule) -> Result<()> {
        match self.format {
            Format::Text => self.write_text(day),
            Format::Csv  => self.write_csv(day),
            Format::Json => Ok(()),
        }
    }
}

/// Run summary: coverage gaps and weekly hours against contract.
pub fn write_summary(out: &mut impl Write, week: &WeekSchedule, destination: &str) -> Result<()> {
    writeln!(out, "=== RUN SUMMARY ===")?;
    writeln!(out, "  seed:            {}", week.seed)?;
    writeln!(out, "  days:            {}", week.days.len())?;
    writeln!(out, "  uncovered slots: {}", week.uncovered_slot_count())?;
    writeln!(out, "  written to:      {destination}")?;
    writeln!(out)?;
    writeln!(out, "=== WEEKLY HOURS vs CONTRACT ===")?;
    for total in &week.weekly_totals {
        writeln!(
            out,
            "  {:<10} {:>3}h{:02} / {:>3}h{:02}  ({:+} min)",
            total.employee,
            total.worked_minutes / 60,
            total.worked_minutes % 60,
            total.weekly_contract_minutes / 60,
            total.weekly_contract_minutes % 60,
            total.contract_delta_minutes
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftplan_core::engine::ScheduleEngine;

    fn render(format: Format) -> String {
        let mut engine = ScheduleEngine::build_test(42).unwrap();
        let mut sink = WriterSink::new(Vec::new(), format);
        let week = engine.run_with_sink(&mut sink).unwrap();
        String::from_utf8(sink.finish(&week).unwrap()).unwrap()
    }

    #[test]
    fn text_has_header_rows_and_summary() {
        let text = render(Format::Text);
        assert!(text.contains("Mardi: (in 30-minute slots)"));
        assert!(text.contains("     ,A,B,C"));
        assert!(text.contains("\n08h00,"));
        assert!(text.contains("\n20h00,"));
        assert!(text.contains("Daily summary:"));
        // C is off all of Sunday.
        let sunday = text.split("Dimanche").nth(1).unwrap();
        assert!(sunday.contains("C: 0 hours 0 minutes"));
    }

    #[test]
    fn csv_has_one_header_and_a_row_per_slot() {
        let csv = render(Format::Csv);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "day,time,A,B,C");
        assert_eq!(lines.len(), 1 + 25 + 12);
        assert!(lines[1].starts_with("Mardi,08h00,"));
    }

    #[test]
    fn json_round_trips_the_week() {
        let json = render(Format::Json);
        let week: WeekSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(week.seed, 42);
        assert_eq!(week.days.len(), 2);
    }

    #[test]
    fn summary_lists_gaps_and_every_employee() {
        let week = ScheduleEngine::build_test(42).unwrap().run();
        let mut buf = Vec::new();
        write_summary(&mut buf, &week, "stdout").unwrap();
        let summary = String::from_utf8(buf).unwrap();

        assert!(summary.starts_with("=== RUN SUMMARY ==="));
        assert!(summary.contains(&format!("uncovered slots: {}", week.uncovered_slot_count())));
        assert!(summary.contains("written to:      stdout"));
        assert!(summary.contains("=== WEEKLY HOURS vs CONTRACT ==="));
        for id in ["A", "B", "C"] {
            assert!(summary.lines().any(|l| l.trim_start().starts_with(id)), "missing {id}");
        }
    }

    #[test]
    fn unknown_format_rejected() {
        assert!("xml".parse::<Format>().is_err());
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
    }
}
