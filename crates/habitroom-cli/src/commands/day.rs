use chrono::{Datelike, NaiveDate};
use habitroom_core::date::month_days;
use habitroom_core::{format_day, parse_day, parse_month, DayStatus, PersistenceProvider, StreakLedger};
use serde::Serialize;

use super::{open_ledger, today};

/// Read-only view of one day, derived from ledger queries.
#[derive(Serialize)]
struct DayView {
    date: String,
    #[serde(flatten)]
    status: DayStatus,
    position: Option<&'static str>,
}

fn view<P: PersistenceProvider>(ledger: &StreakLedger<P>, date: NaiveDate) -> DayView {
    DayView {
        date: format_day(date),
        status: ledger.day_status(date),
        position: ledger.run_boundary(date).position().map(|p| p.as_str()),
    }
}

fn print_line(day: &DayView) {
    let marker = match day.status.marker() {
        "" => "·",
        m => m,
    };
    let mut line = format!("{} {marker}", day.date);
    if let Some(position) = day.position {
        line.push_str(&format!(" {position}"));
    }
    if let DayStatus::Broken { reason } = &day.status {
        line.push_str(&format!(" ({reason})"));
    }
    println!("{line}");
}

pub fn run_day(habit: Option<&str>, date: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_day(date)?;
    let (_, ledger) = open_ledger(habit)?;
    let day = view(&ledger, date);
    ledger.close();

    if json {
        println!("{}", serde_json::to_string_pretty(&day)?);
    } else {
        print_line(&day);
    }
    Ok(())
}

pub fn run_month(habit: Option<&str>, month: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => {
            let now = today();
            (now.year(), now.month())
        }
    };
    let (_, ledger) = open_ledger(habit)?;
    let days: Vec<DayView> = month_days(year, month)?
        .into_iter()
        .map(|date| view(&ledger, date))
        .collect();
    ledger.close();

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        for day in &days {
            print_line(day);
        }
    }
    Ok(())
}
