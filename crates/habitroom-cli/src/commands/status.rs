use habitroom_core::{format_day, parse_day};
use serde::Serialize;

use super::{open_ledger, today};

#[derive(Serialize)]
struct StatusOutput {
    habit: String,
    name: String,
    reference: String,
    current_streak: u32,
}

pub fn run(habit: Option<&str>, reference: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let reference = match reference {
        Some(raw) => parse_day(raw)?,
        None => today(),
    };
    let (config, ledger) = open_ledger(habit)?;

    let key = ledger.habit_key().to_string();
    let name = if key == config.habit.key {
        config.habit.name.clone()
    } else {
        key.clone()
    };
    let current_streak = ledger.current_streak(reference);
    ledger.close();

    if json {
        let out = StatusOutput {
            habit: key,
            name,
            reference: format_day(reference),
            current_streak,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{name} Tracker");
        let plural = if current_streak == 1 { "" } else { "s" };
        println!("🔥 Current Streak: {current_streak} day{plural}");
    }
    Ok(())
}
