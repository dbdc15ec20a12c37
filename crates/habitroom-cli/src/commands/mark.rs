use habitroom_core::{format_day, parse_day, Config};

use super::open_ledger;

pub fn run_break(
    habit: Option<&str>,
    date: &str,
    selection: &str,
    note: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_day(date)?;
    let (config, mut ledger) = open_ledger(habit)?;
    let reason = config.reasons.resolve(selection, note)?;

    ledger.record_break(date, reason.as_str())?;
    ledger.close();
    println!("break recorded: {} ({reason})", format_day(date));
    Ok(())
}

pub fn run_undo(habit: Option<&str>, date: &str) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_day(date)?;
    let (_, mut ledger) = open_ledger(habit)?;
    let undone = ledger.undo_break(date);
    ledger.close();

    if undone {
        println!("break undone: {}", format_day(date));
    } else {
        println!("no break recorded on {}", format_day(date));
    }
    Ok(())
}

pub fn run_reasons() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    for option in &config.reasons.options {
        if config.reasons.is_other(option) {
            println!("{option} (requires --note)");
        } else {
            println!("{option}");
        }
    }
    Ok(())
}
