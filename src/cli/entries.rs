use chrono::{NaiveDate, NaiveTime};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_tracker, FilterArgs, ShiftArgs};
use crate::error::{PayError, Result};
use crate::filter::normalize_date;
use crate::fmt::money;
use crate::i18n::strings;
use crate::models::{EntryId, ShiftEntry};
use crate::pay::{derive_hours, parse_amount, ShiftForm};
use crate::settings::load_settings;
use crate::tracker::SaveOutcome;

pub(crate) fn check_date(value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| PayError::Validation(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

fn check_time(value: &str) -> Result<()> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| PayError::Validation(format!("Invalid time '{value}', expected HH:MM")))
}

/// Copy the given flags onto the form. An empty `--start ""` or `--end ""`
/// clears that time.
fn apply_shift_args(shift: &ShiftArgs, form: &mut ShiftForm) -> Result<()> {
    if let Some(date) = &shift.date {
        check_date(date)?;
        form.date = normalize_date(date).unwrap_or_else(|| date.clone());
    }
    if let Some(start) = &shift.start {
        if !start.trim().is_empty() {
            check_time(start)?;
        }
        form.set_start_time(Some(start.clone()));
    }
    if let Some(end) = &shift.end {
        if !end.trim().is_empty() {
            check_time(end)?;
        }
        form.set_end_time(Some(end.clone()));
    }
    if let Some(hours) = &shift.hours {
        form.hours = hours.trim().parse::<f64>().ok();
    }
    if shift.tips.is_some() {
        form.tips = parse_amount(shift.tips.as_deref());
    }
    Ok(())
}

fn summary(entry: &ShiftEntry) -> String {
    format!(
        "{} {}h, gross {}, net {}",
        entry.date,
        entry.hours,
        money(entry.gross_pay),
        money(entry.net_pay)
    )
}

pub fn add(shift: &ShiftArgs, holiday: bool) -> Result<()> {
    let settings = load_settings();
    let mut tracker = open_tracker(&settings)?;
    apply_shift_args(shift, tracker.form_mut())?;
    tracker.form_mut().is_holiday = holiday;

    if let SaveOutcome::Inserted(stored) = tracker.save()? {
        let id = stored.id.as_ref().map(EntryId::as_str).unwrap_or("?");
        println!(
            "{} (#{id}) {}",
            strings(tracker.lang()).saved.green(),
            summary(&stored)
        );
    }
    Ok(())
}

pub fn edit(id: &str, shift: &ShiftArgs, holiday: Option<bool>) -> Result<()> {
    let settings = load_settings();
    let mut tracker = open_tracker(&settings)?;
    let id = EntryId::new(id);
    tracker.begin_edit(&id)?;
    if shift.is_empty() && holiday.is_none() {
        tracker.cancel_edit();
        println!("{} (#{id})", strings(tracker.lang()).unchanged);
        return Ok(());
    }
    apply_shift_args(shift, tracker.form_mut())?;
    if let Some(holiday) = holiday {
        tracker.form_mut().is_holiday = holiday;
    }

    tracker.save()?;
    let msg = strings(tracker.lang()).updated;
    match tracker.entries().iter().find(|e| e.id.as_ref() == Some(&id)) {
        Some(entry) => println!("{} (#{id}) {}", msg.green(), summary(entry)),
        None => println!("{} (#{id})", msg.green()),
    }
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let settings = load_settings();
    let mut tracker = open_tracker(&settings)?;
    let id = EntryId::new(id);
    tracker.delete(&id)?;
    println!("{} (#{id})", strings(tracker.lang()).deleted.green());
    Ok(())
}

pub fn list(filter: &FilterArgs) -> Result<()> {
    let view = filter.view()?;
    let settings = load_settings();
    let mut tracker = open_tracker(&settings)?;
    tracker.set_view(view);
    let text = strings(tracker.lang());
    let title = tracker.view().describe(tracker.today());

    let rows = tracker.filtered();
    if rows.is_empty() {
        println!("{title}\n{}", text.no_entries);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        text.id,
        text.date,
        text.time,
        text.hours,
        text.gross_pay,
        text.deductions,
        text.net_pay,
        text.tips,
        "",
    ]);
    for entry in rows {
        let holiday = if entry.is_holiday {
            text.holiday.yellow().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(entry.id.as_ref().map(EntryId::as_str).unwrap_or_default()),
            Cell::new(&entry.date),
            Cell::new(entry.time_range().unwrap_or_default()),
            Cell::new(entry.hours),
            Cell::new(money(entry.gross_pay)),
            Cell::new(money(entry.deductions)),
            Cell::new(money(entry.net_pay)),
            Cell::new(money(entry.tips)),
            Cell::new(holiday),
        ]);
    }
    println!("{title}\n{table}");
    Ok(())
}

/// Clock-time calculator; no store involved.
pub fn hours(start: &str, end: &str) -> Result<()> {
    check_time(start)?;
    check_time(end)?;
    match derive_hours(Some(start), Some(end)) {
        Some(h) => {
            println!("{h}");
            Ok(())
        }
        None => Err(PayError::Validation("Could not work out hours".into())),
    }
}
