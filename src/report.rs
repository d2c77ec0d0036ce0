use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{PayError, Result};
use crate::i18n::{strings, Lang};
use crate::models::ShiftEntry;

pub const SEPARATOR: &str = "--------------------------------";

/// 2024-01-01, the Monday all report week indices count from, as days
/// since the common era.
const EPOCH_MONDAY_CE_DAYS: i32 = 738_886;

/// Monday of the calendar week containing `date`. Sunday closes the week.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(i64::from(days_from_monday))
}

/// Whole weeks between the epoch Monday and the Monday of `date`'s week.
pub fn week_index(date: NaiveDate) -> i64 {
    let days = week_start(date).num_days_from_ce() - EPOCH_MONDAY_CE_DAYS;
    i64::from(days.div_euclid(7))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn format_line(entry: &ShiftEntry, lang: Lang) -> String {
    let s = strings(lang);
    let mut parts = Vec::with_capacity(4);
    match parse_date(&entry.date) {
        Some(d) => {
            parts.push(format!("{}/{}", d.month(), d.day()));
            parts.push(s.weekdays[d.weekday().num_days_from_sunday() as usize].to_string());
        }
        None => parts.push(entry.date.clone()),
    }
    if let Some(range) = entry.time_range() {
        parts.push(range);
    }
    parts.push(format!("({}h)", entry.hours));
    if entry.is_holiday {
        parts.push(s.holiday_tag.to_string());
    }
    parts.join(" ")
}

/// Build the plain-text hours report: one block per calendar week, holiday
/// shifts first, a separator after every second block, and a grand total of
/// regular hours. Holiday hours are subtotalled but left out of the total.
pub fn build_report<'a>(
    entries: impl IntoIterator<Item = &'a ShiftEntry>,
    lang: Lang,
) -> Result<String> {
    let mut sorted: Vec<&ShiftEntry> = entries.into_iter().collect();
    if sorted.is_empty() {
        return Err(PayError::EmptyReport);
    }
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    // Unparseable dates land in a trailing block of their own.
    let mut weeks: BTreeMap<i64, Vec<&ShiftEntry>> = BTreeMap::new();
    for entry in sorted {
        let key = parse_date(&entry.date).map_or(i64::MAX, week_index);
        weeks.entry(key).or_default().push(entry);
    }

    let mut report = String::new();
    let mut grand_total = 0.0;

    for (index, week) in weeks.values().enumerate() {
        let (holidays, regular): (Vec<&ShiftEntry>, Vec<&ShiftEntry>) =
            week.iter().copied().partition(|e| e.is_holiday);

        let mut holiday_total = 0.0;
        for entry in &holidays {
            report.push_str(&format_line(entry, lang));
            report.push('\n');
            holiday_total += entry.hours;
        }
        if holiday_total > 0.0 {
            report.push_str(&format!("-> {holiday_total:.2}h\n"));
        }

        let mut week_total = 0.0;
        for entry in &regular {
            report.push_str(&format_line(entry, lang));
            report.push('\n');
            week_total += entry.hours;
        }
        if week_total > 0.0 {
            report.push_str(&format!("-> {week_total:.2}hrs\n"));
        }
        grand_total += week_total;

        if index % 2 == 1 {
            report.push_str(SEPARATOR);
            report.push('\n');
        }
    }

    report.push_str(&format!("Total: {grand_total:.2}h"));
    Ok(report)
}
