use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{PayError, Result};
use crate::models::{PayRates, ShiftEntry};

pub const HOLIDAY_MULTIPLIER: f64 = 1.5;

const MINUTES_PER_DAY: i64 = 24 * 60;

fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Hours between two `HH:MM` clock times, rounded to two decimals. An end
/// earlier than the start is taken to be on the next day.
pub fn derive_hours(start: Option<&str>, end: Option<&str>) -> Option<f64> {
    let start = parse_clock(start?)?;
    let end = parse_clock(end?)?;
    let start_min = i64::from(start.hour() * 60 + start.minute());
    let end_min = i64::from(end.hour() * 60 + end.minute());
    let mut minutes = end_min - start_min;
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    Some(round2(minutes as f64 / 60.0))
}

pub fn round2(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

/// Parse a user-typed amount. Anything unparseable counts as zero.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayBreakdown {
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
}

pub fn compute_pay(hours: f64, is_holiday: bool, rates: &PayRates) -> PayBreakdown {
    let multiplier = if is_holiday { HOLIDAY_MULTIPLIER } else { 1.0 };
    let gross = hours * rates.hourly_rate * multiplier;
    let deductions = gross * rates.total_deduction_rate();
    PayBreakdown {
        gross,
        deductions,
        net: gross - deductions,
    }
}

/// In-progress shift being entered or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftForm {
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub hours: Option<f64>,
    pub tips: f64,
    pub is_holiday: bool,
}

impl ShiftForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            start_time: None,
            end_time: None,
            hours: None,
            tips: 0.0,
            is_holiday: false,
        }
    }

    pub fn from_entry(entry: &ShiftEntry) -> Self {
        Self {
            date: entry.date.clone(),
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            hours: Some(entry.hours),
            tips: entry.tips,
            is_holiday: entry.is_holiday,
        }
    }

    pub fn set_start_time(&mut self, value: Option<String>) {
        self.start_time = value.filter(|s| !s.trim().is_empty());
        self.rederive_hours();
    }

    pub fn set_end_time(&mut self, value: Option<String>) {
        self.end_time = value.filter(|s| !s.trim().is_empty());
        self.rederive_hours();
    }

    fn rederive_hours(&mut self) {
        self.hours = derive_hours(self.start_time.as_deref(), self.end_time.as_deref());
    }

    /// Validate the form and build the row to persist, with pay fields
    /// computed from `rates`.
    pub fn to_entry(&self, rates: &PayRates) -> Result<ShiftEntry> {
        let hours = match self.hours {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => {
                return Err(PayError::Validation(
                    "Hours must be greater than zero".to_string(),
                ))
            }
        };
        let pay = compute_pay(hours, self.is_holiday, rates);
        Ok(ShiftEntry {
            id: None,
            date: self.date.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            hours,
            tips: self.tips,
            is_holiday: self.is_holiday,
            gross_pay: pay.gross,
            deductions: pay.deductions,
            net_pay: pay.net,
        })
    }
}
