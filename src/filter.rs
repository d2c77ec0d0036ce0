use chrono::{Duration, NaiveDate};

use crate::models::ShiftEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RecentPeriod {
    #[default]
    #[value(name = "2weeks")]
    TwoWeeks,
    #[value(name = "4weeks")]
    FourWeeks,
}

impl RecentPeriod {
    pub fn days(self) -> i64 {
        match self {
            RecentPeriod::TwoWeeks => 14,
            RecentPeriod::FourWeeks => 28,
        }
    }
}

/// Which slice of the entry list the stats, list and report look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Recent(RecentPeriod),
    /// Inclusive range. A missing boundary falls back to the recent filter.
    Custom {
        start: Option<String>,
        end: Option<String>,
        period: RecentPeriod,
    },
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Recent(RecentPeriod::default())
    }
}

impl ViewMode {
    /// Boundaries that parse as dates are zero-padded (`2024-1-5` becomes
    /// `2024-01-05`) so they compare correctly against stored dates.
    pub fn from_args(period: Option<RecentPeriod>, from: Option<String>, to: Option<String>) -> Self {
        let period = period.unwrap_or_default();
        let from = from.map(|raw| normalize_date(&raw).unwrap_or(raw));
        let to = to.map(|raw| normalize_date(&raw).unwrap_or(raw));
        if from.is_some() || to.is_some() {
            ViewMode::Custom {
                start: from,
                end: to,
                period,
            }
        } else {
            ViewMode::Recent(period)
        }
    }

    /// Human label for table headers.
    pub fn describe(&self, today: NaiveDate) -> String {
        match self.bounds(today) {
            (start, Some(end)) => format!("{start} to {end}"),
            (start, None) => format!("since {start}"),
        }
    }

    /// Lower bound and optional upper bound, both inclusive ISO dates.
    fn bounds(&self, today: NaiveDate) -> (String, Option<String>) {
        match self {
            ViewMode::Custom {
                start: Some(start),
                end: Some(end),
                ..
            } => (start.clone(), Some(end.clone())),
            ViewMode::Custom { period, .. } | ViewMode::Recent(period) => {
                let cutoff = today - Duration::days(period.days());
                (cutoff.format("%Y-%m-%d").to_string(), None)
            }
        }
    }
}

/// `YYYY-MM-DD` with zero padding, or `None` when `raw` is not a date.
pub fn normalize_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Entries inside the view, in their original order. Dates are compared as
/// ISO strings so a malformed date is never dropped for being malformed.
pub fn filter_entries<'a>(
    entries: &'a [ShiftEntry],
    view: &ViewMode,
    today: NaiveDate,
) -> Vec<&'a ShiftEntry> {
    let (start, end) = view.bounds(today);
    entries
        .iter()
        .filter(|e| {
            let date = e.date.as_str();
            date >= start.as_str() && end.as_deref().map_or(true, |end| date <= end)
        })
        .collect()
}
