use crate::models::ShiftEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub holiday_hours: f64,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub tips: f64,
}

impl Stats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ShiftEntry>) -> Self {
        entries.into_iter().fold(Stats::default(), |mut acc, e| {
            acc.count += 1;
            acc.total_hours += e.hours;
            if e.is_holiday {
                acc.holiday_hours += e.hours;
            } else {
                acc.regular_hours += e.hours;
            }
            acc.gross_pay += e.gross_pay;
            acc.deductions += e.deductions;
            acc.net_pay += e.net_pay;
            acc.tips += e.tips;
            acc
        })
    }

    /// Take-home pay plus tips.
    pub fn total_income(&self) -> f64 {
        self.net_pay + self.tips
    }
}
