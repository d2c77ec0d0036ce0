use chrono::{Local, NaiveDate};

/// Source of "today" for default entry dates and recent-period filters. Lets
/// tests pin the date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
pub struct FixedClock(pub NaiveDate);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
