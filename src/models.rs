use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the store on insert. SQLite hands out
/// integers, a hosted table may hand out integers or UUIDs; both are kept as
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => EntryId(n.to_string()),
            RawId::Text(s) => EntryId(s),
        })
    }
}

/// One logged shift. Pay fields are a snapshot taken when the entry was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(default)]
    pub date: String,
    #[serde(default, alias = "startTime", deserialize_with = "blank_as_none")]
    pub start_time: Option<String>,
    #[serde(default, alias = "endTime", deserialize_with = "blank_as_none")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub hours: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tips: f64,
    #[serde(default, alias = "isHoliday", deserialize_with = "lenient_bool")]
    pub is_holiday: bool,
    #[serde(default, alias = "grossPay", deserialize_with = "lenient_f64")]
    pub gross_pay: f64,
    #[serde(default, alias = "deductionAmount", deserialize_with = "lenient_f64")]
    pub deductions: f64,
    #[serde(default, alias = "netPay", deserialize_with = "lenient_f64")]
    pub net_pay: f64,
}

impl ShiftEntry {
    /// `HH:MM-HH:MM` when both clock times are known.
    pub fn time_range(&self) -> Option<String> {
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) => Some(format!("{start}-{end}")),
            _ => None,
        }
    }

    /// Same row without its identifier, as sent in insert/update bodies.
    pub fn without_id(&self) -> ShiftEntry {
        ShiftEntry {
            id: None,
            ..self.clone()
        }
    }
}

/// Hourly rate and deduction percentages in effect when an entry is saved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayRates {
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,
    /// Pension contribution, percent.
    #[serde(default = "default_cpp")]
    pub cpp: f64,
    /// Employment insurance, percent.
    #[serde(default = "default_ei")]
    pub ei: f64,
    /// Income tax withholding, percent.
    #[serde(default = "default_tax")]
    pub tax: f64,
}

fn default_hourly_rate() -> f64 {
    17.20
}

fn default_cpp() -> f64 {
    1.64
}

fn default_ei() -> f64 {
    1.64
}

fn default_tax() -> f64 {
    4.94
}

impl Default for PayRates {
    fn default() -> Self {
        Self {
            hourly_rate: default_hourly_rate(),
            cpp: default_cpp(),
            ei: default_ei(),
            tax: default_tax(),
        }
    }
}

impl PayRates {
    /// Sum of the three deduction percentages, as a percentage.
    pub fn total_deduction_pct(&self) -> f64 {
        self.cpp + self.ei + self.tax
    }

    /// Fraction of gross pay withheld.
    pub fn total_deduction_rate(&self) -> f64 {
        self.total_deduction_pct() / 100.0
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Num(f64),
        Text(String),
    }
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Num(n)) => n,
        Some(RawNumber::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw: Option<bool> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(false))
}
