use comfy_table::{Cell, Table};

use crate::error::{PayError, Result};
use crate::fmt::money;
use crate::models::PayRates;
use crate::settings::{load_settings, save_settings};

fn rates_table(rates: &PayRates) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Rate", "Value"]);
    table.add_row(vec![Cell::new("Hourly"), Cell::new(money(rates.hourly_rate))]);
    table.add_row(vec![Cell::new("CPP"), Cell::new(format!("{}%", rates.cpp))]);
    table.add_row(vec![Cell::new("EI"), Cell::new(format!("{}%", rates.ei))]);
    table.add_row(vec![Cell::new("Tax"), Cell::new(format!("{}%", rates.tax))]);
    table.add_row(vec![
        Cell::new("Total deductions"),
        Cell::new(format!("{:.2}%", rates.total_deduction_pct())),
    ]);
    table
}

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Pay rates\n{}", rates_table(&settings.rates));
    Ok(())
}

fn check_rate(name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(PayError::Validation(format!(
            "{name} must be a non-negative number"
        ))),
        _ => Ok(()),
    }
}

/// Rates only affect entries saved from now on; stored pay is never
/// recomputed.
pub fn set(hourly: Option<f64>, cpp: Option<f64>, ei: Option<f64>, tax: Option<f64>) -> Result<()> {
    check_rate("--hourly", hourly)?;
    check_rate("--cpp", cpp)?;
    check_rate("--ei", ei)?;
    check_rate("--tax", tax)?;

    let mut settings = load_settings();
    let rates = &mut settings.rates;
    if let Some(v) = hourly {
        rates.hourly_rate = v;
    }
    if let Some(v) = cpp {
        rates.cpp = v;
    }
    if let Some(v) = ei {
        rates.ei = v;
    }
    if let Some(v) = tax {
        rates.tax = v;
    }
    save_settings(&settings)?;
    tracing::info!(hourly = settings.rates.hourly_rate, "pay rates updated");
    println!("Pay rates updated\n{}", rates_table(&settings.rates));
    Ok(())
}
