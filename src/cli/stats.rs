use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{open_tracker, FilterArgs};
use crate::error::Result;
use crate::fmt::{hours, money};
use crate::i18n::strings;
use crate::settings::load_settings;

pub fn run(filter: &FilterArgs) -> Result<()> {
    let view = filter.view()?;
    let settings = load_settings();
    let mut tracker = open_tracker(&settings)?;
    tracker.set_view(view);
    let text = strings(tracker.lang());
    let stats = tracker.stats();
    let title = tracker.view().describe(tracker.today());

    let mut table = Table::new();
    table.set_header(vec!["", ""]);
    table.add_row(vec![Cell::new(text.shifts), Cell::new(stats.count)]);
    table.add_row(vec![
        Cell::new(text.total_hours.bold()),
        Cell::new(hours(stats.total_hours)),
    ]);
    table.add_row(vec![
        Cell::new(format!("  {}", text.regular)),
        Cell::new(hours(stats.regular_hours)),
    ]);
    table.add_row(vec![
        Cell::new(format!("  {}", text.holiday)),
        Cell::new(hours(stats.holiday_hours)),
    ]);
    table.add_row(vec![Cell::new(""), Cell::new("")]);
    table.add_row(vec![Cell::new(text.gross_pay), Cell::new(money(stats.gross_pay))]);
    table.add_row(vec![
        Cell::new(text.deductions.red()),
        Cell::new(money(stats.deductions)),
    ]);
    table.add_row(vec![Cell::new(text.net_pay.bold()), Cell::new(money(stats.net_pay))]);
    table.add_row(vec![Cell::new(text.tips), Cell::new(money(stats.tips))]);
    table.add_row(vec![Cell::new(""), Cell::new("")]);
    table.add_row(vec![
        Cell::new(text.total_income.green().bold()),
        Cell::new(money(stats.total_income())),
    ]);

    println!("{title}\n{table}");
    Ok(())
}
