pub mod backup;
pub mod entries;
pub mod init;
pub mod rates;
pub mod report;
pub mod stats;
pub mod status;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::clock::LocalClock;
use crate::error::{PayError, Result};
use crate::filter::{RecentPeriod, ViewMode};
use crate::i18n::{strings, Lang};
use crate::settings::{settings_file_exists, Settings};
use crate::store::cache::LocalCache;
use crate::store::open_store;
use crate::tracker::{LoadSource, Tracker};

#[derive(Parser)]
#[command(name = "paytrack", about = "Track shifts, tips and take-home pay.")]
pub struct Cli {
    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up paytrack: choose a data directory and initialize the database.
    Init {
        /// Path for paytrack data
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Language for messages and reports
        #[arg(long, value_enum)]
        lang: Option<Lang>,
        /// Use a hosted table at this URL instead of the local database
        #[arg(long = "remote-url")]
        remote_url: Option<String>,
        /// Table name on the hosted store
        #[arg(long)]
        table: Option<String>,
    },
    /// Log a shift.
    Add {
        #[command(flatten)]
        shift: ShiftArgs,
        /// Paid at 1.5x the hourly rate
        #[arg(long)]
        holiday: bool,
    },
    /// Edit a logged shift. Only the given fields change; pay is recomputed
    /// with the current rates.
    Edit {
        /// Entry ID (shown in `paytrack list`)
        id: String,
        #[command(flatten)]
        shift: ShiftArgs,
        /// Holiday flag: true or false
        #[arg(long)]
        holiday: Option<bool>,
    },
    /// Delete a logged shift.
    Delete {
        /// Entry ID (shown in `paytrack list`)
        id: String,
    },
    /// List shifts in a period.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Hours, pay, deductions and tips for a period.
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Build the weekly hours report and copy it to the clipboard.
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the report instead of copying it
        #[arg(long)]
        print: bool,
    },
    /// Work out the hours between two clock times.
    Hours {
        /// Start time: HH:MM
        start: String,
        /// End time: HH:MM (earlier than start means the next day)
        end: String,
    },
    /// Show or change the hourly rate and deductions.
    Rates {
        #[command(subcommand)]
        command: RatesCommands,
    },
    /// Show current settings and store summary.
    Status,
    /// Snapshot all entries to the offline cache file.
    Backup {
        /// Output path (default: <data_dir>/entries-cache.json)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RatesCommands {
    /// Show the current rates.
    Show,
    /// Change one or more rates.
    Set {
        /// Hourly wage
        #[arg(long)]
        hourly: Option<f64>,
        /// Pension deduction, percent
        #[arg(long)]
        cpp: Option<f64>,
        /// Employment insurance deduction, percent
        #[arg(long)]
        ei: Option<f64>,
        /// Income tax deduction, percent
        #[arg(long)]
        tax: Option<f64>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ShiftArgs {
    /// Shift date: YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Start time: HH:MM
    #[arg(long)]
    pub start: Option<String>,
    /// End time: HH:MM
    #[arg(long)]
    pub end: Option<String>,
    /// Worked hours (wins over hours derived from --start/--end)
    #[arg(long)]
    pub hours: Option<String>,
    /// Tips received
    #[arg(long)]
    pub tips: Option<String>,
}

impl ShiftArgs {
    /// No field flag was given.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.hours.is_none()
            && self.tips.is_none()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Recent period: 2weeks or 4weeks
    #[arg(long, value_enum)]
    pub period: Option<RecentPeriod>,
    /// Start date: YYYY-MM-DD (inclusive)
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD (inclusive)
    #[arg(long = "to")]
    pub to_date: Option<String>,
}

impl FilterArgs {
    /// The view these flags select. `--from`/`--to` must be dates.
    pub fn view(&self) -> Result<ViewMode> {
        for date in [&self.from_date, &self.to_date].into_iter().flatten() {
            entries::check_date(date)?;
        }
        Ok(ViewMode::from_args(
            self.period,
            self.from_date.clone(),
            self.to_date.clone(),
        ))
    }
}

/// Open the configured store and load the entry list, telling the user when
/// the list came from the offline cache.
pub(crate) fn open_tracker(settings: &Settings) -> Result<Tracker> {
    if !settings_file_exists() {
        return Err(PayError::Settings(
            "paytrack is not set up yet. Run `paytrack init` first.".into(),
        ));
    }
    let store = open_store(settings)?;
    let mut tracker = Tracker::new(
        store,
        LocalCache::new(settings.cache_path()),
        Box::new(LocalClock),
        settings.rates,
        settings.language,
    );
    match tracker.load() {
        LoadSource::Store => {}
        LoadSource::Cache => {
            let msg = format!(
                "{} {}",
                strings(settings.language).loaded_from_cache,
                tracker.cache_path().display()
            );
            eprintln!("{}", msg.yellow());
        }
        LoadSource::Empty => {
            eprintln!("{}", strings(settings.language).store_unavailable.yellow());
        }
    }
    Ok(tracker)
}
