mod cli;
mod clipboard;
mod clock;
mod db;
mod error;
mod filter;
mod fmt;
mod i18n;
mod logging;
mod models;
mod pay;
mod report;
mod settings;
mod stats;
mod store;
mod tracker;

use clap::Parser;

use cli::{Cli, Commands, RatesCommands};

fn main() {
    let cli = Cli::parse();

    // Init picks the data directory, so it runs before any log file exists.
    if settings::settings_file_exists() && !matches!(cli.command, Commands::Init { .. }) {
        let settings = settings::load_settings();
        if let Err(e) =
            logging::enable_logging(&settings.logs_dir(), settings.log_level.as_deref(), cli.verbose)
        {
            eprintln!("Warning: logging disabled: {e}");
        }
    }

    let result = match cli.command {
        Commands::Init {
            data_dir,
            lang,
            remote_url,
            table,
        } => cli::init::run(data_dir, lang, remote_url, table),
        Commands::Add { shift, holiday } => cli::entries::add(&shift, holiday),
        Commands::Edit { id, shift, holiday } => cli::entries::edit(&id, &shift, holiday),
        Commands::Delete { id } => cli::entries::delete(&id),
        Commands::List { filter } => cli::entries::list(&filter),
        Commands::Stats { filter } => cli::stats::run(&filter),
        Commands::Report { filter, print } => cli::report::run(&filter, print),
        Commands::Hours { start, end } => cli::entries::hours(&start, &end),
        Commands::Rates { command } => match command {
            RatesCommands::Show => cli::rates::show(),
            RatesCommands::Set {
                hourly,
                cpp,
                ei,
                tax,
            } => cli::rates::set(hourly, cpp, ei, tax),
        },
        Commands::Status => cli::status::run(),
        Commands::Backup { output } => cli::backup::run(output),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
