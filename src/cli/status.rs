use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{load_settings, settings_file_exists, StoreBackend};
use crate::store::open_store;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = settings.data_path();

    println!("Data dir:   {}", data_dir.display());
    println!("Language:   {}", settings.language.code());
    println!(
        "Rates:      {}/h, deductions {:.2}%",
        settings.rates.hourly_rate,
        settings.rates.total_deduction_pct()
    );

    if !settings_file_exists() {
        println!();
        println!("Not set up. Run `paytrack init` to set up.");
        return Ok(());
    }

    if settings.store.backend == StoreBackend::Sqlite {
        let db_path = settings.db_path();
        println!("Database:   {}", db_path.display());
        if db_path.exists() {
            let size = std::fs::metadata(&db_path)?.len();
            println!("DB size:    {}", format_bytes(size));
        }
    }

    let cache_path = settings.cache_path();
    if cache_path.exists() {
        let size = std::fs::metadata(&cache_path)?.len();
        println!("Cache:      {} ({})", cache_path.display(), format_bytes(size));
    } else {
        println!("Cache:      (none, run `paytrack backup`)");
    }

    println!();
    match open_store(&settings) {
        Ok(store) => {
            println!("Store:      {}", store.describe());
            match store.list() {
                Ok(entries) => println!("Entries:    {}", entries.len()),
                Err(e) => println!("Entries:    unavailable ({e})"),
            }
        }
        Err(e) => println!("Store:      unavailable ({e})"),
    }

    Ok(())
}
