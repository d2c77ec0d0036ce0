use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::i18n::Lang;
use crate::settings::{
    load_settings, save_settings, settings_file_exists, shellexpand_path, StoreBackend,
};
use crate::store::open_store;

fn prompt_data_dir(default: &str) -> Result<String> {
    print!("Data directory [{default}]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    Ok(if line.is_empty() {
        default.to_string()
    } else {
        line.to_string()
    })
}

pub fn run(
    data_dir: Option<String>,
    lang: Option<Lang>,
    remote_url: Option<String>,
    table: Option<String>,
) -> Result<()> {
    let mut settings = load_settings();
    let data_dir = match data_dir {
        Some(dir) => dir,
        None if settings_file_exists() => settings.data_dir.clone(),
        None => prompt_data_dir(&settings.data_dir)?,
    };
    std::fs::create_dir_all(shellexpand_path(&data_dir))?;
    let resolved = PathBuf::from(shellexpand_path(&data_dir));
    std::fs::create_dir_all(resolved.join("logs"))?;
    settings.data_dir = resolved.to_string_lossy().to_string();

    if let Some(lang) = lang {
        settings.language = lang;
    }
    if let Some(url) = remote_url {
        settings.store.backend = StoreBackend::Remote;
        settings.store.url = Some(url);
    }
    if let Some(table) = table {
        settings.store.table = table;
    }

    // Opening the store creates the local schema; a hosted table must already exist.
    let store = open_store(&settings)?;
    save_settings(&settings)?;

    println!("Data directory: {}", resolved.display());
    println!("Store:          {}", store.describe());
    println!("paytrack is ready. Log a shift with `paytrack add`.");
    Ok(())
}
