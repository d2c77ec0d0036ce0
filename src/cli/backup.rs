use std::path::PathBuf;

use crate::error::{PayError, Result};
use crate::fmt::format_bytes;
use crate::settings::{load_settings, settings_file_exists, shellexpand_path};
use crate::store::cache::write_snapshot;
use crate::store::open_store;

/// Write every stored entry to a JSON snapshot. The default destination is
/// the offline cache that other commands fall back to.
pub fn run(output: Option<String>) -> Result<()> {
    if !settings_file_exists() {
        return Err(PayError::Settings(
            "paytrack is not set up yet. Run `paytrack init` first.".into(),
        ));
    }
    let settings = load_settings();
    let store = open_store(&settings)?;
    let entries = store.list()?;

    let dest_path = match output {
        Some(p) => PathBuf::from(shellexpand_path(&p)),
        None => settings.cache_path(),
    };
    write_snapshot(&dest_path, &entries)?;

    let size = std::fs::metadata(&dest_path)?.len();
    tracing::info!(count = entries.len(), path = %dest_path.display(), "snapshot written");
    println!("Saved {} entries to {}", entries.len(), dest_path.display());
    println!("Size: {}", format_bytes(size));
    Ok(())
}
