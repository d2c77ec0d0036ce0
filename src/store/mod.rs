pub mod cache;
#[cfg(test)]
pub mod memory;
#[cfg(feature = "remote")]
pub mod remote;
pub mod sqlite;

use crate::error::{PayError, Result};
use crate::models::{EntryId, ShiftEntry};
use crate::settings::{Settings, StoreBackend};

/// A table of shift rows keyed by entry id.
pub trait EntryStore {
    /// All rows, newest date first.
    fn list(&self) -> Result<Vec<ShiftEntry>>;

    /// Store a new row and return it with its assigned id.
    fn insert(&self, entry: &ShiftEntry) -> Result<ShiftEntry>;

    /// Replace every field of the row with `id`.
    fn update(&self, id: &EntryId, entry: &ShiftEntry) -> Result<()>;

    fn delete(&self, id: &EntryId) -> Result<()>;

    /// Short description for status output.
    fn describe(&self) -> String;
}

impl EntryStore for Box<dyn EntryStore> {
    fn list(&self) -> Result<Vec<ShiftEntry>> {
        (**self).list()
    }

    fn insert(&self, entry: &ShiftEntry) -> Result<ShiftEntry> {
        (**self).insert(entry)
    }

    fn update(&self, id: &EntryId, entry: &ShiftEntry) -> Result<()> {
        (**self).update(id, entry)
    }

    fn delete(&self, id: &EntryId) -> Result<()> {
        (**self).delete(id)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

pub fn open_store(settings: &Settings) -> Result<Box<dyn EntryStore>> {
    match settings.store.backend {
        StoreBackend::Sqlite => {
            let store = sqlite::SqliteStore::open(&settings.db_path())?;
            Ok(Box::new(store))
        }
        #[cfg(feature = "remote")]
        StoreBackend::Remote => {
            let store = remote::RestStore::from_settings(&settings.store)?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "remote"))]
        StoreBackend::Remote => Err(PayError::Settings(
            "this build has no remote store support (enable the `remote` feature)".into(),
        )),
    }
}

pub(crate) fn not_found(id: &EntryId) -> PayError {
    PayError::NotFound(id.to_string())
}
