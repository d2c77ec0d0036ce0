use std::cell::{Cell, RefCell};

use crate::error::{PayError, Result};
use crate::models::{EntryId, ShiftEntry};

use super::{not_found, EntryStore};

/// In-memory table for tests. `offline` makes every call fail like an
/// unreachable server.
#[derive(Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<ShiftEntry>>,
    next_id: Cell<i64>,
    pub offline: Cell<bool>,
    pub calls: Cell<usize>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<ShiftEntry>) -> Self {
        let store = Self::default();
        for row in rows {
            store.push(row);
        }
        store
    }

    fn push(&self, mut row: ShiftEntry) -> ShiftEntry {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        row.id = Some(EntryId::from(id));
        self.rows.borrow_mut().push(row.clone());
        row
    }

    fn check(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.offline.get() {
            return Err(PayError::Store("connection refused".into()));
        }
        Ok(())
    }

    pub fn rows(&self) -> Vec<ShiftEntry> {
        self.rows.borrow().clone()
    }
}

impl EntryStore for MemoryStore {
    fn list(&self) -> Result<Vec<ShiftEntry>> {
        self.check()?;
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    fn insert(&self, entry: &ShiftEntry) -> Result<ShiftEntry> {
        self.check()?;
        Ok(self.push(entry.without_id()))
    }

    fn update(&self, id: &EntryId, entry: &ShiftEntry) -> Result<()> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| not_found(id))?;
        *row = ShiftEntry {
            id: Some(id.clone()),
            ..entry.clone()
        };
        Ok(())
    }

    fn delete(&self, id: &EntryId) -> Result<()> {
        self.check()?;
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|r| r.id.as_ref() != Some(id));
        if rows.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
