//! The controller behind every command: owns the loaded entry list, the shift
//! form, the entry being edited and the current view, and talks to the store.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::clipboard::{copy_with_fallback, Clipboard, CopyOutcome};
use crate::clock::Clock;
use crate::error::{PayError, Result};
use crate::filter::{filter_entries, ViewMode};
use crate::i18n::Lang;
use crate::models::{EntryId, PayRates, ShiftEntry};
use crate::pay::ShiftForm;
use crate::report::build_report;
use crate::stats::Stats;
use crate::store::cache::LocalCache;
use crate::store::EntryStore;

/// Where the current entry list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Store,
    Cache,
    /// The store failed and there was no usable snapshot; the list is
    /// now empty.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Inserted(ShiftEntry),
    Updated(EntryId),
}

pub struct Tracker<S: EntryStore = Box<dyn EntryStore>> {
    store: S,
    cache: LocalCache,
    clock: Box<dyn Clock>,
    rates: PayRates,
    lang: Lang,
    entries: Vec<ShiftEntry>,
    form: ShiftForm,
    editing: Option<EntryId>,
    view: ViewMode,
}

impl<S: EntryStore> Tracker<S> {
    pub fn new(store: S, cache: LocalCache, clock: Box<dyn Clock>, rates: PayRates, lang: Lang) -> Self {
        let form = ShiftForm::blank(clock.today());
        Self {
            store,
            cache,
            clock,
            rates,
            lang,
            entries: Vec::new(),
            form,
            editing: None,
            view: ViewMode::default(),
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn entries(&self) -> &[ShiftEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn form(&self) -> &ShiftForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ShiftForm {
        &mut self.form
    }

    #[cfg(test)]
    pub fn editing(&self) -> Option<&EntryId> {
        self.editing.as_ref()
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn cache_path(&self) -> &Path {
        self.cache.path()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fetch the entry list. A store failure is logged and the cached
    /// snapshot, if any, is used instead; this never fails.
    pub fn load(&mut self) -> LoadSource {
        match self.store.list() {
            Ok(entries) => {
                debug!(count = entries.len(), "entries loaded");
                self.entries = entries;
                LoadSource::Store
            }
            Err(e) => {
                error!(error = %e, "failed to fetch entries");
                match self.cache.read() {
                    Some(entries) => {
                        warn!(count = entries.len(), path = %self.cache.path().display(), "using cached entries");
                        self.entries = entries;
                        LoadSource::Cache
                    }
                    None => {
                        self.entries.clear();
                        LoadSource::Empty
                    }
                }
            }
        }
    }

    fn reset_form(&mut self) {
        self.form = ShiftForm::blank(self.clock.today());
        self.editing = None;
    }

    /// Validate the form and write it: an update when editing, an insert
    /// otherwise. On success the list is re-fetched and the form reset; on
    /// any failure nothing local changes.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let entry = self.form.to_entry(&self.rates)?;
        let outcome = match self.editing.clone() {
            Some(id) => {
                self.store.update(&id, &entry).map_err(|e| {
                    error!(id = %id, error = %e, "failed to update entry");
                    e
                })?;
                info!(id = %id, date = %entry.date, hours = entry.hours, "entry updated");
                SaveOutcome::Updated(id)
            }
            None => {
                let stored = self.store.insert(&entry).map_err(|e| {
                    error!(date = %entry.date, error = %e, "failed to insert entry");
                    e
                })?;
                info!(
                    id = stored.id.as_ref().map(EntryId::as_str).unwrap_or_default(),
                    date = %stored.date,
                    hours = stored.hours,
                    "entry saved"
                );
                SaveOutcome::Inserted(stored)
            }
        };
        self.load();
        self.reset_form();
        Ok(outcome)
    }

    /// Load an existing entry into the form for editing.
    pub fn begin_edit(&mut self, id: &EntryId) -> Result<()> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id.as_ref() == Some(id))
            .ok_or_else(|| PayError::NotFound(id.to_string()))?;
        self.form = ShiftForm::from_entry(entry);
        self.editing = Some(id.clone());
        Ok(())
    }

    /// Drop in-progress edits; stored data is untouched.
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    pub fn delete(&mut self, id: &EntryId) -> Result<()> {
        self.store.delete(id).map_err(|e| {
            error!(id = %id, error = %e, "failed to delete entry");
            e
        })?;
        info!(id = %id, "entry deleted");
        self.load();
        Ok(())
    }

    pub fn filtered(&self) -> Vec<&ShiftEntry> {
        filter_entries(&self.entries, &self.view, self.clock.today())
    }

    pub fn stats(&self) -> Stats {
        Stats::from_entries(self.filtered())
    }

    pub fn report(&self) -> Result<String> {
        build_report(self.filtered(), self.lang)
    }

    /// Build the report and put it on the clipboard, or in `fallback` when
    /// the clipboard is unavailable. Nothing is copied for an empty view.
    pub fn copy_report(&self, clipboard: &dyn Clipboard, fallback: &Path) -> Result<CopyOutcome> {
        let text = self.report()?;
        copy_with_fallback(clipboard, &text, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::RecordingClipboard;
    use crate::clock::FixedClock;
    use crate::filter::RecentPeriod;
    use crate::store::cache::write_snapshot;
    use crate::store::memory::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 12).unwrap()
    }

    fn row(date: &str, hours: f64, is_holiday: bool) -> ShiftEntry {
        ShiftEntry {
            id: None,
            date: date.to_string(),
            start_time: None,
            end_time: None,
            hours,
            tips: 0.0,
            is_holiday,
            gross_pay: hours * 10.0,
            deductions: hours,
            net_pay: hours * 9.0,
        }
    }

    fn tracker_with(
        rows: Vec<ShiftEntry>,
        dir: &tempfile::TempDir,
    ) -> Tracker<MemoryStore> {
        let cache = LocalCache::new(dir.path().join("entries-cache.json"));
        let mut t = Tracker::new(
            MemoryStore::with_rows(rows),
            cache,
            Box::new(FixedClock(today())),
            PayRates::default(),
            Lang::En,
        );
        t.load();
        t
    }

    #[test]
    fn test_save_inserts_and_resets_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![], &dir);
        let form = t.form_mut();
        form.date = "2024-01-10".into();
        form.set_start_time(Some("17:00".into()));
        form.set_end_time(Some("23:30".into()));
        form.tips = 42.0;

        let outcome = t.save().unwrap();
        let SaveOutcome::Inserted(stored) = outcome else {
            panic!("expected insert");
        };
        assert_eq!(stored.hours, 6.5);
        assert!((stored.gross_pay - 6.5 * 17.20).abs() < 1e-9);
        assert_eq!(t.entries().len(), 1);
        assert_eq!(t.form(), &ShiftForm::blank(today()));
        assert!(t.editing().is_none());
    }

    #[test]
    fn test_invalid_hours_never_reach_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        let calls = t.store().calls.get();
        t.form_mut().hours = Some(0.0);
        let err = t.save().unwrap_err();
        assert!(matches!(err, PayError::Validation(_)));
        assert_eq!(t.store().calls.get(), calls);
        assert_eq!(t.form().hours, Some(0.0));

        t.form_mut().hours = None;
        assert!(t.save().is_err());
        assert_eq!(t.store().rows().len(), 1);
    }

    #[test]
    fn test_edit_replaces_entry_with_current_rates() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        let id = t.entries()[0].id.clone().unwrap();
        t.begin_edit(&id).unwrap();
        assert_eq!(t.form().hours, Some(8.0));
        assert_eq!(t.editing(), Some(&id));

        t.form_mut().is_holiday = true;
        assert_eq!(t.save().unwrap(), SaveOutcome::Updated(id.clone()));

        let rows = t.store().rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_holiday);
        assert!((rows[0].gross_pay - 8.0 * 17.20 * 1.5).abs() < 1e-9);
        assert!(t.editing().is_none());
    }

    #[test]
    fn test_cancel_edit_keeps_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        let id = t.entries()[0].id.clone().unwrap();
        t.begin_edit(&id).unwrap();
        t.form_mut().hours = Some(1.0);
        t.cancel_edit();
        assert!(t.editing().is_none());
        assert_eq!(t.form(), &ShiftForm::blank(today()));
        assert_eq!(t.store().rows()[0].hours, 8.0);
    }

    #[test]
    fn test_begin_edit_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![], &dir);
        assert!(matches!(t.begin_edit(&EntryId::new("9")), Err(PayError::NotFound(_))));
    }

    #[test]
    fn test_delete_missing_id_leaves_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        let before = t.entries().to_vec();
        let err = t.delete(&EntryId::new("404")).unwrap_err();
        assert!(matches!(err, PayError::NotFound(_)));
        assert_eq!(t.entries(), before.as_slice());
    }

    #[test]
    fn test_delete_refreshes_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false), row("2024-01-09", 4.0, false)], &dir);
        let id = t.entries()[0].id.clone().unwrap();
        t.delete(&id).unwrap();
        assert_eq!(t.entries().len(), 1);
        assert!(t.entries().iter().all(|e| e.id.as_ref() != Some(&id)));
    }

    #[test]
    fn test_write_failure_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        t.store().offline.set(true);
        t.form_mut().hours = Some(5.0);
        assert!(matches!(t.save(), Err(PayError::Store(_))));
        assert_eq!(t.form().hours, Some(5.0));
        assert_eq!(t.entries().len(), 1);
    }

    #[test]
    fn test_load_falls_back_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            &dir.path().join("entries-cache.json"),
            &[row("2023-12-01", 3.0, false), row("2023-12-02", 2.0, true)],
        )
        .unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        t.store().offline.set(true);
        assert_eq!(t.load(), LoadSource::Cache);
        assert_eq!(t.entries().len(), 2);
        assert_eq!(t.entries()[0].date, "2023-12-01");
    }

    #[test]
    fn test_load_without_cache_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::default();
        store.offline.set(true);
        let mut t = Tracker::new(
            store,
            LocalCache::new(dir.path().join("missing.json")),
            Box::new(FixedClock(today())),
            PayRates::default(),
            Lang::En,
        );
        assert_eq!(t.load(), LoadSource::Empty);
        assert!(t.entries().is_empty());
    }

    #[test]
    fn test_failed_reload_without_cache_clears_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        assert_eq!(t.entries().len(), 1);
        t.store().offline.set(true);
        assert_eq!(t.load(), LoadSource::Empty);
        assert!(t.entries().is_empty());
        assert_eq!(t.stats().count, 0);
    }

    #[test]
    fn test_stats_follow_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut t = tracker_with(
            vec![
                row("2023-11-01", 5.0, false),
                row("2024-01-02", 8.0, false),
                row("2024-01-08", 4.0, true),
            ],
            &dir,
        );
        let s = t.stats();
        assert_eq!(s.count, 2);
        assert_eq!(s.regular_hours, 8.0);
        assert_eq!(s.holiday_hours, 4.0);

        t.set_view(ViewMode::from_args(
            Some(RecentPeriod::TwoWeeks),
            Some("2023-01-01".into()),
            Some("2023-12-31".into()),
        ));
        assert_eq!(t.stats().count, 1);
    }

    #[test]
    fn test_report_groups_holidays_then_weeks() {
        let dir = tempfile::tempdir().unwrap();
        let t = tracker_with(
            vec![
                row("2024-01-08", 8.0, false),
                row("2024-01-08", 4.0, true),
                row("2024-01-10", 6.0, false),
            ],
            &dir,
        );
        let report = t.report().unwrap();
        assert!(report.contains("1/8 Mon (4h) [Holiday]\n-> 4.00h\n"));
        assert!(report.contains("1/8 Mon (8h)\n1/10 Wed (6h)\n-> 14.00hrs\n"));
        assert!(report.ends_with("Total: 14.00h"));
    }

    #[test]
    fn test_copy_report_empty_view_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let t = tracker_with(vec![row("2020-01-01", 8.0, false)], &dir);
        let clip = RecordingClipboard::default();
        let fallback = dir.path().join("last-report.txt");
        let err = t.copy_report(&clip, &fallback).unwrap_err();
        assert!(matches!(err, PayError::EmptyReport));
        assert!(clip.copied.borrow().is_empty());
        assert!(!fallback.exists());
    }

    #[test]
    fn test_copy_report_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let t = tracker_with(vec![row("2024-01-08", 8.0, false)], &dir);
        let clip = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        let fallback = dir.path().join("last-report.txt");
        let outcome = t.copy_report(&clip, &fallback).unwrap();
        assert_eq!(outcome, CopyOutcome::File(fallback.clone()));
        assert!(std::fs::read_to_string(&fallback).unwrap().ends_with("Total: 8.00h"));
    }
}
