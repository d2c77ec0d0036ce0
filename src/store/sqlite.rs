use std::path::Path;

use rusqlite::{params, Connection, Row};

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::models::{EntryId, ShiftEntry};

use super::{not_found, EntryStore};

const COLUMNS: &str =
    "id, date, start_time, end_time, hours, tips, is_holiday, gross_pay, deductions, net_pay";

pub struct SqliteStore {
    conn: Connection,
    path: String,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        init_db(&conn)?;
        Ok(Self {
            conn,
            path: db_path.display().to_string(),
        })
    }

    fn row_id(id: &EntryId) -> Option<i64> {
        id.as_str().parse().ok()
    }
}

fn entry_from_row(row: &Row) -> rusqlite::Result<ShiftEntry> {
    let id: i64 = row.get(0)?;
    let start_time: Option<String> = row.get(2)?;
    let end_time: Option<String> = row.get(3)?;
    Ok(ShiftEntry {
        id: Some(EntryId::from(id)),
        date: row.get(1)?,
        start_time: start_time.filter(|s| !s.is_empty()),
        end_time: end_time.filter(|s| !s.is_empty()),
        hours: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
        tips: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
        is_holiday: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
        gross_pay: row.get::<_, Option<f64>>(7)?.unwrap_or(0.0),
        deductions: row.get::<_, Option<f64>>(8)?.unwrap_or(0.0),
        net_pay: row.get::<_, Option<f64>>(9)?.unwrap_or(0.0),
    })
}

impl EntryStore for SqliteStore {
    fn list(&self) -> Result<Vec<ShiftEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM payroll_entries ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt
            .query_map([], entry_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn insert(&self, entry: &ShiftEntry) -> Result<ShiftEntry> {
        self.conn.execute(
            "INSERT INTO payroll_entries \
             (date, start_time, end_time, hours, tips, is_holiday, gross_pay, deductions, net_pay) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.date,
                entry.start_time,
                entry.end_time,
                entry.hours,
                entry.tips,
                entry.is_holiday,
                entry.gross_pay,
                entry.deductions,
                entry.net_pay,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        let stored = self.conn.query_row(
            &format!("SELECT {COLUMNS} FROM payroll_entries WHERE id = ?1"),
            [id],
            entry_from_row,
        )?;
        Ok(stored)
    }

    fn update(&self, id: &EntryId, entry: &ShiftEntry) -> Result<()> {
        let row_id = Self::row_id(id).ok_or_else(|| not_found(id))?;
        let changed = self.conn.execute(
            "UPDATE payroll_entries SET date = ?1, start_time = ?2, end_time = ?3, hours = ?4, \
             tips = ?5, is_holiday = ?6, gross_pay = ?7, deductions = ?8, net_pay = ?9 \
             WHERE id = ?10",
            params![
                entry.date,
                entry.start_time,
                entry.end_time,
                entry.hours,
                entry.tips,
                entry.is_holiday,
                entry.gross_pay,
                entry.deductions,
                entry.net_pay,
                row_id,
            ],
        )?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn delete(&self, id: &EntryId) -> Result<()> {
        let row_id = Self::row_id(id).ok_or_else(|| not_found(id))?;
        let changed = self
            .conn
            .execute("DELETE FROM payroll_entries WHERE id = ?1", [row_id])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite ({})", self.path)
    }
}
