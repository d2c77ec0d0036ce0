//! Hosted table store speaking the PostgREST dialect (Supabase and friends).
//!
//! Rows live at `{url}/rest/v1/{table}`. Writes ask for
//! `Prefer: return=representation` so an update or delete that matched no
//! row comes back as an empty array, which is reported as `NotFound`.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{PayError, Result};
use crate::models::{EntryId, ShiftEntry};
use crate::settings::StoreSettings;

use super::{not_found, EntryStore};

pub const API_KEY_ENV: &str = "PAYTRACK_API_KEY";

pub struct RestStore {
    client: Client,
    base_url: String,
    table: String,
    api_key: String,
}

/// Strip trailing slashes and a trailing `/rest/v1`, and add a scheme when
/// missing (plain http for localhost).
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }
    while url.ends_with('/') {
        url.pop();
    }
    if let Some(stripped) = url.strip_suffix("/rest/v1") {
        url = stripped.to_string();
    }
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn status_error(status: StatusCode, body: &str) -> PayError {
    let detail = body.trim();
    let msg = match status.as_u16() {
        401 | 403 => "API key is invalid or lacks access to the table".to_string(),
        404 => "table not found".to_string(),
        s if s >= 500 => format!("server error (HTTP {s})"),
        s => format!("unexpected response (HTTP {s})"),
    };
    if detail.is_empty() {
        PayError::Store(msg)
    } else {
        PayError::Store(format!("{msg}: {detail}"))
    }
}

/// Decode a `return=representation` body into rows.
pub fn decode_rows(body: &str) -> Result<Vec<ShiftEntry>> {
    Ok(serde_json::from_str(body)?)
}

/// Rows from a response, or the mapped error for a non-2xx status.
fn rows_from(status: StatusCode, body: &str) -> Result<Vec<ShiftEntry>> {
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    decode_rows(body)
}

/// The stored row echoed back by an insert.
fn inserted_row(status: StatusCode, body: &str) -> Result<ShiftEntry> {
    rows_from(status, body)?
        .into_iter()
        .next()
        .ok_or_else(|| PayError::Store("insert returned no row".into()))
}

/// An update or delete that matched nothing comes back as `[]`.
fn matched_or_not_found(status: StatusCode, body: &str, id: &EntryId) -> Result<()> {
    if rows_from(status, body)?.is_empty() {
        return Err(not_found(id));
    }
    Ok(())
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(PayError::Settings(format!(
                "remote store needs an API key (settings store.api_key or ${API_KEY_ENV})"
            )));
        }
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            table: table.to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn from_settings(store: &StoreSettings) -> Result<Self> {
        let url = store
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| PayError::Settings("remote store needs store.url".into()))?;
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| store.api_key.clone())
            .unwrap_or_default();
        Self::new(url, &store.table, &api_key)
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn id_filter(id: &EntryId) -> String {
        format!("eq.{id}")
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    fn read(resp: Response) -> Result<(StatusCode, String)> {
        let status = resp.status();
        let body = resp.text()?;
        Ok((status, body))
    }
}

impl EntryStore for RestStore {
    fn list(&self) -> Result<Vec<ShiftEntry>> {
        debug!(url = %self.table_url(), "fetching entries");
        let resp = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "date.desc")])
            .send()?;
        let (status, body) = Self::read(resp)?;
        rows_from(status, &body)
    }

    fn insert(&self, entry: &ShiftEntry) -> Result<ShiftEntry> {
        let resp = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[entry.without_id()])
            .send()?;
        let (status, body) = Self::read(resp)?;
        inserted_row(status, &body)
    }

    fn update(&self, id: &EntryId, entry: &ShiftEntry) -> Result<()> {
        let resp = self
            .authed(self.client.patch(self.table_url()))
            .query(&[("id", Self::id_filter(id))])
            .header("Prefer", "return=representation")
            .json(&entry.without_id())
            .send()?;
        let (status, body) = Self::read(resp)?;
        matched_or_not_found(status, &body, id)
    }

    fn delete(&self, id: &EntryId) -> Result<()> {
        let resp = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("id", Self::id_filter(id))])
            .header("Prefer", "return=representation")
            .send()?;
        let (status, body) = Self::read(resp)?;
        matched_or_not_found(status, &body, id)
    }

    fn describe(&self) -> String {
        format!("remote ({})", self.table_url())
    }
}
