//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use snmap_core::mapping::{Mapping, MappingId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawMapping::from_row`], for every `SELECT`.
pub const MAPPING_COLUMNS: &str =
  "id, sys_id, api_id, api_name, api_version, created_at, updated_at, deleted_at";

/// Raw values read directly from an `api_mappings` row.
pub struct RawMapping {
  pub id:          MappingId,
  pub sys_id:      String,
  pub api_id:      String,
  pub api_name:    String,
  pub api_version: String,
  pub created_at:  String,
  pub updated_at:  String,
  pub deleted_at:  Option<String>,
}

impl RawMapping {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawMapping {
      id:          row.get(0)?,
      sys_id:      row.get(1)?,
      api_id:      row.get(2)?,
      api_name:    row.get(3)?,
      api_version: row.get(4)?,
      created_at:  row.get(5)?,
      updated_at:  row.get(6)?,
      deleted_at:  row.get(7)?,
    })
  }

  pub fn into_mapping(self) -> Result<Mapping> {
    Ok(Mapping {
      id:          self.id,
      sys_id:      self.sys_id,
      api_id:      self.api_id,
      api_name:    self.api_name,
      api_version: self.api_version,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
      deleted_at:  self.deleted_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}
