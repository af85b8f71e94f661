//! [`SqliteStore`], the SQLite implementation of [`MappingStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use snmap_core::{
  mapping::{Mapping, MappingId, NewMapping},
  store::MappingStore,
};
use tracing::debug;

use crate::{
  Error, Result,
  encode::{MAPPING_COLUMNS, RawMapping, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A mapping store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch the first active row matching `filter`, in `id` order.
  ///
  /// `what` describes the lookup key for the not-found message.
  async fn find_one(
    &self,
    filter: &'static str,
    params: Vec<Value>,
    what: String,
  ) -> Result<Mapping> {
    let sql = format!(
      "SELECT {MAPPING_COLUMNS} FROM api_mappings
       WHERE {filter} AND deleted_at IS NULL
       ORDER BY id
       LIMIT 1"
    );

    let raw: Option<RawMapping> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &sql,
              rusqlite::params_from_iter(params),
              RawMapping::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.ok_or(Error::NotFound(what))?.into_mapping()
  }
}

// ─── MappingStore impl ───────────────────────────────────────────────────────

impl MappingStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, input: NewMapping) -> Result<Mapping> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let row    = input.clone();

    let id: MappingId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO api_mappings (
             sys_id, api_id, api_name, api_version, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![
            row.sys_id,
            row.api_id,
            row.api_name,
            row.api_version,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;

    Ok(Mapping {
      id,
      sys_id:      input.sys_id,
      api_id:      input.api_id,
      api_name:    input.api_name,
      api_version: input.api_version,
      created_at:  now,
      updated_at:  now,
      deleted_at:  None,
    })
  }

  async fn update(&self, mut mapping: Mapping) -> Result<Mapping> {
    mapping.updated_at = Utc::now();

    let id          = mapping.id;
    let sys_id      = mapping.sys_id.clone();
    let api_id      = mapping.api_id.clone();
    let api_name    = mapping.api_name.clone();
    let api_version = mapping.api_version.clone();
    let at_str      = encode_dt(mapping.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE api_mappings
           SET sys_id = ?1, api_id = ?2, api_name = ?3, api_version = ?4,
               updated_at = ?5
           WHERE id = ?6 AND deleted_at IS NULL",
          rusqlite::params![sys_id, api_id, api_name, api_version, at_str, id],
        )?)
      })
      .await
      .map_err(Error::from_write)?;

    if changed == 0 {
      return Err(Error::NotFound(format!("id {id}")));
    }
    Ok(mapping)
  }

  async fn delete(&self, id: MappingId) -> Result<()> {
    let at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE api_mappings SET deleted_at = ?1
           WHERE id = ?2 AND deleted_at IS NULL",
          rusqlite::params![at_str, id],
        )?)
      })
      .await?;

    if changed == 0 {
      debug!(id, "delete matched no active mapping");
    }
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_by_id(&self, id: MappingId) -> Result<Mapping> {
    self
      .find_one("id = ?1", vec![Value::Integer(id)], format!("id {id}"))
      .await
  }

  async fn get_by_sys_id(&self, sys_id: &str) -> Result<Mapping> {
    self
      .find_one(
        "sys_id = ?1",
        vec![Value::Text(sys_id.to_owned())],
        format!("sys_id {sys_id:?}"),
      )
      .await
  }

  async fn get_by_api_id(&self, api_id: &str) -> Result<Mapping> {
    self
      .find_one(
        "api_id = ?1",
        vec![Value::Text(api_id.to_owned())],
        format!("api_id {api_id:?}"),
      )
      .await
  }

  async fn get_by_name_and_version(
    &self,
    api_name: &str,
    api_version: &str,
  ) -> Result<Mapping> {
    self
      .find_one(
        "api_name = ?1 AND api_version = ?2",
        vec![
          Value::Text(api_name.to_owned()),
          Value::Text(api_version.to_owned()),
        ],
        format!("api_name {api_name:?} version {api_version:?}"),
      )
      .await
  }

  async fn get_all(&self) -> Result<Vec<Mapping>> {
    let raws: Vec<RawMapping> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MAPPING_COLUMNS} FROM api_mappings
           WHERE deleted_at IS NULL
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawMapping::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMapping::into_mapping).collect()
  }
}
