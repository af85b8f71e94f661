//! Integration tests for `SqliteStore` against an in-memory database.

use snmap_core::{
  mapping::{MappingPatch, NewMapping},
  service::MappingService,
  store::MappingStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn orders() -> NewMapping { NewMapping::new("SYS001", "API100", "orders", "1.0") }

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_increasing_ids_and_timestamps() {
  let s = store().await;

  let first = s.create(orders()).await.unwrap();
  let second = s
    .create(NewMapping::new("SYS002", "API100", "orders", "2.0"))
    .await
    .unwrap();

  assert_eq!(first.id, 1);
  assert!(second.id > first.id);
  assert_eq!(first.created_at, first.updated_at);
  assert!(first.is_active());
}

#[tokio::test]
async fn duplicate_sys_id_is_a_constraint_violation() {
  let s = store().await;
  s.create(orders()).await.unwrap();

  let err = s
    .create(NewMapping::new("SYS001", "API200", "billing", "1.0"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)), "got {err:?}");
}

#[tokio::test]
async fn duplicate_name_and_version_is_a_constraint_violation() {
  let s = store().await;
  s.create(orders()).await.unwrap();

  let err = s
    .create(NewMapping::new("SYS002", "API200", "orders", "1.0"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)), "got {err:?}");
}

#[tokio::test]
async fn api_id_may_repeat() {
  let s = store().await;
  s.create(orders()).await.unwrap();
  s.create(NewMapping::new("SYS002", "API100", "orders", "2.0"))
    .await
    .unwrap();

  // First match in id order wins.
  let found = s.get_by_api_id("API100").await.unwrap();
  assert_eq!(found.sys_id, "SYS001");
}

#[tokio::test]
async fn nul_bearing_sys_id_is_stored_as_given() {
  let svc = MappingService::new(store().await);

  let created = svc
    .create_mapping(NewMapping::new("\0SYS", "API100", "orders", "1.0"))
    .await
    .unwrap();
  assert_eq!(created.sys_id, "\0SYS");

  let fetched = svc.get_mapping_by_sys_id("\0SYS").await.unwrap();
  assert_eq!(fetched, created);
}

#[test]
fn only_unique_failures_classify_as_constraint_violations() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  conn
    .execute_batch(
      "CREATE TABLE t (k TEXT NOT NULL);
       CREATE UNIQUE INDEX t_k ON t(k);
       INSERT INTO t (k) VALUES ('a');",
    )
    .unwrap();

  let unique = conn.execute("INSERT INTO t (k) VALUES ('a')", []).unwrap_err();
  let not_null = conn.execute("INSERT INTO t (k) VALUES (NULL)", []).unwrap_err();

  assert!(matches!(
    Error::from_write(tokio_rusqlite::Error::Rusqlite(unique)),
    Error::ConstraintViolation(_)
  ));
  assert!(matches!(
    Error::from_write(tokio_rusqlite::Error::Rusqlite(not_null)),
    Error::Database(_)
  ));
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lookups_round_trip_all_fields() {
  let s = store().await;
  let created = s.create(orders()).await.unwrap();

  let by_sys = s.get_by_sys_id("SYS001").await.unwrap();
  let by_api = s.get_by_api_id("API100").await.unwrap();
  let by_nv = s.get_by_name_and_version("orders", "1.0").await.unwrap();
  let by_id = s.get_by_id(created.id).await.unwrap();

  for m in [by_sys, by_api, by_nv, by_id] {
    assert_eq!(m, created);
  }
}

#[tokio::test]
async fn missing_lookups_are_not_found() {
  let s = store().await;
  assert!(matches!(s.get_by_id(1).await, Err(Error::NotFound(_))));
  assert!(matches!(s.get_by_sys_id("nope").await, Err(Error::NotFound(_))));
  assert!(matches!(s.get_by_api_id("nope").await, Err(Error::NotFound(_))));
  assert!(matches!(
    s.get_by_name_and_version("orders", "9.9").await,
    Err(Error::NotFound(_))
  ));
}

#[tokio::test]
async fn get_all_on_empty_store_is_empty() {
  let s = store().await;
  assert!(s.get_all().await.unwrap().is_empty());
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_persists_replacement_state() {
  let s = store().await;
  let mut m = s.create(orders()).await.unwrap();
  m.api_name = "purchase-orders".into();

  let updated = s.update(m.clone()).await.unwrap();
  assert!(updated.updated_at >= m.created_at);

  let fetched = s.get_by_id(m.id).await.unwrap();
  assert_eq!(fetched.api_name, "purchase-orders");
  assert_eq!(fetched.created_at, m.created_at);
}

#[tokio::test]
async fn update_of_deleted_mapping_is_not_found() {
  let s = store().await;
  let m = s.create(orders()).await.unwrap();
  s.delete(m.id).await.unwrap();

  let err = s.update(m).await.unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn update_into_taken_name_and_version_is_a_constraint_violation() {
  let s = store().await;
  s.create(orders()).await.unwrap();
  let mut other = s
    .create(NewMapping::new("SYS002", "API200", "orders", "2.0"))
    .await
    .unwrap();

  other.api_version = "1.0".into();
  let err = s.update(other).await.unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)));
}

// ─── Soft delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleted_mapping_disappears_from_every_read() {
  let s = store().await;
  let m = s.create(orders()).await.unwrap();
  let kept = s
    .create(NewMapping::new("SYS002", "API200", "billing", "1.0"))
    .await
    .unwrap();

  s.delete(m.id).await.unwrap();

  assert!(matches!(s.get_by_id(m.id).await, Err(Error::NotFound(_))));
  assert!(matches!(s.get_by_sys_id("SYS001").await, Err(Error::NotFound(_))));
  assert!(matches!(s.get_by_api_id("API100").await, Err(Error::NotFound(_))));
  assert!(matches!(
    s.get_by_name_and_version("orders", "1.0").await,
    Err(Error::NotFound(_))
  ));

  let all = s.get_all().await.unwrap();
  assert_eq!(all, vec![kept]);
}

#[tokio::test]
async fn delete_is_idempotent() {
  let s = store().await;
  let m = s.create(orders()).await.unwrap();

  s.delete(m.id).await.unwrap();
  s.delete(m.id).await.unwrap();
  s.delete(999).await.unwrap();
}

#[tokio::test]
async fn deleted_keys_can_be_reused() {
  let s = store().await;
  let old = s.create(orders()).await.unwrap();
  s.delete(old.id).await.unwrap();

  let new = s.create(orders()).await.unwrap();
  assert!(new.id > old.id);
  assert_eq!(s.get_by_sys_id("SYS001").await.unwrap().id, new.id);
}

// ─── Service over SQLite ─────────────────────────────────────────────────────

#[tokio::test]
async fn service_create_lookup_delete_scenario() {
  let svc = MappingService::new(store().await);

  let created = svc.create_mapping(orders()).await.unwrap();
  assert_eq!(created.id, 1);

  let found = svc
    .get_mapping_by_name_and_version("orders", "1.0")
    .await
    .unwrap();
  assert_eq!(found, created);

  svc.delete_mapping(1).await.unwrap();

  let err = svc.get_mapping_by_sys_id("SYS001").await.unwrap_err();
  assert!(matches!(err, snmap_core::Error::NotFound(_)));
}

#[tokio::test]
async fn service_surfaces_constraint_violation_kind() {
  let svc = MappingService::new(store().await);
  svc.create_mapping(orders()).await.unwrap();

  let err = svc.create_mapping(orders()).await.unwrap_err();
  assert!(matches!(err, snmap_core::Error::ConstraintViolation(_)));
}

#[tokio::test]
async fn service_validation_failure_writes_nothing() {
  let svc = MappingService::new(store().await);

  let err = svc
    .create_mapping(NewMapping::new("SYS001", "API100", "", "1.0"))
    .await
    .unwrap_err();
  assert!(matches!(err, snmap_core::Error::Validation(_)));
  assert!(svc.get_all_mappings().await.unwrap().is_empty());
}

#[tokio::test]
async fn service_update_changes_only_version() {
  let svc = MappingService::new(store().await);
  let created = svc.create_mapping(orders()).await.unwrap();

  let patch = MappingPatch {
    api_version: Some("v2".into()),
    ..MappingPatch::default()
  };
  let updated = svc.update_mapping(created.id, patch).await.unwrap();

  assert_eq!(updated.api_version, "v2");
  assert_eq!(updated.sys_id, created.sys_id);
  assert_eq!(updated.api_id, created.api_id);
  assert_eq!(updated.api_name, created.api_name);

  let fetched = svc.get_mapping_by_sys_id("SYS001").await.unwrap();
  assert_eq!(fetched.api_version, "v2");
}

#[tokio::test]
async fn service_update_unknown_or_deleted_id_is_not_found() {
  let svc = MappingService::new(store().await);
  let created = svc.create_mapping(orders()).await.unwrap();

  let err = svc
    .update_mapping(created.id + 1, MappingPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, snmap_core::Error::NotFound(_)));

  svc.delete_mapping(created.id).await.unwrap();
  let err = svc
    .update_mapping(created.id, MappingPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, snmap_core::Error::NotFound(_)));
}
