//! Mapping: the record linking a ServiceNow `sys_id` to an API
//! id/name/version tuple.
//!
//! A mapping is either *active* (`deleted_at` unset) or *deleted*. Deletion is
//! a one-way transition; deleted rows stay in the table but never surface from
//! a read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned numeric identifier. Monotonically increasing, never reused.
pub type MappingId = i64;

// ─── Field limits ────────────────────────────────────────────────────────────

pub const SYS_ID_MAX_LEN: usize = 32;
pub const API_ID_MAX_LEN: usize = 100;
pub const API_NAME_MAX_LEN: usize = 255;
pub const API_VERSION_MAX_LEN: usize = 50;

// ─── Entity ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
  pub id:          MappingId,
  pub sys_id:      String,
  pub api_id:      String,
  pub api_name:    String,
  pub api_version: String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deleted_at:  Option<DateTime<Utc>>,
}

impl Mapping {
  pub fn is_active(&self) -> bool { self.deleted_at.is_none() }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`MappingService::create_mapping`](crate::service::MappingService::create_mapping).
///
/// Missing JSON fields decode as empty strings so they are rejected by
/// validation rather than by the deserialiser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewMapping {
  pub sys_id:      String,
  pub api_id:      String,
  pub api_name:    String,
  pub api_version: String,
}

impl NewMapping {
  pub fn new(
    sys_id: impl Into<String>,
    api_id: impl Into<String>,
    api_name: impl Into<String>,
    api_version: impl Into<String>,
  ) -> Self {
    Self {
      sys_id:      sys_id.into(),
      api_id:      api_id.into(),
      api_name:    api_name.into(),
      api_version: api_version.into(),
    }
  }
}

/// Partial update. `None` and `Some("")` both leave the field untouched.
///
/// `sys_id` is not updatable and therefore has no field here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingPatch {
  pub api_id:      Option<String>,
  pub api_name:    Option<String>,
  pub api_version: Option<String>,
}

impl MappingPatch {
  /// Overwrite `mapping`'s fields with every non-empty value in this patch.
  pub fn apply_to(self, mapping: &mut Mapping) {
    if let Some(api_id) = non_empty(self.api_id) {
      mapping.api_id = api_id;
    }
    if let Some(api_name) = non_empty(self.api_name) {
      mapping.api_name = api_name;
    }
    if let Some(api_version) = non_empty(self.api_version) {
      mapping.api_version = api_version;
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}
