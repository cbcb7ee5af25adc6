//! Tenant — a renter account scoped to exactly one owner.

use serde::{Deserialize, Serialize};

/// A renter account. Reachable for messaging by its owner and by any
/// active team member of that owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
  pub id:             i64,
  /// The owning landlord's auth identity.
  pub owner_identity: String,
  /// Null until the tenant first logs into the portal.
  pub auth_identity:  Option<String>,
  pub name:           Option<String>,
  pub email:          String,
  pub status:         Option<String>,
}

/// Input for creating a tenant row. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTenant {
  pub owner_identity: String,
  pub auth_identity:  Option<String>,
  pub name:           Option<String>,
  pub email:          String,
  pub status:         Option<String>,
}
