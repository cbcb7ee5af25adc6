//! Landlord — an owner account.

use serde::{Deserialize, Serialize};

/// An owner account. Owns zero or more tenants and zero or more team
/// grants.
///
/// `auth_identity` is nullable: legacy rows were created before the
/// current authentication provider and are backfilled the first time the
/// owner is resolved by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landlord {
  pub id:            i64,
  pub auth_identity: Option<String>,
  pub name:          Option<String>,
  /// Unique, required; the legacy-backfill lookup key.
  pub email:         String,
}

/// Input for creating a landlord row at signup. The id is assigned by the
/// store; the auth identity may be attached lazily on first resolution.
#[derive(Debug, Clone)]
pub struct NewLandlord {
  pub auth_identity: Option<String>,
  pub name:          Option<String>,
  pub email:         String,
}
