//! Caller identity and the resolved owner scope.
//!
//! Every operation in the core runs under an [`OwnerScope`]: the landlord
//! account whose tenants and messages are visible to the caller, regardless
//! of whether the caller is the owner or a delegated team member.

use serde::{Deserialize, Serialize};

/// An authenticated caller as handed over by the upstream session layer.
/// The core never issues or verifies credentials; it only resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
  /// Stable identity token from the authentication provider.
  pub identity: String,
  /// Email the caller authenticated with; used for legacy backfill and
  /// pending-invite matching.
  pub email:    String,
}

impl Caller {
  pub fn new(identity: impl Into<String>, email: impl Into<String>) -> Self {
    Self { identity: identity.into(), email: email.into() }
  }
}

/// Whether the caller is acting as the account owner or as a delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeRole {
  Owner,
  Team,
}

/// The landlord account a resolved caller is allowed to act as.
///
/// `landlord_id` is `None` when the owning landlord row is missing or
/// misconfigured — messaging must still function in that state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerScope {
  /// Auth identity of the owning landlord account.
  pub owner_identity: String,
  /// Numeric landlord row id, when one resolves for the owner.
  pub landlord_id:    Option<i64>,
  pub role:           ScopeRole,
  /// Human-readable sender label for team delegates, e.g. "jane (Manager)".
  /// Always `None` for owners.
  pub member_label:   Option<String>,
}

impl OwnerScope {
  /// Scope for a landlord acting on their own account.
  pub fn owner(owner_identity: impl Into<String>, landlord_id: i64) -> Self {
    Self {
      owner_identity: owner_identity.into(),
      landlord_id:    Some(landlord_id),
      role:           ScopeRole::Owner,
      member_label:   None,
    }
  }

  /// Scope for a delegate acting under someone else's account.
  pub fn team(
    owner_identity: impl Into<String>,
    landlord_id: Option<i64>,
    member_label: impl Into<String>,
  ) -> Self {
    Self {
      owner_identity: owner_identity.into(),
      landlord_id,
      role:           ScopeRole::Team,
      member_label:   Some(member_label.into()),
    }
  }
}
