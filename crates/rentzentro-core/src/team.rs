//! Team-member grants and their lifecycle state machine.
//!
//! A grant moves `Pending → Active` exactly once (resolver-driven) and from
//! either state to `Removed` (revoke-driven). `Removed` is absorbing: a
//! removed grant is permanently excluded from resolution, even if the same
//! email logs in again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capability tier of a delegation grant.
///
/// `Viewer` is stored and round-trips through resolution, but no read-only
/// enforcement exists yet — whether it should is a pending product
/// decision, so viewers currently have the same capabilities as managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
  /// Full read/write parity with the owner.
  Manager,
  /// Reserved for future read-only enforcement.
  Viewer,
}

impl TeamRole {
  /// Display form used in sender labels.
  pub fn display(self) -> &'static str {
    match self {
      Self::Manager => "Manager",
      Self::Viewer => "Viewer",
    }
  }
}

/// Lifecycle state of a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
  /// Invited; no authenticated identity has matched the invite email yet.
  Pending,
  /// Resolved at least once; usable for delegation.
  Active,
  /// Revoked or cancelled. Terminal.
  Removed,
}

impl MemberStatus {
  /// A grant in this state participates in caller resolution.
  pub fn is_resolvable(self) -> bool {
    matches!(self, Self::Pending | Self::Active)
  }
}

/// A delegation grant from one landlord (the owner) to another
/// authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
  pub id:              i64,
  /// The granting landlord's auth identity. Legacy rows sometimes stored
  /// the landlord's numeric id here instead; the resolver tolerates both.
  pub owner_identity:  String,
  /// Null until the invitee first authenticates with a matching email.
  pub member_identity: Option<String>,
  pub invite_email:    String,
  pub role:            TeamRole,
  pub status:          MemberStatus,
  pub invited_at:      Option<DateTime<Utc>>,
  pub accepted_at:     Option<DateTime<Utc>>,
}

impl TeamMember {
  /// Sender label shown on messages this delegate writes,
  /// e.g. "jane (Manager)".
  pub fn sender_label(&self) -> String {
    let local = self
      .invite_email
      .split('@')
      .next()
      .unwrap_or(self.invite_email.as_str());
    format!("{local} ({})", self.role.display())
  }
}

/// Input for the owner's invite action. Created `Pending`; `invited_at` is
/// stamped by the store.
#[derive(Debug, Clone)]
pub struct NewTeamInvite {
  pub owner_identity: String,
  pub invite_email:   String,
  pub role:           TeamRole,
}
