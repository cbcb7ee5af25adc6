//! Message — the fundamental unit of a conversation.
//!
//! A message is an immutable, append-only record. Once written, the only
//! field that ever changes is `read_at`, which transitions exactly once
//! from null to a timestamp. Messages are never deleted by normal flow.
//!
//! A conversation is the ordered set of messages for one
//! `(owner_identity, tenant_id)` pair — derived, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which party authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
  Tenant,
  Landlord,
  Team,
}

impl SenderRole {
  /// Whether this role sits on the owner side of the conversation.
  pub fn is_owner_side(self) -> bool {
    matches!(self, Self::Landlord | Self::Team)
  }
}

/// Which side of a conversation is reading it. Determines which
/// counterpart messages a `mark_read` sweep covers and whose unread count
/// is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewer {
  /// The landlord or a delegate; counterpart messages are tenant-authored.
  OwnerSide,
  /// The tenant; counterpart messages are landlord- or team-authored.
  TenantSide,
}

/// One note in a two-party-plus-delegates conversation.
///
/// `landlord_id` is denormalized and nullable: a team delegate may send
/// under an owner whose landlord row is missing, and the message must not
/// be blocked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub id:              Uuid,
  pub owner_identity:  String,
  pub landlord_id:     Option<i64>,
  pub tenant_id:       i64,
  pub tenant_identity: Option<String>,
  pub body:            String,
  pub sender_role:     SenderRole,
  /// Human-readable sender attribution, e.g. "jane (Manager)".
  pub sender_label:    Option<String>,
  /// Server-assigned; never changes after creation.
  pub created_at:      DateTime<Utc>,
  /// Null until the counterpart opens the conversation; set at most once.
  pub read_at:         Option<DateTime<Utc>>,
}

/// Input to [`crate::store::MessagingStore::insert_message`].
/// `id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMessage {
  pub owner_identity:  String,
  pub landlord_id:     Option<i64>,
  pub tenant_id:       i64,
  pub tenant_identity: Option<String>,
  pub body:            String,
  pub sender_role:     SenderRole,
  pub sender_label:    Option<String>,
}
