//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Enums are stored as
//! their lowercase discriminants. Message UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::{DateTime, Utc};
use rentzentro_core::{
  landlord::Landlord,
  message::{Message, SenderRole},
  team::{MemberStatus, TeamMember, TeamRole},
  tenant::Tenant,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_dt_opt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── TeamRole ────────────────────────────────────────────────────────────────

pub fn encode_team_role(r: TeamRole) -> &'static str {
  match r {
    TeamRole::Manager => "manager",
    TeamRole::Viewer => "viewer",
  }
}

pub fn decode_team_role(s: &str) -> Result<TeamRole> {
  match s {
    "manager" => Ok(TeamRole::Manager),
    "viewer" => Ok(TeamRole::Viewer),
    other => Err(Error::UnknownDiscriminant(format!("team role {other:?}"))),
  }
}

// ─── MemberStatus ────────────────────────────────────────────────────────────

pub fn decode_member_status(s: &str) -> Result<MemberStatus> {
  match s {
    "pending" => Ok(MemberStatus::Pending),
    "active" => Ok(MemberStatus::Active),
    "removed" => Ok(MemberStatus::Removed),
    other => {
      Err(Error::UnknownDiscriminant(format!("member status {other:?}")))
    }
  }
}

// ─── SenderRole ──────────────────────────────────────────────────────────────

pub fn encode_sender_role(r: SenderRole) -> &'static str {
  match r {
    SenderRole::Tenant => "tenant",
    SenderRole::Landlord => "landlord",
    SenderRole::Team => "team",
  }
}

pub fn decode_sender_role(s: &str) -> Result<SenderRole> {
  match s {
    "tenant" => Ok(SenderRole::Tenant),
    "landlord" => Ok(SenderRole::Landlord),
    "team" => Ok(SenderRole::Team),
    other => Err(Error::UnknownDiscriminant(format!("sender role {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `landlords` row.
pub struct RawLandlord {
  pub id:            i64,
  pub auth_identity: Option<String>,
  pub name:          Option<String>,
  pub email:         String,
}

impl RawLandlord {
  pub fn into_landlord(self) -> Landlord {
    Landlord {
      id:            self.id,
      auth_identity: self.auth_identity,
      name:          self.name,
      email:         self.email,
    }
  }
}

/// Raw values read directly from a `team_members` row.
pub struct RawTeamMember {
  pub id:              i64,
  pub owner_identity:  String,
  pub member_identity: Option<String>,
  pub invite_email:    String,
  pub role:            String,
  pub status:          String,
  pub invited_at:      Option<String>,
  pub accepted_at:     Option<String>,
}

impl RawTeamMember {
  pub fn into_member(self) -> Result<TeamMember> {
    Ok(TeamMember {
      id:              self.id,
      owner_identity:  self.owner_identity,
      member_identity: self.member_identity,
      invite_email:    self.invite_email,
      role:            decode_team_role(&self.role)?,
      status:          decode_member_status(&self.status)?,
      invited_at:      decode_dt_opt(self.invited_at.as_deref())?,
      accepted_at:     decode_dt_opt(self.accepted_at.as_deref())?,
    })
  }
}

/// Raw values read directly from a `tenants` row.
pub struct RawTenant {
  pub id:             i64,
  pub owner_identity: String,
  pub auth_identity:  Option<String>,
  pub name:           Option<String>,
  pub email:          String,
  pub status:         Option<String>,
}

impl RawTenant {
  pub fn into_tenant(self) -> Tenant {
    Tenant {
      id:             self.id,
      owner_identity: self.owner_identity,
      auth_identity:  self.auth_identity,
      name:           self.name,
      email:          self.email,
      status:         self.status,
    }
  }
}

/// Raw values read directly from a `messages` row.
pub struct RawMessage {
  pub id:              String,
  pub owner_identity:  String,
  pub landlord_id:     Option<i64>,
  pub tenant_id:       i64,
  pub tenant_identity: Option<String>,
  pub body:            String,
  pub sender_role:     String,
  pub sender_label:    Option<String>,
  pub created_at:      String,
  pub read_at:         Option<String>,
}

impl RawMessage {
  pub fn into_message(self) -> Result<Message> {
    Ok(Message {
      id:              decode_uuid(&self.id)?,
      owner_identity:  self.owner_identity,
      landlord_id:     self.landlord_id,
      tenant_id:       self.tenant_id,
      tenant_identity: self.tenant_identity,
      body:            self.body,
      sender_role:     decode_sender_role(&self.sender_role)?,
      sender_label:    self.sender_label,
      created_at:      decode_dt(&self.created_at)?,
      read_at:         decode_dt_opt(self.read_at.as_deref())?,
    })
  }
}
