//! [`SqliteStore`] — the SQLite implementation of [`MessagingStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use rentzentro_core::{
  landlord::{Landlord, NewLandlord},
  message::{Message, NewMessage, Viewer},
  store::{MessagingStore, UnreadCount},
  team::{MemberStatus, NewTeamInvite, TeamMember},
  tenant::{NewTenant, Tenant},
};

use crate::{
  encode::{
    RawLandlord, RawMessage, RawTeamMember, RawTenant, encode_dt,
    encode_sender_role, encode_team_role, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

const MEMBER_COLUMNS: &str = "id, owner_identity, member_identity, \
   invite_email, role, status, invited_at, accepted_at";

const MESSAGE_COLUMNS: &str = "id, owner_identity, landlord_id, tenant_id, \
   tenant_identity, body, sender_role, sender_label, created_at, read_at";

fn member_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTeamMember> {
  Ok(RawTeamMember {
    id:              row.get(0)?,
    owner_identity:  row.get(1)?,
    member_identity: row.get(2)?,
    invite_email:    row.get(3)?,
    role:            row.get(4)?,
    status:          row.get(5)?,
    invited_at:      row.get(6)?,
    accepted_at:     row.get(7)?,
  })
}

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMessage> {
  Ok(RawMessage {
    id:              row.get(0)?,
    owner_identity:  row.get(1)?,
    landlord_id:     row.get(2)?,
    tenant_id:       row.get(3)?,
    tenant_identity: row.get(4)?,
    body:            row.get(5)?,
    sender_role:     row.get(6)?,
    sender_label:    row.get(7)?,
    created_at:      row.get(8)?,
    read_at:         row.get(9)?,
  })
}

fn landlord_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawLandlord> {
  Ok(RawLandlord {
    id:            row.get(0)?,
    auth_identity: row.get(1)?,
    name:          row.get(2)?,
    email:         row.get(3)?,
  })
}

fn tenant_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTenant> {
  Ok(RawTenant {
    id:             row.get(0)?,
    owner_identity: row.get(1)?,
    auth_identity:  row.get(2)?,
    name:           row.get(3)?,
    email:          row.get(4)?,
    status:         row.get(5)?,
  })
}

/// Which side of the conversation a viewer reads; used to build the
/// `sender_role` filter for unread queries and the read sweep.
fn counterpart_filter(viewer: Viewer) -> &'static str {
  match viewer {
    Viewer::OwnerSide => "sender_role = 'tenant'",
    Viewer::TenantSide => "sender_role IN ('landlord', 'team')",
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A RentZentro messaging store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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

  async fn landlord_row(
    &self,
    where_clause: &'static str,
    param: String,
  ) -> Result<Option<Landlord>> {
    let raw: Option<RawLandlord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT id, auth_identity, name, email FROM landlords \
                 WHERE {where_clause}"
              ),
              rusqlite::params![param],
              landlord_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawLandlord::into_landlord))
  }

  async fn member_row(
    &self,
    where_clause: &'static str,
    param: String,
  ) -> Result<Option<TeamMember>> {
    let raw: Option<RawTeamMember> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {MEMBER_COLUMNS} FROM team_members \
                 WHERE {where_clause} ORDER BY id LIMIT 1"
              ),
              rusqlite::params![param],
              member_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawTeamMember::into_member).transpose()
  }

  async fn member_by_id(&self, id: i64) -> Result<Option<TeamMember>> {
    let raw: Option<RawTeamMember> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MEMBER_COLUMNS} FROM team_members WHERE id = ?1"),
              rusqlite::params![id],
              member_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    raw.map(RawTeamMember::into_member).transpose()
  }

  async fn tenant_row(
    &self,
    where_clause: &'static str,
    param: String,
  ) -> Result<Option<Tenant>> {
    let raw: Option<RawTenant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT id, owner_identity, auth_identity, name, email, status \
                 FROM tenants WHERE {where_clause} ORDER BY id LIMIT 1"
              ),
              rusqlite::params![param],
              tenant_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawTenant::into_tenant))
  }
}

// ─── MessagingStore impl ─────────────────────────────────────────────────────

impl MessagingStore for SqliteStore {
  type Error = Error;

  // ── Landlords ─────────────────────────────────────────────────────────────

  async fn add_landlord(&self, input: NewLandlord) -> Result<Landlord> {
    let NewLandlord { auth_identity, name, email } = input;

    let (identity, name_val, email_val) =
      (auth_identity.clone(), name.clone(), email.clone());
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO landlords (auth_identity, name, email) \
           VALUES (?1, ?2, ?3)",
          rusqlite::params![identity, name_val, email_val],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Landlord { id, auth_identity, name, email })
  }

  async fn landlord_by_identity(
    &self,
    identity: &str,
  ) -> Result<Option<Landlord>> {
    self
      .landlord_row("auth_identity = ?1", identity.to_owned())
      .await
  }

  async fn landlord_by_id(&self, id: i64) -> Result<Option<Landlord>> {
    let raw: Option<RawLandlord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, auth_identity, name, email FROM landlords \
               WHERE id = ?1",
              rusqlite::params![id],
              landlord_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawLandlord::into_landlord))
  }

  async fn landlord_by_email_unclaimed(
    &self,
    email: &str,
  ) -> Result<Option<Landlord>> {
    self
      .landlord_row(
        "email = ?1 AND auth_identity IS NULL",
        email.to_owned(),
      )
      .await
  }

  async fn attach_landlord_identity(
    &self,
    id: i64,
    identity: &str,
  ) -> Result<Landlord> {
    let identity_owned = identity.to_owned();
    self
      .conn
      .call(move |conn| {
        // Guarded on NULL so a row that already carries an identity is
        // never overwritten.
        conn.execute(
          "UPDATE landlords SET auth_identity = ?2 \
           WHERE id = ?1 AND auth_identity IS NULL",
          rusqlite::params![id, identity_owned],
        )?;
        Ok(())
      })
      .await?;

    self
      .landlord_by_id(id)
      .await?
      .ok_or(Error::LandlordNotFound(id))
  }

  // ── Team members ──────────────────────────────────────────────────────────

  async fn invite_team_member(
    &self,
    input: NewTeamInvite,
  ) -> Result<TeamMember> {
    let NewTeamInvite { owner_identity, invite_email, role } = input;
    let invited_at = Utc::now();

    let (owner, email, role_str, at_str) = (
      owner_identity.clone(),
      invite_email.clone(),
      encode_team_role(role).to_owned(),
      encode_dt(invited_at),
    );
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO team_members \
             (owner_identity, invite_email, role, status, invited_at) \
           VALUES (?1, ?2, ?3, 'pending', ?4)",
          rusqlite::params![owner, email, role_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(TeamMember {
      id,
      owner_identity,
      member_identity: None,
      invite_email,
      role,
      status: MemberStatus::Pending,
      invited_at: Some(invited_at),
      accepted_at: None,
    })
  }

  async fn active_member_by_identity(
    &self,
    identity: &str,
  ) -> Result<Option<TeamMember>> {
    self
      .member_row(
        "member_identity = ?1 AND status = 'active'",
        identity.to_owned(),
      )
      .await
  }

  async fn resolvable_member_by_email(
    &self,
    email: &str,
  ) -> Result<Option<TeamMember>> {
    self
      .member_row(
        "invite_email = ?1 AND status IN ('pending', 'active')",
        email.to_owned(),
      )
      .await
  }

  async fn activate_team_member(
    &self,
    id: i64,
    member_identity: &str,
  ) -> Result<TeamMember> {
    let member = self.member_by_id(id).await?.ok_or(Error::MemberNotFound(id))?;

    match member.status {
      // Removed is terminal; no resolver path may resurrect it.
      MemberStatus::Removed => return Err(Error::MemberRemoved(id)),
      // Already active: idempotent no-op.
      MemberStatus::Active => return Ok(member),
      MemberStatus::Pending => {}
    }

    let identity_owned = member_identity.to_owned();
    let accepted_str = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE team_members \
           SET status = 'active', member_identity = ?2, accepted_at = ?3 \
           WHERE id = ?1 AND status = 'pending'",
          rusqlite::params![id, identity_owned, accepted_str],
        )?;
        Ok(())
      })
      .await?;

    self.member_by_id(id).await?.ok_or(Error::MemberNotFound(id))
  }

  async fn revoke_team_member(
    &self,
    owner_identity: &str,
    legacy_ref: Option<&str>,
    id: i64,
  ) -> Result<Option<TeamMember>> {
    let owner_owned = owner_identity.to_owned();
    let legacy_owned = legacy_ref.map(str::to_owned);
    let matched: usize = self
      .conn
      .call(move |conn| {
        // A NULL ?3 never matches, so grants stay owner-scoped when no
        // legacy reference exists.
        Ok(conn.execute(
          "UPDATE team_members SET status = 'removed' \
           WHERE id = ?1 AND (owner_identity = ?2 OR owner_identity = ?3)",
          rusqlite::params![id, owner_owned, legacy_owned],
        )?)
      })
      .await?;

    if matched == 0 {
      return Ok(None);
    }
    self.member_by_id(id).await
  }

  async fn list_team_members(
    &self,
    owner_identity: &str,
    legacy_ref: Option<&str>,
  ) -> Result<Vec<TeamMember>> {
    let owner_owned = owner_identity.to_owned();
    let legacy_owned = legacy_ref.map(str::to_owned);
    let raws: Vec<RawTeamMember> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MEMBER_COLUMNS} FROM team_members \
           WHERE owner_identity = ?1 OR owner_identity = ?2 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![owner_owned, legacy_owned],
            member_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTeamMember::into_member).collect()
  }

  // ── Tenants ───────────────────────────────────────────────────────────────

  async fn add_tenant(&self, input: NewTenant) -> Result<Tenant> {
    let NewTenant { owner_identity, auth_identity, name, email, status } =
      input;

    let (owner, identity, name_val, email_val, status_val) = (
      owner_identity.clone(),
      auth_identity.clone(),
      name.clone(),
      email.clone(),
      status.clone(),
    );
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO tenants (owner_identity, auth_identity, name, email, status) \
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![owner, identity, name_val, email_val, status_val],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Tenant { id, owner_identity, auth_identity, name, email, status })
  }

  async fn tenant_by_id(&self, id: i64) -> Result<Option<Tenant>> {
    let raw: Option<RawTenant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, owner_identity, auth_identity, name, email, status \
               FROM tenants WHERE id = ?1",
              rusqlite::params![id],
              tenant_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw.map(RawTenant::into_tenant))
  }

  async fn tenant_by_identity(
    &self,
    identity: &str,
  ) -> Result<Option<Tenant>> {
    self
      .tenant_row("auth_identity = ?1", identity.to_owned())
      .await
  }

  async fn tenant_by_email_unclaimed(
    &self,
    email: &str,
  ) -> Result<Option<Tenant>> {
    self
      .tenant_row("email = ?1 AND auth_identity IS NULL", email.to_owned())
      .await
  }

  async fn attach_tenant_identity(
    &self,
    id: i64,
    identity: &str,
  ) -> Result<Tenant> {
    let identity_owned = identity.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE tenants SET auth_identity = ?2 \
           WHERE id = ?1 AND auth_identity IS NULL",
          rusqlite::params![id, identity_owned],
        )?;
        Ok(())
      })
      .await?;

    self.tenant_by_id(id).await?.ok_or(Error::TenantNotFound(id))
  }

  async fn list_tenants(&self, owner_identity: &str) -> Result<Vec<Tenant>> {
    let owner_owned = owner_identity.to_owned();
    let raws: Vec<RawTenant> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, owner_identity, auth_identity, name, email, status \
           FROM tenants WHERE owner_identity = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_owned], tenant_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawTenant::into_tenant).collect())
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  async fn insert_message(&self, input: NewMessage) -> Result<Message> {
    let message = Message {
      id:              Uuid::new_v4(),
      owner_identity:  input.owner_identity,
      landlord_id:     input.landlord_id,
      tenant_id:       input.tenant_id,
      tenant_identity: input.tenant_identity,
      body:            input.body,
      sender_role:     input.sender_role,
      sender_label:    input.sender_label,
      created_at:      Utc::now(),
      read_at:         None,
    };

    let id_str       = encode_uuid(message.id);
    let owner        = message.owner_identity.clone();
    let landlord_id  = message.landlord_id;
    let tenant_id    = message.tenant_id;
    let tenant_ident = message.tenant_identity.clone();
    let body         = message.body.clone();
    let role_str     = encode_sender_role(message.sender_role).to_owned();
    let label        = message.sender_label.clone();
    let created_str  = encode_dt(message.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO messages (
             id, owner_identity, landlord_id, tenant_id, tenant_identity,
             body, sender_role, sender_label, created_at, read_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL)",
          rusqlite::params![
            id_str,
            owner,
            landlord_id,
            tenant_id,
            tenant_ident,
            body,
            role_str,
            label,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn conversation_messages(
    &self,
    owner_identity: &str,
    tenant_id: i64,
  ) -> Result<Vec<Message>> {
    let owner_owned = owner_identity.to_owned();
    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MESSAGE_COLUMNS} FROM messages \
           WHERE owner_identity = ?1 AND tenant_id = ?2 \
           ORDER BY created_at ASC, id ASC"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![owner_owned, tenant_id],
            message_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }

  async fn unread_count(
    &self,
    owner_identity: &str,
    tenant_id: i64,
    viewer: Viewer,
  ) -> Result<u32> {
    let owner_owned = owner_identity.to_owned();
    let filter = counterpart_filter(viewer);
    let count: u32 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "SELECT COUNT(*) FROM messages \
             WHERE owner_identity = ?1 AND tenant_id = ?2 \
               AND {filter} AND read_at IS NULL"
          ),
          rusqlite::params![owner_owned, tenant_id],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(count)
  }

  async fn unread_counts(
    &self,
    owner_identity: &str,
  ) -> Result<Vec<UnreadCount>> {
    let owner_owned = owner_identity.to_owned();
    let rows: Vec<UnreadCount> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT tenant_id, COUNT(*) FROM messages \
           WHERE owner_identity = ?1 \
             AND sender_role = 'tenant' AND read_at IS NULL \
           GROUP BY tenant_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner_owned], |row| {
            Ok(UnreadCount { tenant_id: row.get(0)?, count: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn mark_read(
    &self,
    owner_identity: &str,
    tenant_id: i64,
    viewer: Viewer,
  ) -> Result<usize> {
    let owner_owned = owner_identity.to_owned();
    let filter = counterpart_filter(viewer);
    let read_str = encode_dt(Utc::now());

    let stamped: usize = self
      .conn
      .call(move |conn| {
        // Guarded on `read_at IS NULL`: already-read rows are never
        // overwritten, so concurrent sweeps are safe no-ops.
        Ok(conn.execute(
          &format!(
            "UPDATE messages SET read_at = ?3 \
             WHERE owner_identity = ?1 AND tenant_id = ?2 \
               AND {filter} AND read_at IS NULL"
          ),
          rusqlite::params![owner_owned, tenant_id, read_str],
        )?)
      })
      .await?;
    Ok(stamped)
  }
}
