//! The `MessagingStore` trait and supporting summary types.
//!
//! The trait is implemented by storage backends (e.g.
//! `rentzentro-store-sqlite`). Higher layers (`rentzentro-service`,
//! `rentzentro-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  landlord::{Landlord, NewLandlord},
  message::{Message, NewMessage, Viewer},
  team::{NewTeamInvite, TeamMember},
  tenant::{NewTenant, Tenant},
};

// ─── Summary type ────────────────────────────────────────────────────────────

/// Per-tenant unread tally, as returned by
/// [`MessagingStore::unread_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnreadCount {
  pub tenant_id: i64,
  pub count:     u32,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a RentZentro messaging-store backend.
///
/// Messages are append-only: the only mutation ever issued against a
/// stored message is the single batch `read_at` sweep in
/// [`mark_read`](Self::mark_read), which is idempotent and monotonic.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait MessagingStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Landlords ─────────────────────────────────────────────────────────

  /// Create and persist a landlord row (the signup path).
  fn add_landlord(
    &self,
    input: NewLandlord,
  ) -> impl Future<Output = Result<Landlord, Self::Error>> + Send + '_;

  /// Look up a landlord by attached auth identity.
  fn landlord_by_identity<'a>(
    &'a self,
    identity: &'a str,
  ) -> impl Future<Output = Result<Option<Landlord>, Self::Error>> + Send + 'a;

  /// Look up a landlord by numeric row id. Used for legacy team-member
  /// rows whose owner reference stored the landlord id instead of the
  /// identity.
  fn landlord_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Landlord>, Self::Error>> + Send + '_;

  /// Look up a legacy landlord row by email, restricted to rows with no
  /// auth identity attached. The first-login backfill lookup.
  fn landlord_by_email_unclaimed<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Landlord>, Self::Error>> + Send + 'a;

  /// Attach an auth identity to a landlord row that has none. Idempotent:
  /// attaching the same identity twice is a no-op; a row that already has
  /// a different identity is left untouched.
  fn attach_landlord_identity<'a>(
    &'a self,
    id: i64,
    identity: &'a str,
  ) -> impl Future<Output = Result<Landlord, Self::Error>> + Send + 'a;

  // ── Team members ──────────────────────────────────────────────────────

  /// Create a `Pending` grant; `invited_at` is set by the store.
  fn invite_team_member(
    &self,
    input: NewTeamInvite,
  ) -> impl Future<Output = Result<TeamMember, Self::Error>> + Send + '_;

  /// Look up an `Active` grant by resolved member identity.
  fn active_member_by_identity<'a>(
    &'a self,
    identity: &'a str,
  ) -> impl Future<Output = Result<Option<TeamMember>, Self::Error>> + Send + 'a;

  /// Look up a resolvable (`Pending` or `Active`, never `Removed`) grant
  /// by invite email.
  fn resolvable_member_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<TeamMember>, Self::Error>> + Send + 'a;

  /// Flip a `Pending` grant to `Active`, recording the resolved member
  /// identity and stamping `accepted_at`. A grant that is already
  /// `Active` is returned unchanged; a `Removed` grant is never touched.
  fn activate_team_member<'a>(
    &'a self,
    id: i64,
    member_identity: &'a str,
  ) -> impl Future<Output = Result<TeamMember, Self::Error>> + Send + 'a;

  /// Move a grant to `Removed`. Terminal; also used to cancel a pending
  /// invite. `legacy_ref` additionally matches grants whose owner
  /// reference stored the landlord's numeric id. Returns `None` if no
  /// grant with that id exists under the given owner.
  fn revoke_team_member<'a>(
    &'a self,
    owner_identity: &'a str,
    legacy_ref: Option<&'a str>,
    id: i64,
  ) -> impl Future<Output = Result<Option<TeamMember>, Self::Error>> + Send + 'a;

  /// All grants (any status) under one owner, in invite order.
  /// `legacy_ref` additionally matches grants whose owner reference
  /// stored the landlord's numeric id.
  fn list_team_members<'a>(
    &'a self,
    owner_identity: &'a str,
    legacy_ref: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<TeamMember>, Self::Error>> + Send + 'a;

  // ── Tenants ───────────────────────────────────────────────────────────

  /// Create and persist a tenant row.
  fn add_tenant(
    &self,
    input: NewTenant,
  ) -> impl Future<Output = Result<Tenant, Self::Error>> + Send + '_;

  /// Look up a tenant by numeric row id.
  fn tenant_by_id(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Tenant>, Self::Error>> + Send + '_;

  /// Look up a tenant by attached auth identity (the portal caller path).
  fn tenant_by_identity<'a>(
    &'a self,
    identity: &'a str,
  ) -> impl Future<Output = Result<Option<Tenant>, Self::Error>> + Send + 'a;

  /// Look up an unclaimed tenant row by email, for portal first-login
  /// backfill.
  fn tenant_by_email_unclaimed<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Tenant>, Self::Error>> + Send + 'a;

  /// Attach an auth identity to a tenant row that has none. Idempotent in
  /// the same way as [`attach_landlord_identity`](Self::attach_landlord_identity).
  fn attach_tenant_identity<'a>(
    &'a self,
    id: i64,
    identity: &'a str,
  ) -> impl Future<Output = Result<Tenant, Self::Error>> + Send + 'a;

  /// All tenants under one owner, in creation order.
  fn list_tenants<'a>(
    &'a self,
    owner_identity: &'a str,
  ) -> impl Future<Output = Result<Vec<Tenant>, Self::Error>> + Send + 'a;

  // ── Messages ──────────────────────────────────────────────────────────

  /// Persist a new message atomically. The store assigns the id and
  /// `created_at`; `read_at` starts null. Either fully recorded or not
  /// recorded at all — no partial-insert state is visible to readers.
  fn insert_message(
    &self,
    input: NewMessage,
  ) -> impl Future<Output = Result<Message, Self::Error>> + Send + '_;

  /// Full ordered read of one conversation, ascending by `created_at`
  /// (message id as tiebreak for determinism).
  fn conversation_messages<'a>(
    &'a self,
    owner_identity: &'a str,
    tenant_id: i64,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + 'a;

  /// Unread counterpart-message count for a single conversation, from the
  /// given viewer's side.
  fn unread_count<'a>(
    &'a self,
    owner_identity: &'a str,
    tenant_id: i64,
    viewer: Viewer,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + 'a;

  /// Owner-side unread tallies for every conversation under one owner.
  /// Conversations with zero unread are omitted.
  fn unread_counts<'a>(
    &'a self,
    owner_identity: &'a str,
  ) -> impl Future<Output = Result<Vec<UnreadCount>, Self::Error>> + Send + 'a;

  /// Batch-stamp `read_at = now` on every unread counterpart message in
  /// one conversation. Idempotent and monotonic: already-read rows are
  /// never touched. Returns the number of rows stamped.
  fn mark_read<'a>(
    &'a self,
    owner_identity: &'a str,
    tenant_id: i64,
    viewer: Viewer,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
