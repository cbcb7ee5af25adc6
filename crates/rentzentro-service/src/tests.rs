//! Behaviour tests for the messaging service against an in-memory SQLite
//! store.

use std::{
  convert::Infallible,
  sync::{Arc, Mutex},
  time::Duration,
};

use rentzentro_core::{
  Error,
  identity::{Caller, ScopeRole},
  landlord::{Landlord, NewLandlord},
  message::{Message, SenderRole},
  notify::NotificationDispatcher,
  store::MessagingStore,
  team::{MemberStatus, NewTeamInvite, TeamRole},
  tenant::{NewTenant, Tenant},
};
use rentzentro_store_sqlite::SqliteStore;
use thiserror::Error as ThisError;

use crate::MessagingService;

// ─── Dispatcher doubles ──────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingDispatcher {
  sent: Mutex<Vec<Message>>,
}

impl NotificationDispatcher for RecordingDispatcher {
  type Error = Infallible;

  async fn notify(&self, message: Message) -> Result<(), Infallible> {
    self.sent.lock().unwrap().push(message);
    Ok(())
  }
}

#[derive(Debug, ThisError)]
#[error("email sink offline")]
struct SinkOffline;

struct FailingDispatcher;

impl NotificationDispatcher for FailingDispatcher {
  type Error = SinkOffline;

  async fn notify(&self, _message: Message) -> Result<(), SinkOffline> {
    Err(SinkOffline)
  }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn service() -> (
  MessagingService<SqliteStore, RecordingDispatcher>,
  Arc<SqliteStore>,
  Arc<RecordingDispatcher>,
) {
  let store = Arc::new(
    SqliteStore::open_in_memory().await.expect("in-memory store"),
  );
  let dispatcher = Arc::new(RecordingDispatcher::default());
  (
    MessagingService::new(Arc::clone(&store), Arc::clone(&dispatcher)),
    store,
    dispatcher,
  )
}

async fn seed_landlord(
  store: &SqliteStore,
  identity: Option<&str>,
  email: &str,
) -> Landlord {
  store
    .add_landlord(NewLandlord {
      auth_identity: identity.map(str::to_owned),
      name:          Some("Test Landlord".into()),
      email:         email.to_owned(),
    })
    .await
    .unwrap()
}

async fn seed_tenant(
  store: &SqliteStore,
  owner_identity: &str,
  identity: Option<&str>,
  email: &str,
) -> Tenant {
  store
    .add_tenant(NewTenant {
      owner_identity: owner_identity.to_owned(),
      auth_identity:  identity.map(str::to_owned),
      name:           Some("Test Tenant".into()),
      email:          email.to_owned(),
      status:         Some("current".into()),
    })
    .await
    .unwrap()
}

/// Give detached notification tasks a chance to run.
async fn settle() {
  for _ in 0..8 {
    tokio::task::yield_now().await;
  }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn owner_resolves_directly_by_identity() {
  let (svc, store, _) = service().await;
  let landlord = seed_landlord(&store, Some("L1"), "owner@x.com").await;

  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();

  assert_eq!(scope.role, ScopeRole::Owner);
  assert_eq!(scope.owner_identity, "L1");
  assert_eq!(scope.landlord_id, Some(landlord.id));
  assert!(scope.member_label.is_none());
}

#[tokio::test]
async fn unresolved_caller_errors() {
  let (svc, _, _) = service().await;
  let err = svc
    .resolve_caller(&Caller::new("nobody", "nobody@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::IdentityNotResolved));
}

#[tokio::test]
async fn legacy_landlord_identity_backfilled_on_first_login() {
  let (svc, store, _) = service().await;
  let landlord = seed_landlord(&store, None, "legacy@x.com").await;

  let scope = svc
    .resolve_caller(&Caller::new("L-new", "legacy@x.com"))
    .await
    .unwrap();
  assert_eq!(scope.role, ScopeRole::Owner);
  assert_eq!(scope.landlord_id, Some(landlord.id));

  let row = store.landlord_by_id(landlord.id).await.unwrap().unwrap();
  assert_eq!(row.auth_identity.as_deref(), Some("L-new"));

  // Second login resolves via the attached identity; the backfill is
  // one-time and idempotent.
  let again = svc
    .resolve_caller(&Caller::new("L-new", "legacy@x.com"))
    .await
    .unwrap();
  assert_eq!(again, scope);
}

#[tokio::test]
async fn owner_match_takes_precedence_over_team_email_match() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("D1"), "dual@x.com").await;

  // Another owner's grant names the same email.
  store
    .invite_team_member(NewTeamInvite {
      owner_identity: "other-owner".into(),
      invite_email:   "dual@x.com".into(),
      role:           TeamRole::Manager,
    })
    .await
    .unwrap();

  let scope = svc
    .resolve_caller(&Caller::new("D1", "dual@x.com"))
    .await
    .unwrap();
  assert_eq!(scope.role, ScopeRole::Owner);
  assert_eq!(scope.owner_identity, "D1");
}

// ─── Invite lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn pending_invite_activates_on_first_resolution() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let owner_scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();

  let invite = svc
    .invite(&owner_scope, "teammate@x.com", TeamRole::Manager)
    .await
    .unwrap();
  assert_eq!(invite.status, MemberStatus::Pending);
  assert!(invite.invited_at.is_some());
  assert!(invite.accepted_at.is_none());

  let scope = svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap();
  assert_eq!(scope.role, ScopeRole::Team);
  assert_eq!(scope.owner_identity, "L1");
  assert_eq!(scope.member_label.as_deref(), Some("teammate (Manager)"));

  let roster = svc.team_roster(&owner_scope).await.unwrap();
  assert_eq!(roster.len(), 1);
  assert_eq!(roster[0].status, MemberStatus::Active);
  assert_eq!(roster[0].member_identity.as_deref(), Some("T1"));
  assert!(roster[0].accepted_at.is_some());
}

#[tokio::test]
async fn activation_is_one_way() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let owner_scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  svc
    .invite(&owner_scope, "teammate@x.com", TeamRole::Manager)
    .await
    .unwrap();

  svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap();
  let first = svc.team_roster(&owner_scope).await.unwrap();

  // Any number of further resolutions leaves the grant active with the
  // original acceptance stamp.
  svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap();
  svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap();
  let after = svc.team_roster(&owner_scope).await.unwrap();

  assert_eq!(after[0].status, MemberStatus::Active);
  assert_eq!(after[0].accepted_at, first[0].accepted_at);
}

#[tokio::test]
async fn removed_grant_never_resolves_again() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let owner_scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let invite = svc
    .invite(&owner_scope, "teammate@x.com", TeamRole::Manager)
    .await
    .unwrap();

  svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap();

  let removed = svc.revoke(&owner_scope, invite.id).await.unwrap();
  assert_eq!(removed.status, MemberStatus::Removed);

  // Neither the resolved identity nor the invite email resolves any more.
  let err = svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::IdentityNotResolved));
}

#[tokio::test]
async fn pending_invite_can_be_cancelled() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let owner_scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let invite = svc
    .invite(&owner_scope, "never@x.com", TeamRole::Viewer)
    .await
    .unwrap();

  let removed = svc.revoke(&owner_scope, invite.id).await.unwrap();
  assert_eq!(removed.status, MemberStatus::Removed);

  let err = svc
    .resolve_caller(&Caller::new("T9", "never@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::IdentityNotResolved));
}

#[tokio::test]
async fn revoke_outside_scope_errors() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "one@x.com").await;
  seed_landlord(&store, Some("L2"), "two@x.com").await;
  let scope_one = svc
    .resolve_caller(&Caller::new("L1", "one@x.com"))
    .await
    .unwrap();
  let scope_two = svc
    .resolve_caller(&Caller::new("L2", "two@x.com"))
    .await
    .unwrap();
  let invite = svc
    .invite(&scope_one, "teammate@x.com", TeamRole::Manager)
    .await
    .unwrap();

  let err = svc.revoke(&scope_two, invite.id).await.unwrap_err();
  assert!(matches!(err, Error::MemberNotFound(_)));
}

// ─── Team scope fallbacks ────────────────────────────────────────────────────

#[tokio::test]
async fn team_scope_resolves_legacy_numeric_owner_reference() {
  let (svc, store, _) = service().await;
  let landlord = seed_landlord(&store, Some("L9"), "nine@x.com").await;

  // Legacy rows stored the landlord's numeric id as the owner reference.
  store
    .invite_team_member(NewTeamInvite {
      owner_identity: landlord.id.to_string(),
      invite_email:   "helper@x.com".into(),
      role:           TeamRole::Manager,
    })
    .await
    .unwrap();

  let scope = svc
    .resolve_caller(&Caller::new("H1", "helper@x.com"))
    .await
    .unwrap();
  assert_eq!(scope.role, ScopeRole::Team);
  assert_eq!(scope.landlord_id, Some(landlord.id));
  // Normalised onto the landlord's real identity so conversation keys
  // line up.
  assert_eq!(scope.owner_identity, "L9");
}

#[tokio::test]
async fn legacy_grant_appears_in_roster_and_revokes() {
  let (svc, store, _) = service().await;
  let landlord = seed_landlord(&store, Some("L9"), "nine@x.com").await;

  // Legacy rows stored the landlord's numeric id as the owner reference.
  let invite = store
    .invite_team_member(NewTeamInvite {
      owner_identity: landlord.id.to_string(),
      invite_email:   "helper@x.com".into(),
      role:           TeamRole::Manager,
    })
    .await
    .unwrap();

  svc
    .resolve_caller(&Caller::new("H1", "helper@x.com"))
    .await
    .unwrap();

  // The owner sees the grant even though its stored owner reference is
  // the numeric id, and can revoke it.
  let owner_scope = svc
    .resolve_caller(&Caller::new("L9", "nine@x.com"))
    .await
    .unwrap();
  let roster = svc.team_roster(&owner_scope).await.unwrap();
  assert_eq!(roster.len(), 1);
  assert_eq!(roster[0].id, invite.id);

  let removed = svc.revoke(&owner_scope, invite.id).await.unwrap();
  assert_eq!(removed.status, MemberStatus::Removed);

  let err = svc
    .resolve_caller(&Caller::new("H1", "helper@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::IdentityNotResolved));
}

#[tokio::test]
async fn team_scope_without_landlord_row_still_messages() {
  let (svc, store, _) = service().await;

  store
    .invite_team_member(NewTeamInvite {
      owner_identity: "ghost-owner".into(),
      invite_email:   "helper@x.com".into(),
      role:           TeamRole::Manager,
    })
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "ghost-owner", None, "t@x.com").await;

  let scope = svc
    .resolve_caller(&Caller::new("H1", "helper@x.com"))
    .await
    .unwrap();
  assert_eq!(scope.role, ScopeRole::Team);
  assert_eq!(scope.landlord_id, None);

  let message = svc.send_message(&scope, tenant.id, "Hello").await.unwrap();
  assert_eq!(message.sender_role, SenderRole::Team);
  assert_eq!(message.landlord_id, None);
  assert_eq!(message.sender_label.as_deref(), Some("helper (Manager)"));
}

// ─── Scope isolation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn foreign_tenant_is_out_of_scope() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "one@x.com").await;
  seed_landlord(&store, Some("L2"), "two@x.com").await;
  let scope_one = svc
    .resolve_caller(&Caller::new("L1", "one@x.com"))
    .await
    .unwrap();
  let foreign = seed_tenant(&store, "L2", None, "t@x.com").await;

  let err = svc
    .open_conversation(&scope_one, foreign.id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TenantNotInScope(id) if id == foreign.id));

  let err = svc
    .send_message(&scope_one, foreign.id, "hi")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TenantNotInScope(id) if id == foreign.id));

  let err = svc.open_conversation(&scope_one, 9999).await.unwrap_err();
  assert!(matches!(err, Error::TenantNotInScope(9999)));
}

// ─── Sending ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_body_rejected_without_persisting() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", None, "t@x.com").await;

  let err = svc.send_message(&scope, tenant.id, "   ").await.unwrap_err();
  assert!(matches!(err, Error::EmptyBody));

  let messages = svc.open_conversation(&scope, tenant.id).await.unwrap();
  assert!(messages.is_empty());
}

#[tokio::test]
async fn send_trims_body_and_stamps_fields() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", Some("U1"), "t@x.com").await;

  let message = svc
    .send_message(&scope, tenant.id, "  Rent is due Friday.  ")
    .await
    .unwrap();

  assert_eq!(message.body, "Rent is due Friday.");
  assert_eq!(message.sender_role, SenderRole::Landlord);
  assert_eq!(message.owner_identity, "L1");
  assert_eq!(message.tenant_identity.as_deref(), Some("U1"));
  assert!(message.read_at.is_none());
}

#[tokio::test]
async fn conversation_reads_in_creation_order() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", Some("U1"), "t@x.com").await;
  let portal = svc
    .resolve_tenant(&Caller::new("U1", "t@x.com"))
    .await
    .unwrap();

  svc.send_message(&scope, tenant.id, "first").await.unwrap();
  svc.tenant_send_message(&portal, "second").await.unwrap();
  svc.send_message(&scope, tenant.id, "third").await.unwrap();

  let messages = svc.open_conversation(&scope, tenant.id).await.unwrap();
  let bodies: Vec<_> = messages.iter().map(|m| m.body.as_str()).collect();
  assert_eq!(bodies, ["first", "second", "third"]);
  assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

// ─── Unread counts & read state ──────────────────────────────────────────────

#[tokio::test]
async fn unread_count_lifecycle() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", Some("U1"), "t@x.com").await;
  let portal = svc
    .resolve_tenant(&Caller::new("U1", "t@x.com"))
    .await
    .unwrap();

  for n in 0..3 {
    svc
      .tenant_send_message(&portal, &format!("note {n}"))
      .await
      .unwrap();
  }

  let list = svc.list_conversations(&scope).await.unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].unread_count, 3);

  // Opening the conversation sweeps the tenant-authored messages.
  svc.open_conversation(&scope, tenant.id).await.unwrap();
  let list = svc.list_conversations(&scope).await.unwrap();
  assert_eq!(list[0].unread_count, 0);

  // One more tenant note → one unread.
  svc.tenant_send_message(&portal, "another").await.unwrap();
  let list = svc.list_conversations(&scope).await.unwrap();
  assert_eq!(list[0].unread_count, 1);
}

#[tokio::test]
async fn read_stamp_is_monotonic() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", Some("U1"), "t@x.com").await;
  let portal = svc
    .resolve_tenant(&Caller::new("U1", "t@x.com"))
    .await
    .unwrap();

  svc.tenant_send_message(&portal, "hello").await.unwrap();
  svc.open_conversation(&scope, tenant.id).await.unwrap();

  let first: Vec<_> = store
    .conversation_messages("L1", tenant.id)
    .await
    .unwrap()
    .into_iter()
    .map(|m| m.read_at)
    .collect();
  assert!(first.iter().all(Option::is_some));

  // A later sweep never overwrites an existing stamp.
  tokio::time::sleep(Duration::from_millis(5)).await;
  svc.open_conversation(&scope, tenant.id).await.unwrap();

  let second: Vec<_> = store
    .conversation_messages("L1", tenant.id)
    .await
    .unwrap()
    .into_iter()
    .map(|m| m.read_at)
    .collect();
  assert_eq!(first, second);
}

#[tokio::test]
async fn tenant_side_read_sweep_is_symmetric() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", Some("U1"), "t@x.com").await;
  let portal = svc
    .resolve_tenant(&Caller::new("U1", "t@x.com"))
    .await
    .unwrap();

  svc.send_message(&scope, tenant.id, "from owner").await.unwrap();
  svc.tenant_send_message(&portal, "from tenant").await.unwrap();
  assert_eq!(svc.tenant_unread_count(&portal).await.unwrap(), 1);

  let messages = svc.tenant_conversation(&portal).await.unwrap();
  assert_eq!(messages.len(), 2);
  assert_eq!(svc.tenant_unread_count(&portal).await.unwrap(), 0);

  // The tenant's own message stays unread from the owner's side.
  let list = svc.list_conversations(&scope).await.unwrap();
  assert_eq!(list[0].unread_count, 1);
}

#[tokio::test]
async fn directory_orders_unread_first() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let quiet_first = seed_tenant(&store, "L1", None, "a@x.com").await;
  let noisy = seed_tenant(&store, "L1", Some("U2"), "b@x.com").await;
  let quiet_last = seed_tenant(&store, "L1", None, "c@x.com").await;

  let portal = svc
    .resolve_tenant(&Caller::new("U2", "b@x.com"))
    .await
    .unwrap();
  svc.tenant_send_message(&portal, "ping").await.unwrap();

  let list = svc.list_conversations(&scope).await.unwrap();
  let ids: Vec<_> = list.iter().map(|s| s.tenant.id).collect();
  assert_eq!(ids, [noisy.id, quiet_first.id, quiet_last.id]);
}

// ─── Notification contract ───────────────────────────────────────────────────

#[tokio::test]
async fn notification_receives_the_stored_message() {
  let (svc, store, dispatcher) = service().await;
  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", None, "t@x.com").await;

  let message = svc.send_message(&scope, tenant.id, "Hi").await.unwrap();
  settle().await;

  let sent = dispatcher.sent.lock().unwrap();
  assert_eq!(sent.len(), 1);
  assert_eq!(sent[0].id, message.id);
}

#[tokio::test]
async fn send_succeeds_even_when_notification_fails() {
  let store = Arc::new(
    SqliteStore::open_in_memory().await.expect("in-memory store"),
  );
  let svc =
    MessagingService::new(Arc::clone(&store), Arc::new(FailingDispatcher));

  seed_landlord(&store, Some("L1"), "owner@x.com").await;
  let scope = svc
    .resolve_caller(&Caller::new("L1", "owner@x.com"))
    .await
    .unwrap();
  let tenant = seed_tenant(&store, "L1", None, "t@x.com").await;

  let message = svc.send_message(&scope, tenant.id, "Hi").await.unwrap();
  settle().await;

  // The message is durable and immediately retrievable.
  let messages = svc.open_conversation(&scope, tenant.id).await.unwrap();
  assert_eq!(messages.len(), 1);
  assert_eq!(messages[0].id, message.id);
}

// ─── Tenant portal resolution ────────────────────────────────────────────────

#[tokio::test]
async fn tenant_identity_backfilled_on_first_portal_login() {
  let (svc, store, _) = service().await;
  let tenant = seed_tenant(&store, "L1", None, "t@x.com").await;

  let resolved = svc
    .resolve_tenant(&Caller::new("U7", "t@x.com"))
    .await
    .unwrap();
  assert_eq!(resolved.id, tenant.id);
  assert_eq!(resolved.auth_identity.as_deref(), Some("U7"));

  let again = svc
    .resolve_tenant(&Caller::new("U7", "t@x.com"))
    .await
    .unwrap();
  assert_eq!(again, resolved);
}

#[tokio::test]
async fn unknown_portal_caller_errors() {
  let (svc, _, _) = service().await;
  let err = svc
    .resolve_tenant(&Caller::new("U0", "ghost@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::IdentityNotResolved));
}

// ─── End to end ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn invite_activate_send_read_scenario() {
  let (svc, store, _) = service().await;
  seed_landlord(&store, Some("L1"), "landlord@x.com").await;

  // Landlord invites a manager.
  let owner_scope = svc
    .resolve_caller(&Caller::new("L1", "landlord@x.com"))
    .await
    .unwrap();
  let invite = svc
    .invite(&owner_scope, "teammate@x.com", TeamRole::Manager)
    .await
    .unwrap();
  assert_eq!(invite.status, MemberStatus::Pending);

  // Invitee authenticates; the grant activates.
  let team_scope = svc
    .resolve_caller(&Caller::new("T1", "teammate@x.com"))
    .await
    .unwrap();
  assert_eq!(team_scope.role, ScopeRole::Team);
  assert_eq!(team_scope.owner_identity, "L1");
  let roster = svc.team_roster(&owner_scope).await.unwrap();
  assert_eq!(roster[0].status, MemberStatus::Active);
  assert!(roster[0].accepted_at.is_some());

  // Delegate messages a tenant of the owner.
  let tenant = seed_tenant(&store, "L1", Some("U42"), "t42@x.com").await;
  let message = svc
    .send_message(&team_scope, tenant.id, "Hello")
    .await
    .unwrap();
  assert_eq!(message.sender_role, SenderRole::Team);
  assert!(message.read_at.is_none());

  // Tenant opens the conversation; the message is stamped read.
  let portal = svc
    .resolve_tenant(&Caller::new("U42", "t42@x.com"))
    .await
    .unwrap();
  let messages = svc.tenant_conversation(&portal).await.unwrap();
  assert_eq!(messages.len(), 1);

  let stored = store.conversation_messages("L1", tenant.id).await.unwrap();
  assert!(stored[0].read_at.is_some());

  // Owner-side unread for that tenant is zero.
  let list = svc.list_conversations(&owner_scope).await.unwrap();
  assert_eq!(list[0].unread_count, 0);
}
