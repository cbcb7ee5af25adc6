//! Conversation reads, sends, and the read-state sweep.
//!
//! Sends are atomic single-row inserts; the notification hand-off happens
//! on a detached task only after the durable write commits, so a sink
//! failure can never roll back or block a stored message. The read sweep
//! is best-effort: a failure degrades to stale unread counts, never to a
//! visible error for the read itself.

use std::sync::Arc;

use rentzentro_core::{
  Error, Result,
  identity::{OwnerScope, ScopeRole},
  message::{Message, NewMessage, SenderRole, Viewer},
  notify::NotificationDispatcher,
  store::MessagingStore,
  tenant::Tenant,
};

use crate::MessagingService;

impl<S, N> MessagingService<S, N>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  /// Check that a tenant exists and belongs to the resolved scope.
  /// A foreign or unknown tenant id is the same client error either way.
  async fn tenant_in_scope(
    &self,
    scope: &OwnerScope,
    tenant_id: i64,
  ) -> Result<Tenant> {
    let tenant = self
      .store
      .tenant_by_id(tenant_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::TenantNotInScope(tenant_id))?;

    if tenant.owner_identity != scope.owner_identity {
      return Err(Error::TenantNotInScope(tenant_id));
    }
    Ok(tenant)
  }

  /// Full ordered read of one conversation, as the owner side. Opening
  /// the conversation sweeps the tenant-authored unread messages.
  pub async fn open_conversation(
    &self,
    scope: &OwnerScope,
    tenant_id: i64,
  ) -> Result<Vec<Message>> {
    self.tenant_in_scope(scope, tenant_id).await?;

    let messages = self
      .store
      .conversation_messages(&scope.owner_identity, tenant_id)
      .await
      .map_err(Error::store)?;

    if let Err(err) = self
      .store
      .mark_read(&scope.owner_identity, tenant_id, Viewer::OwnerSide)
      .await
    {
      tracing::warn!(
        tenant_id,
        error = %err,
        "read sweep failed; unread counts may be stale"
      );
    }

    Ok(messages)
  }

  /// Send a message into a conversation as the owner or a delegate.
  pub async fn send_message(
    &self,
    scope: &OwnerScope,
    tenant_id: i64,
    body: &str,
  ) -> Result<Message> {
    let body = body.trim();
    if body.is_empty() {
      return Err(Error::EmptyBody);
    }

    let tenant = self.tenant_in_scope(scope, tenant_id).await?;

    let sender_role = match scope.role {
      ScopeRole::Owner => SenderRole::Landlord,
      ScopeRole::Team => SenderRole::Team,
    };

    let message = self
      .store
      .insert_message(NewMessage {
        owner_identity:  scope.owner_identity.clone(),
        // None when a team sender has no landlord row; a message is never
        // blocked merely because the owner's row is incomplete.
        landlord_id:     scope.landlord_id,
        tenant_id:       tenant.id,
        tenant_identity: tenant.auth_identity.clone(),
        body:            body.to_owned(),
        sender_role,
        sender_label:    scope.member_label.clone(),
      })
      .await
      .map_err(Error::store)?;

    self.dispatch_notification(message.clone());
    Ok(message)
  }

  /// Full ordered read of the caller's own conversation, as the tenant.
  /// Sweeps the landlord- and team-authored unread messages.
  pub async fn tenant_conversation(
    &self,
    tenant: &Tenant,
  ) -> Result<Vec<Message>> {
    let messages = self
      .store
      .conversation_messages(&tenant.owner_identity, tenant.id)
      .await
      .map_err(Error::store)?;

    if let Err(err) = self
      .store
      .mark_read(&tenant.owner_identity, tenant.id, Viewer::TenantSide)
      .await
    {
      tracing::warn!(
        tenant_id = tenant.id,
        error = %err,
        "read sweep failed; unread counts may be stale"
      );
    }

    Ok(messages)
  }

  /// Send a message as the tenant.
  pub async fn tenant_send_message(
    &self,
    tenant: &Tenant,
    body: &str,
  ) -> Result<Message> {
    let body = body.trim();
    if body.is_empty() {
      return Err(Error::EmptyBody);
    }

    let landlord = self
      .store
      .landlord_by_identity(&tenant.owner_identity)
      .await
      .map_err(Error::store)?;

    let message = self
      .store
      .insert_message(NewMessage {
        owner_identity:  tenant.owner_identity.clone(),
        landlord_id:     landlord.map(|l| l.id),
        tenant_id:       tenant.id,
        tenant_identity: tenant.auth_identity.clone(),
        body:            body.to_owned(),
        sender_role:     SenderRole::Tenant,
        sender_label:    tenant.name.clone(),
      })
      .await
      .map_err(Error::store)?;

    self.dispatch_notification(message.clone());
    Ok(message)
  }

  /// Landlord/team messages the tenant has not yet opened.
  pub async fn tenant_unread_count(&self, tenant: &Tenant) -> Result<u32> {
    self
      .store
      .unread_count(&tenant.owner_identity, tenant.id, Viewer::TenantSide)
      .await
      .map_err(Error::store)
  }

  /// Hand a stored message to the notification sink on a detached task.
  /// The message is already durable; a sink failure is logged and never
  /// surfaces to the sender.
  fn dispatch_notification(&self, message: Message) {
    let dispatcher = Arc::clone(&self.dispatcher);
    tokio::spawn(async move {
      if let Err(err) = dispatcher.notify(message).await {
        tracing::warn!(error = %err, "notification dispatch failed");
      }
    });
  }
}
