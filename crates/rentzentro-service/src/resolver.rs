//! Identity resolution — who is the caller allowed to act as?
//!
//! Precedence is fixed: a direct landlord match always wins over a team
//! match, even when the same email appears on a grant. The two-step email
//! fallbacks exist because legacy rows were created before the current
//! authentication provider (landlords with no identity attached) or before
//! the invitee ever logged in (grants with no member identity).

use rentzentro_core::{
  Error, Result,
  identity::{Caller, OwnerScope},
  notify::NotificationDispatcher,
  store::MessagingStore,
  team::{MemberStatus, TeamMember},
  tenant::Tenant,
};

use crate::MessagingService;

impl<S, N> MessagingService<S, N>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  /// Resolve an authenticated caller to the owner scope they act under.
  ///
  /// Fails with [`Error::IdentityNotResolved`] when the caller matches
  /// neither a landlord nor a resolvable team grant.
  pub async fn resolve_caller(&self, caller: &Caller) -> Result<OwnerScope> {
    // 1. Direct owner match by identity.
    if let Some(landlord) = self
      .store
      .landlord_by_identity(&caller.identity)
      .await
      .map_err(Error::store)?
    {
      return Ok(OwnerScope::owner(caller.identity.clone(), landlord.id));
    }

    // 2. Legacy owner row with no identity attached: backfill once.
    if let Some(landlord) = self
      .store
      .landlord_by_email_unclaimed(&caller.email)
      .await
      .map_err(Error::store)?
    {
      let landlord = self
        .store
        .attach_landlord_identity(landlord.id, &caller.identity)
        .await
        .map_err(Error::store)?;
      return Ok(OwnerScope::owner(caller.identity.clone(), landlord.id));
    }

    // 3. Active delegate by resolved member identity.
    if let Some(member) = self
      .store
      .active_member_by_identity(&caller.identity)
      .await
      .map_err(Error::store)?
    {
      return self.team_scope(member).await;
    }

    // 4. Invite-email match. The only path by which a pending grant
    //    becomes active; removed grants are excluded by the store lookup.
    if let Some(member) = self
      .store
      .resolvable_member_by_email(&caller.email)
      .await
      .map_err(Error::store)?
    {
      let member = if member.status == MemberStatus::Pending {
        self
          .store
          .activate_team_member(member.id, &caller.identity)
          .await
          .map_err(Error::store)?
      } else {
        member
      };
      return self.team_scope(member).await;
    }

    Err(Error::IdentityNotResolved)
  }

  /// Build a team scope, resolving the owning landlord row by identity
  /// with a fallback for legacy grants that stored the landlord's numeric
  /// id as the owner reference. A missing landlord row yields a minimal
  /// scope — messaging still functions without it.
  async fn team_scope(&self, member: TeamMember) -> Result<OwnerScope> {
    let mut landlord = self
      .store
      .landlord_by_identity(&member.owner_identity)
      .await
      .map_err(Error::store)?;

    if landlord.is_none()
      && let Ok(legacy_id) = member.owner_identity.parse::<i64>()
    {
      landlord = self
        .store
        .landlord_by_id(legacy_id)
        .await
        .map_err(Error::store)?;
    }

    let label = member.sender_label();
    match landlord {
      Some(l) => {
        // Normalise legacy numeric references onto the landlord's real
        // identity when one is attached, so conversation keys line up.
        let owner_identity =
          l.auth_identity.unwrap_or(member.owner_identity);
        Ok(OwnerScope::team(owner_identity, Some(l.id), label))
      }
      None => Ok(OwnerScope::team(member.owner_identity, None, label)),
    }
  }

  /// Resolve a portal caller to their tenant row, backfilling the auth
  /// identity on first login the same way the landlord path does.
  pub async fn resolve_tenant(&self, caller: &Caller) -> Result<Tenant> {
    if let Some(tenant) = self
      .store
      .tenant_by_identity(&caller.identity)
      .await
      .map_err(Error::store)?
    {
      return Ok(tenant);
    }

    if let Some(tenant) = self
      .store
      .tenant_by_email_unclaimed(&caller.email)
      .await
      .map_err(Error::store)?
    {
      return self
        .store
        .attach_tenant_identity(tenant.id, &caller.identity)
        .await
        .map_err(Error::store);
    }

    Err(Error::IdentityNotResolved)
  }
}
