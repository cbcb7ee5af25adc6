//! Team-grant lifecycle operations under a resolved scope.
//!
//! Managers have full parity with owners, so any resolved scope may
//! invite and revoke. Viewer read-only enforcement is a pending product
//! decision and deliberately absent (see `TeamRole`).

use rentzentro_core::{
  Error, Result,
  identity::OwnerScope,
  notify::NotificationDispatcher,
  store::MessagingStore,
  team::{NewTeamInvite, TeamMember, TeamRole},
};

use crate::MessagingService;

impl<S, N> MessagingService<S, N>
where
  S: MessagingStore,
  N: NotificationDispatcher + 'static,
{
  /// Create a pending grant for `email` under the scope's owner. The
  /// grant activates the first time a matching email resolves — there is
  /// no separate accept action.
  pub async fn invite(
    &self,
    scope: &OwnerScope,
    email: &str,
    role: TeamRole,
  ) -> Result<TeamMember> {
    self
      .store
      .invite_team_member(NewTeamInvite {
        owner_identity: scope.owner_identity.clone(),
        invite_email:   email.to_owned(),
        role,
      })
      .await
      .map_err(Error::store)
  }

  /// Revoke a grant (or cancel a pending invite). Terminal: a removed
  /// grant can never be resolved again. Grants stored with the
  /// landlord's numeric id as owner reference match too.
  pub async fn revoke(
    &self,
    scope: &OwnerScope,
    member_id: i64,
  ) -> Result<TeamMember> {
    let legacy = Self::legacy_owner_ref(scope);
    self
      .store
      .revoke_team_member(&scope.owner_identity, legacy.as_deref(), member_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::MemberNotFound(member_id))
  }

  /// All grants under the scope's owner, any status, in invite order.
  /// Includes grants stored with the landlord's numeric id as owner
  /// reference.
  pub async fn team_roster(
    &self,
    scope: &OwnerScope,
  ) -> Result<Vec<TeamMember>> {
    let legacy = Self::legacy_owner_ref(scope);
    self
      .store
      .list_team_members(&scope.owner_identity, legacy.as_deref())
      .await
      .map_err(Error::store)
  }

  /// Older grants recorded the landlord's numeric id instead of the auth
  /// identity; rendering it lets roster and revoke reach those rows.
  fn legacy_owner_ref(scope: &OwnerScope) -> Option<String> {
    scope.landlord_id.map(|id| id.to_string())
  }
}
