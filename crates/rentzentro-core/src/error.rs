//! Error types for `rentzentro-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller matches neither a landlord nor an active team member.
  /// Surfaced as an authorization failure; never retried.
  #[error("caller identity could not be resolved to an owner scope")]
  IdentityNotResolved,

  /// The requested tenant does not belong to the resolved owner scope.
  /// A client error; never silently fixed up.
  #[error("tenant {0} is not in the resolved owner scope")]
  TenantNotInScope(i64),

  /// The message body trimmed to the empty string. Nothing was persisted.
  #[error("message body is empty")]
  EmptyBody,

  /// The team-member grant does not exist under the resolved owner scope.
  #[error("team member {0} not found in the resolved owner scope")]
  MemberNotFound(i64),

  /// The backing store could not be reached or queried. Safe to retry:
  /// all store mutations are atomic single-row or single-batch writes, so
  /// a retry cannot observe a partial insert.
  #[error("store unavailable: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error as a retryable store failure.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
