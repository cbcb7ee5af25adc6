//! Error type for `rentzentro-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown enum discriminant: {0}")]
  UnknownDiscriminant(String),

  /// Attempted to mutate a landlord row that was not found.
  #[error("landlord not found: {0}")]
  LandlordNotFound(i64),

  /// Attempted to mutate a tenant row that was not found.
  #[error("tenant not found: {0}")]
  TenantNotFound(i64),

  /// Attempted to activate a grant that was not found.
  #[error("team member not found: {0}")]
  MemberNotFound(i64),

  /// Attempted to activate a removed grant. Removed is terminal.
  #[error("team member {0} is removed and cannot be activated")]
  MemberRemoved(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
