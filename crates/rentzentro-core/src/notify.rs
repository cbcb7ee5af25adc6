//! The outbound-notification collaborator seam.
//!
//! On every stored message the service hands a copy to a
//! [`NotificationDispatcher`], which is expected to format a
//! human-readable summary and deliver it to the conversation counterpart.
//! The dispatch is best-effort and fully decoupled from the store write:
//! a dispatcher failure is logged by the service and never changes the
//! outcome of a send.

use std::future::Future;

use crate::message::Message;

/// A sink for new-message notifications (the original app's
/// email-on-new-message behaviour). Counterpart address resolution happens
/// behind this boundary, not in the core.
pub trait NotificationDispatcher: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Deliver a notification for a freshly stored message. Called from a
  /// detached task after the durable write commits; any timeout or retry
  /// policy belongs to the implementation.
  fn notify(
    &self,
    message: Message,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
