//! Notification sinks.
//!
//! Outbound email delivery is owned by an external collaborator; this
//! module ships the deployment default for environments where no sink is
//! wired up: format the counterpart summary the way the email would read
//! and emit it through `tracing`.

use std::convert::Infallible;

use rentzentro_core::{
  message::{Message, SenderRole},
  notify::NotificationDispatcher,
};

/// Maximum body preview length in the logged summary.
const PREVIEW_LEN: usize = 80;

/// A [`NotificationDispatcher`] that logs the would-be email instead of
/// sending one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatcher;

impl NotificationDispatcher for TracingDispatcher {
  type Error = Infallible;

  async fn notify(&self, message: Message) -> Result<(), Infallible> {
    let counterpart = match message.sender_role {
      SenderRole::Tenant => "owner",
      SenderRole::Landlord | SenderRole::Team => "tenant",
    };

    let mut preview = message.body.clone();
    if preview.len() > PREVIEW_LEN {
      let cut = preview
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= PREVIEW_LEN)
        .last()
        .unwrap_or(0);
      preview.truncate(cut);
      preview.push('…');
    }

    tracing::info!(
      message_id = %message.id,
      tenant_id = message.tenant_id,
      counterpart,
      sender = message.sender_label.as_deref().unwrap_or("owner"),
      preview = %preview,
      "new-message notification"
    );
    Ok(())
  }
}
