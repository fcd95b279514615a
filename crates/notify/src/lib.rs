//! repowatch notification senders.
//!
//! Implements [`domain::NotificationSender`] for two destinations:
//!
//! - [`DiscordWebhookSender`]: rich form. One `POST` per notification whose
//!   body wraps a single embed in a one-element `embeds` list.
//! - [`MisskeySender`]: plain-text form. One `POST` to `notes/create` with
//!   the access token, the rendered text, and the target channel.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Wire shapes and transport live here. Senders return
//! [`domain::DeliveryError`] and never retry; pacing between sends is the
//! engine's job.

mod discord;
mod misskey;

pub use discord::{render_embed, DiscordWebhookSender, Embed};
pub use misskey::MisskeySender;

use domain::DeliveryError;

/// Maps a non-success response into a [`DeliveryError::Status`].
async fn check_status(resp: reqwest::Response) -> Result<(), DeliveryError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DeliveryError::Status {
        status: status.as_u16(),
        body,
    })
}
