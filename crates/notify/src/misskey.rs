//! Misskey plain-text sender.

use async_trait::async_trait;
use domain::{DeliveryError, Notification, NotificationSender};
use serde::Serialize;
use tracing::debug;

use crate::check_status;

#[derive(Debug, Serialize)]
struct CreateNote<'a> {
    i: &'a str,
    text: &'a str,
    #[serde(rename = "channelId")]
    channel_id: &'a str,
}

/// Posts plain-text notes into a Misskey channel.
///
/// Only constructed when the instance URL, token, and channel id are all
/// configured.
pub struct MisskeySender {
    client: reqwest::Client,
    instance_url: String,
    token: String,
    channel_id: String,
}

impl MisskeySender {
    pub fn new(
        instance_url: impl Into<String>,
        token: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            instance_url: instance_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
            channel_id: channel_id.into(),
        }
    }
}

#[async_trait]
impl NotificationSender for MisskeySender {
    fn name(&self) -> &str {
        "misskey"
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let text = notification.to_plain_text();
        let resp = self
            .client
            .post(format!("{}/api/notes/create", self.instance_url))
            .json(&CreateNote {
                i: &self.token,
                text: &text,
                channel_id: &self.channel_id,
            })
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        check_status(resp).await?;
        debug!(channel = %self.channel_id, "Misskey note created");
        Ok(())
    }
}
