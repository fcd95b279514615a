//! Discord incoming-webhook sender.

use async_trait::async_trait;
use domain::{DeliveryError, Notification, NotificationSender};
use serde::Serialize;
use tracing::debug;

use crate::check_status;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// One Discord embed object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub url: String,
    pub description: String,
    pub color: u32,
    pub author: EmbedAuthor,
    pub fields: Vec<EmbedField>,
    /// ISO-8601.
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Serialize)]
struct WebhookBody<'a> {
    embeds: [&'a Embed; 1],
}

/// Renders the rich form of a notification.
pub fn render_embed(notification: &Notification) -> Embed {
    Embed {
        title: notification.title.clone(),
        url: notification.url.clone(),
        description: notification.description.clone(),
        color: notification.accent.color(),
        author: EmbedAuthor {
            name: notification.author.login.clone(),
            icon_url: notification.author.avatar_url.clone(),
        },
        fields: notification
            .fields
            .iter()
            .map(|f| EmbedField {
                name: f.name.clone(),
                value: f.value.clone(),
                inline: f.inline,
            })
            .collect(),
        timestamp: notification.timestamp.to_string(),
        footer: EmbedFooter {
            text: notification.footer.clone(),
        },
    }
}

/// Posts embeds to a Discord webhook URL.
pub struct DiscordWebhookSender {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordWebhookSender {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl NotificationSender for DiscordWebhookSender {
    fn name(&self) -> &str {
        "discord"
    }

    async fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let embed = render_embed(notification);
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookBody { embeds: [&embed] })
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        check_status(resp).await?;
        debug!(title = %embed.title, "Discord webhook accepted embed");
        Ok(())
    }
}
