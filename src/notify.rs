/*!
 * Notification delivery for task status.
 *
 * Channels implement a common trait so the controller can broadcast one
 * status string to every configured destination. Delivery is
 * fire-and-forget: failures are logged, never propagated to the task.
 */

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;

use crate::errors::NotifyError;

/// Common trait for all notification channels
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    /// Channel name used in logs
    fn name(&self) -> &'static str;

    /// Deliver one status message
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Send a status string to every channel, logging failures
pub async fn broadcast(notifiers: &[Box<dyn Notifier>], text: &str) {
    for notifier in notifiers {
        if let Err(err) = notifier.send(text).await {
            error!("Failed to deliver {} notification: {}", notifier.name(), err);
        }
    }
}

fn webhook_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}

/// Telegram bot channel
#[derive(Debug)]
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a channel for one bot and chat
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: webhook_client(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(|err| NotifyError::RequestFailed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(NotifyError::RequestFailed(format!(
                "telegram API status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Feishu group-bot webhook channel
#[derive(Debug)]
pub struct FeishuNotifier {
    client: Client,
    webhook_url: String,
}

impl FeishuNotifier {
    /// Create a channel for one webhook URL
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: webhook_client(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for FeishuNotifier {
    fn name(&self) -> &'static str {
        "feishu"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({
                "msg_type": "text",
                "content": { "text": text },
            }))
            .send()
            .await
            .map_err(|err| NotifyError::RequestFailed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(NotifyError::RequestFailed(format!(
                "feishu webhook status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
