use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers run outcome messages.
///
/// Notification is fire-and-forget: implementations log their own delivery
/// failures and never fail the copy.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str);
}

/// Writes notifications to the log stream.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) {
        info!(subject = %subject, "{body}");
    }
}

/// POSTs notifications as JSON to a webhook endpoint.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str) -> Self {
        WebhookNotifier {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, subject: &str, body: &str) {
        let payload = json!({ "subject": subject, "body": body });
        let result = self
            .client
            .post(&self.url)
            .timeout(WEBHOOK_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        if let Err(err) = result {
            error!(error = %err, url = %self.url, "Failed to deliver notification");
        }
    }
}
