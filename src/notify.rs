//! Best-effort review notifications.
//!
//! The review operation emits a [`RecordReviewed`] event once its status
//! write has committed; delivery happens after the fact and a failure never
//! propagates back into the review.

use serde::Serialize;

use crate::AppState;
use crate::db::{RecordId, RecordStatus, UserId};

/// Emitted after a record review commits.
#[derive(Serialize, Debug, Clone)]
pub struct RecordReviewed {
    pub record_id: RecordId,
    pub submitter_id: Option<UserId>,
    pub outcome: RecordStatus,
}

impl RecordReviewed {
    fn content(&self) -> String {
        let verdict = match self.outcome {
            RecordStatus::Approved => "approved",
            RecordStatus::Rejected => "rejected",
            RecordStatus::Pending => "returned to pending",
        };
        match &self.submitter_id {
            Some(submitter) => format!(
                "Record `{}` by `{}` was {verdict}",
                self.record_id.0, submitter.0
            ),
            None => format!("Record `{}` was {verdict}", self.record_id.0),
        }
    }
}

/// Posts review events to a Discord webhook.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    url: String,
    client: reqwest::Client,
}

impl DiscordWebhook {
    /// Returns `None` when no webhook URL is configured, which disables
    /// notifications entirely.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            url: crate::env::DISCORD_WEBHOOK_URL.clone()?,
            client: reqwest::Client::new(),
        })
    }

    async fn send(&self, event: &RecordReviewed) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.url)
            .json(&serde_json::json!({ "content": event.content() }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl AppState {
    /// Delivers a review event to the configured notifier, if any. Failures
    /// are logged and swallowed.
    pub async fn notify_record_reviewed(&self, event: RecordReviewed) {
        let Some(webhook) = &self.webhook else {
            return;
        };
        if let Err(err) = webhook.send(&event).await {
            tracing::warn!(%err, record_id = %event.record_id.0, "Error sending review notification");
        }
    }
}
