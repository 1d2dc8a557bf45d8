//! Notification sinks
//!
//! A sink is whatever actually puts a notification in front of the user.
//! The host platform supplies the real one; the sinks here cover logging,
//! command-line output and in-process delivery.

use async_trait::async_trait;
use std::io::Write;
use tokio::sync::mpsc;

use super::error::{NotificationError, NotificationResult};
use super::payload::Notification;

/// Displays notifications
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Show one notification
    async fn show(&self, notification: &Notification) -> NotificationResult<()>;
}

/// Logs every notification through `tracing`
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn show(&self, notification: &Notification) -> NotificationResult<()> {
        tracing::info!(
            title = %notification.title,
            body = %notification.body,
            icon = %notification.icon,
            data_fields = notification.data.len(),
            "Notification shown"
        );
        Ok(())
    }
}

/// Prints each notification to stdout as one JSON line
#[derive(Debug, Default, Clone)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn show(&self, notification: &Notification) -> NotificationResult<()> {
        let line = serde_json::to_string(notification)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Forwards notifications to an in-process receiver
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    /// Create a sink and the receiver that gets its notifications
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    async fn show(&self, notification: &Notification) -> NotificationResult<()> {
        self.sender
            .send(notification.clone())
            .map_err(|_| NotificationError::ChannelClosed)
    }
}
