//! Background message handler
//!
//! Receives push messages delivered while the app is not in the foreground
//! and surfaces exactly one notification per message. Malformed payloads
//! degrade to the default notification. Nothing is retried.

use std::sync::Arc;

use super::error::NotificationResult;
use super::payload::{Notification, NotificationDefaults, PushPayload};
use super::sink::NotificationSink;

/// Turns push messages into displayed notifications
#[derive(Clone)]
pub struct BackgroundMessageHandler {
    sink: Arc<dyn NotificationSink>,
    defaults: NotificationDefaults,
}

impl BackgroundMessageHandler {
    pub fn new(sink: Arc<dyn NotificationSink>, defaults: NotificationDefaults) -> Self {
        Self { sink, defaults }
    }

    pub fn defaults(&self) -> &NotificationDefaults {
        &self.defaults
    }

    /// Handle a decoded payload. Returns the notification that was shown.
    pub async fn on_background_message(
        &self,
        payload: &PushPayload,
    ) -> NotificationResult<Notification> {
        let notification = payload.resolve(&self.defaults);
        self.show(notification).await
    }

    /// Handle a raw message body
    ///
    /// A body that is not JSON still produces the default notification.
    /// Mistyped fields are dropped individually, so `data` survives a bad
    /// notification block.
    pub async fn on_raw_message(&self, body: &[u8]) -> NotificationResult<Notification> {
        let notification = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => PushPayload::from_value(value).resolve(&self.defaults),
            Err(e) => {
                tracing::warn!(error = %e, bytes = body.len(), "Malformed push payload, using default notification");
                Notification::fallback(&self.defaults)
            }
        };
        self.show(notification).await
    }

    async fn show(&self, notification: Notification) -> NotificationResult<Notification> {
        match self.sink.show(&notification).await {
            Ok(()) => {
                tracing::debug!(sink = self.sink.name(), title = %notification.title, "Displayed notification");
                Ok(notification)
            }
            Err(e) => {
                tracing::error!(sink = self.sink.name(), error = %e, "Failed to display notification");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{ChannelSink, NotificationError, DEFAULT_TITLE};

    fn handler() -> (
        BackgroundMessageHandler,
        tokio::sync::mpsc::UnboundedReceiver<Notification>,
    ) {
        let (sink, receiver) = ChannelSink::new();
        (
            BackgroundMessageHandler::new(Arc::new(sink), NotificationDefaults::default()),
            receiver,
        )
    }

    #[tokio::test]
    async fn test_one_notification_per_payload() {
        let (handler, mut receiver) = handler();

        handler
            .on_background_message(&PushPayload::with_notification("A", "B"))
            .await
            .unwrap();
        handler
            .on_raw_message(br#"{"data": {"title": "C", "body": "D"}}"#)
            .await
            .unwrap();

        let first = receiver.recv().await.unwrap();
        let second = receiver.recv().await.unwrap();
        assert_eq!((first.title.as_str(), first.body.as_str()), ("A", "B"));
        assert_eq!((second.title.as_str(), second.body.as_str()), ("C", "D"));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_malformed_payload_uses_default() {
        let (handler, mut receiver) = handler();

        let shown = handler.on_raw_message(b"not json at all").await.unwrap();
        assert_eq!(shown.title, DEFAULT_TITLE);
        assert_eq!(shown.body, "");

        let received = receiver.recv().await.unwrap();
        assert_eq!(received, shown);
    }

    #[tokio::test]
    async fn test_mistyped_notification_block_keeps_data() {
        let (handler, mut receiver) = handler();

        let shown = handler
            .on_raw_message(br#"{"notification": {"title": 5}, "data": {"petId": "7", "title": "T"}}"#)
            .await
            .unwrap();
        assert_eq!(shown.title, DEFAULT_TITLE);
        assert_eq!(shown.data["petId"], "7");

        let received = receiver.recv().await.unwrap();
        assert_eq!(received, shown);
    }

    #[tokio::test]
    async fn test_sink_failure_reported() {
        let (handler, receiver) = handler();
        drop(receiver);

        let err = handler
            .on_background_message(&PushPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::ChannelClosed));
    }
}
