//! Push notifications
//!
//! Glue between an external messaging service and the operating system's
//! notification display:
//! - [`PushPayload`]: the message body as delivered
//! - [`PushPayload::resolve`]: title/body fallback chain
//! - [`BackgroundMessageHandler`]: one notification per received message
//! - [`NotificationSink`]: where notifications are shown

pub mod error;
pub mod handler;
pub mod payload;
pub mod sink;

pub use error::{NotificationError, NotificationResult};
pub use handler::BackgroundMessageHandler;
pub use payload::{
    Notification, NotificationContent, NotificationDefaults, PayloadData, PushPayload,
    DEFAULT_ICON, DEFAULT_TITLE,
};
pub use sink::{ChannelSink, NotificationSink, StdoutSink, TracingSink};
