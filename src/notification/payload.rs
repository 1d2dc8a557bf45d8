//! Push payloads and the notifications they resolve to

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary string-keyed data carried by a push message
pub type PayloadData = Map<String, Value>;

/// Title used when a payload carries none
pub const DEFAULT_TITLE: &str = "Nova Notificação";

/// Icon shown with every notification
pub const DEFAULT_ICON: &str = "/icon.png";

/// Notification block of a push payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Message body delivered by the messaging service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PushPayload {
    #[serde(default)]
    pub notification: Option<NotificationContent>,
    #[serde(default)]
    pub data: Option<PayloadData>,
}

/// Fallbacks applied during resolution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationDefaults {
    pub title: String,
    pub icon: String,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

/// An operating-system notification ready to be shown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// The payload's data, kept for when the user interacts with the notification
    pub data: PayloadData,
}

impl Notification {
    /// The notification shown when nothing usable arrived
    pub fn fallback(defaults: &NotificationDefaults) -> Self {
        PushPayload::default().resolve(defaults)
    }
}

impl PushPayload {
    pub fn with_notification(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Some(NotificationContent {
                title: Some(title.into()),
                body: Some(body.into()),
            }),
            data: None,
        }
    }

    /// Read a decoded JSON message field by field
    ///
    /// A mistyped field is dropped on its own; the rest of the message,
    /// in particular `data`, is kept.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<PushPayload>(value.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Push payload has mistyped fields, keeping what is usable");
                let notification = value
                    .get("notification")
                    .and_then(Value::as_object)
                    .map(|block| NotificationContent {
                        title: block.get("title").and_then(Value::as_str).map(String::from),
                        body: block.get("body").and_then(Value::as_str).map(String::from),
                    });
                let data = value.get("data").and_then(Value::as_object).cloned();
                Self { notification, data }
            }
        }
    }

    /// Builder method: add a data field
    pub fn data_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Resolve title and body
    ///
    /// The notification block wins when present; otherwise `title`/`body`
    /// inside the data map are used; otherwise the default title and an
    /// empty body. Empty strings count as missing.
    pub fn resolve(&self, defaults: &NotificationDefaults) -> Notification {
        let (title, body) = match (&self.notification, &self.data) {
            (Some(content), _) => (
                non_empty(content.title.as_deref()),
                non_empty(content.body.as_deref()),
            ),
            (None, Some(data)) => (data_str(data, "title"), data_str(data, "body")),
            (None, None) => (None, None),
        };

        Notification {
            title: title.unwrap_or(defaults.title.as_str()).to_string(),
            body: body.unwrap_or_default().to_string(),
            icon: defaults.icon.clone(),
            data: self.data.clone().unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn data_str<'a>(data: &'a PayloadData, key: &str) -> Option<&'a str> {
    non_empty(data.get(key).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PushPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_mistyped_notification_keeps_data() {
        let value = serde_json::json!({
            "notification": {"title": 5, "body": "B"},
            "data": {"petId": "7"}
        });
        let notification = PushPayload::from_value(value).resolve(&NotificationDefaults::default());
        assert_eq!(notification.title, DEFAULT_TITLE);
        assert_eq!(notification.body, "B");
        assert_eq!(notification.data["petId"], "7");
    }

    #[test]
    fn test_from_value_non_object() {
        let payload = PushPayload::from_value(serde_json::json!([1, 2, 3]));
        assert_eq!(payload, PushPayload::default());
    }

    #[test]
    fn test_notification_block() {
        let payload = parse(r#"{"notification": {"title": "A", "body": "B"}}"#);
        let notification = payload.resolve(&NotificationDefaults::default());
        assert_eq!(notification.title, "A");
        assert_eq!(notification.body, "B");
        assert_eq!(notification.icon, DEFAULT_ICON);
        assert!(notification.data.is_empty());
    }

    #[test]
    fn test_data_only() {
        let payload = parse(r#"{"data": {"title": "C", "body": "D", "petId": "7"}}"#);
        let notification = payload.resolve(&NotificationDefaults::default());
        assert_eq!(notification.title, "C");
        assert_eq!(notification.body, "D");
        assert_eq!(notification.data.get("petId"), Some(&Value::from("7")));
    }

    #[test]
    fn test_empty_payload() {
        let notification = parse("{}").resolve(&NotificationDefaults::default());
        assert_eq!(notification.title, DEFAULT_TITLE);
        assert_eq!(notification.body, "");
        assert_eq!(notification, Notification::fallback(&NotificationDefaults::default()));
    }

    #[test]
    fn test_notification_block_wins_over_data() {
        let payload = parse(
            r#"{"notification": {"body": "from block"}, "data": {"title": "ignored", "body": "ignored"}}"#,
        );
        let notification = payload.resolve(&NotificationDefaults::default());
        assert_eq!(notification.title, DEFAULT_TITLE);
        assert_eq!(notification.body, "from block");
        // Data still travels with the notification
        assert_eq!(notification.data.len(), 2);
    }

    #[test]
    fn test_empty_strings_fall_back() {
        let payload = PushPayload::with_notification("", "");
        let defaults = NotificationDefaults {
            title: "Reminder".to_string(),
            icon: "/pet.png".to_string(),
        };
        let notification = payload.resolve(&defaults);
        assert_eq!(notification.title, "Reminder");
        assert_eq!(notification.body, "");
        assert_eq!(notification.icon, "/pet.png");
    }

    #[test]
    fn test_non_string_data_title_ignored() {
        let payload = PushPayload::default()
            .data_field("title", 42)
            .data_field("body", "Vaccine due");
        let notification = payload.resolve(&NotificationDefaults::default());
        assert_eq!(notification.title, DEFAULT_TITLE);
        assert_eq!(notification.body, "Vaccine due");
    }
}
