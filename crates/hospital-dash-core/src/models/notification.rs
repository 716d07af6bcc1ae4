//! Notification models.

use serde::{Deserialize, Serialize};

use super::{null_as_default, truthy, RecordId};

/// What a notification is about; drives its icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    Surgery,
    Patient,
    Supply,
    Alert,
    Other(String),
}

impl From<String> for NotificationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "surgery" => NotificationKind::Surgery,
            "patient" => NotificationKind::Patient,
            "supply" => NotificationKind::Supply,
            "alert" => NotificationKind::Alert,
            _ => NotificationKind::Other(s),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Surgery => "surgery".into(),
            NotificationKind::Patient => "patient".into(),
            NotificationKind::Supply => "supply".into(),
            NotificationKind::Alert => "alert".into(),
            NotificationKind::Other(s) => s,
        }
    }
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Other("other".into())
    }
}

/// A notification as returned by `/api/notifications`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: NotificationKind,
    /// RFC 3339 or naive ISO timestamp
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "truthy")]
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_notification() {
        let n: Notification = serde_json::from_str(
            r#"{"id": 9, "message": "Low gauze", "type": "supply", "created_at": "2026-01-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::Supply);
        assert!(!n.read);
    }

    #[test]
    fn test_read_flag_accepts_integers_and_null() {
        let list: Vec<Notification> = serde_json::from_str(
            r#"[
                {"id": 1, "message": "a", "type": "alert", "created_at": "2026-01-01T10:00:00", "read": 0},
                {"id": 2, "message": "b", "type": "alert", "created_at": "2026-01-01T10:00:00", "read": 1},
                {"id": 3, "message": "c", "type": null, "created_at": null, "read": null},
                {"id": 4, "message": null, "type": "patient", "created_at": "2026-01-01T10:00:00", "read": true}
            ]"#,
        )
        .unwrap();
        let read: Vec<bool> = list.iter().map(|n| n.read).collect();
        assert_eq!(read, vec![false, true, false, true]);
        assert_eq!(list[2].kind, NotificationKind::default());
        assert_eq!(list[2].created_at, "");
        assert_eq!(list[3].message, "");
    }

    #[test]
    fn test_unknown_kind_preserved() {
        let kind: NotificationKind = serde_json::from_str("\"billing\"").unwrap();
        assert_eq!(kind, NotificationKind::Other("billing".into()));
    }
}
