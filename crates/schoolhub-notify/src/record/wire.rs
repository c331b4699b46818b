//! Persisted JSON shape of a notification.
//!
//! Older producers wrote records with overlapping field names
//! (`id`/`notificationId`, `read`/`isRead`, `createdAt`/`timestamp`,
//! `userId`/`recipientId`), numeric ids, and missing fields. This module is
//! the only place those aliases exist: records are written with every alias
//! filled in, and read back from whichever subset is present.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use schoolhub_core::types::id::{NotificationId, ReferenceId, UserId};

use super::kind::NotificationKind;
use super::model::NotificationRecord;
use super::payload::NewNotification;

/// One element of the persisted `notifications` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNotification {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub notification_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub reference_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub recipient_id: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub recipient_role: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "loose_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub priority: Option<String>,
    #[serde(
        default,
        deserialize_with = "loose_timestamp",
        serialize_with = "iso_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "loose_timestamp",
        serialize_with = "iso_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "loose_flag")]
    pub read: Option<bool>,
    #[serde(default, deserialize_with = "loose_flag")]
    pub is_read: Option<bool>,
    #[serde(default, deserialize_with = "loose_flag")]
    pub persistent: Option<bool>,
    #[serde(default, deserialize_with = "loose_flag")]
    pub auto_dismiss: Option<bool>,
    #[serde(default, deserialize_with = "loose_millis")]
    pub duration_ms: Option<u64>,
}

impl From<&NotificationRecord> for StoredNotification {
    fn from(record: &NotificationRecord) -> Self {
        let recipient = record.recipient_id.as_ref().map(|u| u.to_string());
        Self {
            id: Some(record.id.to_string()),
            notification_id: Some(record.id.to_string()),
            reference_id: record.reference_id.as_ref().map(|r| r.to_string()),
            user_id: recipient.clone(),
            recipient_id: recipient,
            recipient_role: record.recipient_role.clone(),
            kind: Some(record.kind.to_string()),
            title: record.title.clone(),
            message: Some(record.message.clone()),
            sender: record.sender.clone(),
            priority: record.priority.clone(),
            created_at: Some(record.created_at),
            timestamp: Some(record.created_at),
            read: Some(record.read),
            is_read: Some(record.read),
            persistent: Some(record.persistent),
            auto_dismiss: Some(record.auto_dismiss),
            duration_ms: record.duration_ms,
        }
    }
}

impl From<StoredNotification> for NewNotification {
    fn from(stored: StoredNotification) -> Self {
        let read = match (stored.read, stored.is_read) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
        };

        NewNotification {
            id: stored
                .id
                .filter(|s| !s.is_empty())
                .or(stored.notification_id)
                .map(NotificationId::from),
            reference_id: stored.reference_id.map(ReferenceId::from),
            recipient_id: stored.recipient_id.or(stored.user_id).map(UserId::from),
            recipient_role: stored.recipient_role,
            kind: stored.kind.map(NotificationKind::from),
            title: stored.title,
            message: stored.message.unwrap_or_default(),
            sender: stored.sender,
            priority: stored.priority,
            created_at: stored.created_at.or(stored.timestamp),
            read,
            persistent: stored.persistent.unwrap_or(false),
            auto_dismiss: stored.auto_dismiss,
            duration_ms: stored.duration_ms,
        }
    }
}

/// Serialize the full list as a JSON array.
pub fn encode_list(records: &[NotificationRecord]) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredNotification> = records.iter().map(StoredNotification::from).collect();
    serde_json::to_string(&stored)
}

/// Parse a persisted list into producer payloads.
///
/// Unparsable or non-array input yields an empty list. Elements that are not
/// objects, or whose fields have unusable types, are skipped.
pub fn decode_list(raw: &str) -> Vec<NewNotification> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Discarding unparsable notification list");
            return Vec::new();
        }
    };

    let Value::Array(items) = value else {
        warn!("Discarding notification list: not a JSON array");
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!(index, "Skipping non-object notification entry");
                return None;
            }
            match serde_json::from_value::<StoredNotification>(item) {
                Ok(stored) => Some(NewNotification::from(stored)),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed notification entry");
                    None
                }
            }
        })
        .collect()
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn loose_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn loose_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        _ => None,
    })
}

fn loose_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    })
}

fn iso_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}
