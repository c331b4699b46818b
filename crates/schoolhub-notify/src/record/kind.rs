//! Notification kind enumeration.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a notification. Drives the icon and the navigation target. Producers may introduce their own kinds; those are
/// carried as [`NotificationKind::Other`] and route to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    /// A direct message between users.
    Message,
    /// A notice-board post.
    Notice,
    /// A homework assignment.
    Homework,
    /// A system notification (the default).
    #[default]
    System,
    /// Feedback that an action succeeded.
    Success,
    /// Feedback that an action failed.
    Error,
    /// A producer-defined kind.
    Other(String),
}

impl NotificationKind {
    /// Parse a kind from its wire name. Empty input yields the default kind.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "system" => Self::System,
            "message" => Self::Message,
            "notice" => Self::Notice,
            "homework" => Self::Homework,
            "success" => Self::Success,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }

    /// Return the kind's wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Message => "message",
            Self::Notice => "notice",
            Self::Homework => "homework",
            Self::System => "system",
            Self::Success => "success",
            Self::Error => "error",
            Self::Other(name) => name,
        }
    }

    /// Icon name shown next to the notification.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Message => "mail",
            Self::Notice => "megaphone",
            Self::Homework => "book-open",
            Self::System => "info",
            Self::Success => "check-circle",
            Self::Error => "alert-circle",
            Self::Other(_) => "bell",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kinds_parse() {
        assert_eq!(NotificationKind::parse("message"), NotificationKind::Message);
        assert_eq!(NotificationKind::parse("notice"), NotificationKind::Notice);
        assert_eq!(NotificationKind::parse(""), NotificationKind::System);
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let kind = NotificationKind::parse("fee");
        assert_eq!(kind, NotificationKind::Other("fee".to_string()));
        assert_eq!(kind.as_str(), "fee");
        assert_eq!(kind.icon(), "bell");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&NotificationKind::Homework).unwrap();
        assert_eq!(json, "\"homework\"");
        let back: NotificationKind = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(back, NotificationKind::Error);
    }
}
