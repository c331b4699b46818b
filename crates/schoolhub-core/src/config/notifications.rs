//! Notification engine configuration.

use serde::{Deserialize, Serialize};

/// Notification store and presenter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Durable storage key holding the serialized notification list.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Banner (toast) presenter settings.
    #[serde(default)]
    pub banner: BannerConfig,
    /// Inbox presenter settings.
    #[serde(default)]
    pub inbox: InboxConfig,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            banner: BannerConfig::default(),
            inbox: InboxConfig::default(),
        }
    }
}

/// Banner presenter timing and capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Maximum number of banners shown at once.
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    /// Visible duration for records without an explicit `durationMs`.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    /// Countdown restarted after hover for records without an explicit
    /// `durationMs`. Records with one restart at half of it.
    #[serde(default = "default_resume_duration_ms")]
    pub resume_duration_ms: u64,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            default_duration_ms: default_duration_ms(),
            resume_duration_ms: default_resume_duration_ms(),
        }
    }
}

/// Inbox presenter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Tab set, in display order. `"all"` shows every kind.
    #[serde(default = "default_tabs")]
    pub tabs: Vec<String>,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            tabs: default_tabs(),
        }
    }
}

fn default_storage_key() -> String {
    "notifications".to_string()
}

fn default_max_visible() -> usize {
    3
}

fn default_duration_ms() -> u64 {
    6500
}

fn default_resume_duration_ms() -> u64 {
    3000
}

fn default_tabs() -> Vec<String> {
    vec![
        "all".to_string(),
        "message".to_string(),
        "notice".to_string(),
        "system".to_string(),
    ]
}
