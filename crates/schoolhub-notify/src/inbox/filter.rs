//! Tab and audience filtering.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::record::{NotificationKind, NotificationRecord};

/// One inbox tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InboxTab {
    /// Every kind.
    #[default]
    All,
    /// A single kind.
    Kind(NotificationKind),
}

impl InboxTab {
    /// Parse a tab name. `"all"` (any case) or empty selects every kind.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Kind(NotificationKind::parse(name))
        }
    }

    /// Tab name as configured.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Kind(kind) => kind.as_str(),
        }
    }

    /// Whether `record` belongs on this tab.
    pub fn matches(&self, record: &NotificationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Kind(kind) => &record.kind == kind,
        }
    }

    /// Build the tab set from configured names. `All` always comes first
    /// and duplicates are dropped.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        let mut tabs = vec![Self::All];
        for tab in names.iter().map(|n| Self::parse(n.as_ref())) {
            if !tabs.contains(&tab) {
                tabs.push(tab);
            }
        }
        tabs
    }
}

impl fmt::Display for InboxTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InboxTab {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Whether a viewer with `viewer_role` may see `record`.
///
/// Records without a recipient role are public. An unknown viewer role
/// hides nothing.
pub fn visible_to(record: &NotificationRecord, viewer_role: Option<&str>) -> bool {
    match (record.recipient_role.as_deref(), viewer_role) {
        (Some(target), Some(viewer)) => target.eq_ignore_ascii_case(viewer),
        _ => true,
    }
}
