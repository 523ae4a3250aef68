//! Dashboard sections and what each one loads.

use crate::view::Region;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named view, shown exclusively of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Overview,
    Services,
    Users,
    Backups,
    Updates,
    /// Local-only section, nothing to fetch
    Settings,
}

/// Remote collection that can be listed and acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Services,
    Users,
    Backups,
}

impl ResourceKind {
    /// Region the collection is rendered into.
    pub fn region(&self) -> Region {
        match self {
            ResourceKind::Services => Region::Services,
            ResourceKind::Users => Region::Users,
            ResourceKind::Backups => Region::Backups,
        }
    }
}

/// Data a section needs when it becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Overview,
    List(ResourceKind),
    Updates,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section '{0}' (expected one of: overview, services, users, backups, updates, settings)")]
pub struct SectionParseError(pub String);

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Overview,
        Section::Services,
        Section::Users,
        Section::Backups,
        Section::Updates,
        Section::Settings,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Services => "services",
            Section::Users => "users",
            Section::Backups => "backups",
            Section::Updates => "updates",
            Section::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Services => "Services",
            Section::Users => "Users",
            Section::Backups => "Backups",
            Section::Updates => "Updates",
            Section::Settings => "Settings",
        }
    }

    /// What to fetch when this section is selected; `None` for sections
    /// that only switch visually.
    pub fn loader(&self) -> Option<Loader> {
        match self {
            Section::Overview => Some(Loader::Overview),
            Section::Services => Some(Loader::List(ResourceKind::Services)),
            Section::Users => Some(Loader::List(ResourceKind::Users)),
            Section::Backups => Some(Loader::List(ResourceKind::Backups)),
            Section::Updates => Some(Loader::Updates),
            Section::Settings => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.id() == wanted)
            .ok_or_else(|| SectionParseError(s.to_string()))
    }
}
