//! In-memory view that remembers the latest rendered state.

use super::{DashboardView, Notice, Region, RegionContent};
use crate::dashboard::Section;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Point-in-time copy of everything a [`MemoryView`] has been told.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Currently visible section, if any was selected
    pub section: Option<Section>,
    /// Latest content per region
    pub regions: BTreeMap<Region, RegionContent>,
    /// Whether the error banner is showing
    pub error_banner: bool,
    /// Every notice posted so far, oldest first
    pub notices: Vec<Notice>,
    /// How many times each region was rendered
    #[serde(skip)]
    pub render_counts: BTreeMap<Region, usize>,
}

/// View that stores state instead of drawing it.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: RwLock<Snapshot>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.read().unwrap().clone()
    }

    /// Latest content of `region`, if it was ever rendered.
    pub fn region(&self, region: Region) -> Option<RegionContent> {
        self.state.read().unwrap().regions.get(&region).cloned()
    }

    pub fn render_count(&self, region: Region) -> usize {
        self.state
            .read()
            .unwrap()
            .render_counts
            .get(&region)
            .copied()
            .unwrap_or(0)
    }

    pub fn error_banner(&self) -> bool {
        self.state.read().unwrap().error_banner
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.state.read().unwrap().notices.clone()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.state.read().unwrap().notices.last().cloned()
    }

    pub fn section(&self) -> Option<Section> {
        self.state.read().unwrap().section
    }

    /// True when any region failed to load or any action failed.
    pub fn has_failures(&self) -> bool {
        let state = self.state.read().unwrap();
        state.error_banner || state.notices.iter().any(Notice::is_error)
    }
}

impl DashboardView for MemoryView {
    fn show_section(&self, section: Section) {
        self.state.write().unwrap().section = Some(section);
    }

    fn render(&self, region: Region, content: RegionContent) {
        let mut state = self.state.write().unwrap();
        *state.render_counts.entry(region).or_insert(0) += 1;
        state.regions.insert(region, content);
    }

    fn set_error_banner(&self, visible: bool) {
        self.state.write().unwrap().error_banner = visible;
    }

    fn notify(&self, notice: Notice) {
        self.state.write().unwrap().notices.push(notice);
    }
}
