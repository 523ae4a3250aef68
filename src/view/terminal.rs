//! Terminal renderer.

use super::format::{
    format_backups_table, format_overview, format_progress, format_services_table,
    format_status, format_update_info, format_users_table, NO_DATA,
};
use super::{DashboardView, Notice, NoticeLevel, Region, RegionContent};
use crate::dashboard::Section;
use colored::Colorize;
use std::io::{self, Write};
use std::sync::Mutex;

struct Inner<W> {
    out: W,
    banner: bool,
}

/// Prints every render to a writer, stdout by default.
///
/// The error banner is printed only when it changes state, so a dead API
/// polled every few seconds produces one warning, not a stream of them.
pub struct TerminalView<W: Write + Send = io::Stdout> {
    inner: Mutex<Inner<W>>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: Mutex::new(Inner { out, banner: false }),
        }
    }

    pub fn into_inner(self) -> W {
        match self.inner.into_inner() {
            Ok(inner) => inner.out,
            Err(poisoned) => poisoned.into_inner().out,
        }
    }

    fn write_block(&self, text: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Err(e) = writeln!(inner.out, "{}", text).and_then(|_| inner.out.flush()) {
            tracing::debug!(error = %e, "Failed to write to terminal");
        }
    }
}

fn region_title(region: Region) -> &'static str {
    match region {
        Region::Status => "Status",
        Region::Overview => "Overview",
        Region::Services => "Services",
        Region::Users => "Users",
        Region::Backups => "Backups",
        Region::Updates => "Updates",
        Region::UpdateProgress => "Update progress",
    }
}

/// Text for one region, without the title.
pub fn render_content(content: &RegionContent) -> String {
    match content {
        RegionContent::Status(state) => format_status(*state),
        RegionContent::Overview(stats) => format_overview(stats),
        RegionContent::Services(services) => format_services_table(services),
        RegionContent::Users(users) => format_users_table(users),
        RegionContent::Backups(backups) => format_backups_table(backups),
        RegionContent::Updates(info) => format_update_info(info),
        RegionContent::Progress(progress) => format_progress(progress),
        RegionContent::NoData => NO_DATA.dimmed().to_string(),
    }
}

impl<W: Write + Send + 'static> DashboardView for TerminalView<W> {
    fn show_section(&self, section: Section) {
        self.write_block(&format!("\n== {} ==", section.title()).bold().to_string());
    }

    fn render(&self, region: Region, content: RegionContent) {
        let body = render_content(&content);
        match region {
            // Single-line regions don't need a title
            Region::Status | Region::UpdateProgress => self.write_block(&body),
            _ => self.write_block(&format!("{}\n{}", region_title(region).bold(), body)),
        }
    }

    fn set_error_banner(&self, visible: bool) {
        let changed = {
            let mut inner = self.inner.lock().unwrap();
            std::mem::replace(&mut inner.banner, visible) != visible
        };
        if !changed {
            return;
        }

        if visible {
            self.write_block(&"⚠ Panel API unavailable".red().bold().to_string());
        } else {
            self.write_block(&"✓ Panel API reachable".green().to_string());
        }
    }

    fn notify(&self, notice: Notice) {
        let line = match notice.level {
            NoticeLevel::Success => format!("{} {}", "✓".green(), notice.message),
            NoticeLevel::Error => format!("{} {}", "✗".red(), notice.message.red()),
        };
        self.write_block(&line);
    }
}
