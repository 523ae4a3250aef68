//! Text formatting for terminal output

use super::ConnectionState;
use crate::api::{Backup, OverviewStats, Service, ServiceState, UpdateInfo, UpdateProgress, User};
use chrono::NaiveDateTime;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::fmt::Write;

/// Placeholder for a region whose data could not be loaded
pub const NO_DATA: &str = "No data";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format the status indicator line
pub fn format_status(state: ConnectionState) -> String {
    match state {
        ConnectionState::Connected => format!("Status: {} {}", "●".green(), "Online".green()),
        ConnectionState::Disconnected => format!("Status: {} {}", "●".red(), "Offline".red()),
    }
}

/// Format overview counters
pub fn format_overview(stats: &OverviewStats) -> String {
    let mut output = String::new();
    let disk = if stats.disk_usage.is_empty() {
        "?"
    } else {
        stats.disk_usage.as_str()
    };

    let _ = writeln!(output, "Active users:     {}", stats.active_users);
    let _ = writeln!(output, "Rooms:            {}", stats.total_rooms);
    let _ = writeln!(output, "Running services: {}", stats.running_services);
    let _ = write!(output, "Disk usage:       {}", disk);
    output
}

/// Format services as a table
pub fn format_services_table(services: &[Service]) -> String {
    let mut table = new_table(vec!["Service", "Status", "Description"]);

    for s in services {
        let status = match s.status {
            ServiceState::Running => "running".green().to_string(),
            ServiceState::Stopped => "stopped".red().to_string(),
        };
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(status),
            Cell::new(&s.description),
        ]);
    }

    table.to_string()
}

/// Format users as a table
pub fn format_users_table(users: &[User]) -> String {
    let mut table = new_table(vec!["Username", "Email", "Status"]);

    for u in users {
        let status = if u.is_active() {
            u.status.green().to_string()
        } else {
            u.status.yellow().to_string()
        };
        table.add_row(vec![
            Cell::new(&u.username),
            Cell::new(u.email.as_deref().unwrap_or("-")),
            Cell::new(status),
        ]);
    }

    table.to_string()
}

/// Format backups as a table
pub fn format_backups_table(backups: &[Backup]) -> String {
    let mut table = new_table(vec!["Backup", "Size", "Date"]);

    for b in backups {
        table.add_row(vec![
            Cell::new(&b.name),
            Cell::new(format!("{:.1} MB", b.size_mb())),
            Cell::new(format_backup_date(&b.date)),
        ]);
    }

    table.to_string()
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`, or verbatim if it
/// doesn't parse.
pub fn format_backup_date(date: &str) -> String {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Format update info
pub fn format_update_info(info: &UpdateInfo) -> String {
    let availability = if info.update_available {
        "update available".yellow()
    } else {
        "up to date".green()
    };
    format!(
        "Version: {} (latest: {}) - {}",
        info.current_version, info.latest_version, availability
    )
}

/// Format update progress as a bar
pub fn format_progress(progress: &UpdateProgress) -> String {
    const WIDTH: usize = 30;
    let percent = progress.progress.min(100) as usize;
    let filled = percent * WIDTH / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled));
    let bar = if progress.completed {
        bar.green()
    } else {
        bar.cyan()
    };
    format!("[{}] {:>3}% {}", bar, percent, progress.message)
}
