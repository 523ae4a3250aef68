//! panelctl - terminal client for the Matrix server management panel
//!
//! This library provides a typed client for the panel's REST API and a
//! dashboard controller that keeps a view in sync with it: connection
//! status, section data, user actions, auto-refresh and update progress.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod view;
