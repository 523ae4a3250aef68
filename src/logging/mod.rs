//! Tracing setup.
//!
//! Diagnostics go to stderr so that tables and JSON on stdout stay parseable.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the `EnvFilter` directives for `config`: the base level followed by
/// one `panelctl::<component>=<level>` entry per override, in module order.
///
/// # Examples
///
/// ```
/// use panelctl::config::LoggingConfig;
/// use panelctl::logging::build_filter_directives;
///
/// let mut config = LoggingConfig::default();
/// config
///     .component_levels
///     .insert("dashboard".to_string(), "debug".to_string());
///
/// assert_eq!(build_filter_directives(&config), "warn,panelctl::dashboard=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    config
        .component_levels
        .iter()
        .fold(config.level.clone(), |mut filter, (component, level)| {
            filter.push_str(&format!(",panelctl::{}={}", component, level));
            filter
        })
}

/// Initialize tracing based on configuration
///
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}
