//! Per-invocation setup shared by every panel command.

use super::GlobalArgs;
use crate::api::{HttpPanelApi, PanelApi};
use crate::config::PanelConfig;
use crate::dashboard::DashboardClient;
use crate::view::{DashboardView, MemoryView, TerminalView};
use std::error::Error;
use std::sync::Arc;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &GlobalArgs) -> Result<PanelConfig, Box<dyn Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        PanelConfig::load(Some(&args.config))?
    } else {
        PanelConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(ref url) = args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

enum Output {
    Terminal,
    Json(Arc<MemoryView>),
}

/// A dashboard client wired to the configured API and the chosen output.
pub struct Session {
    pub client: DashboardClient,
    output: Output,
}

impl Session {
    /// Connect to the API named by `config`.
    pub fn connect(config: &PanelConfig, json: bool) -> Result<Self, Box<dyn Error>> {
        let api = HttpPanelApi::new(&config.api)?;
        tracing::debug!(base_url = %api.base_url(), "Using panel API");
        Ok(Self::with_api(Arc::new(api), config, json))
    }

    /// Build a session around any API implementation.
    pub fn with_api(api: Arc<dyn PanelApi>, config: &PanelConfig, json: bool) -> Self {
        let (view, output): (Arc<dyn DashboardView>, Output) = if json {
            let memory = Arc::new(MemoryView::new());
            (memory.clone(), Output::Json(memory))
        } else {
            (Arc::new(TerminalView::stdout()), Output::Terminal)
        };

        Self {
            client: DashboardClient::new(api, view, config.refresh.clone()),
            output,
        }
    }

    /// JSON snapshot of everything rendered so far, if in JSON mode.
    pub fn json_output(&self) -> Option<String> {
        match &self.output {
            Output::Json(memory) => serde_json::to_string_pretty(&memory.snapshot()).ok(),
            Output::Terminal => None,
        }
    }

    /// Flush output and turn a failed command into an error exit.
    pub fn finish(self, ok: bool, failure: &str) -> Result<(), Box<dyn Error>> {
        self.client.stop();
        if let Some(json) = self.json_output() {
            println!("{}", json);
        }

        if ok {
            Ok(())
        } else {
            Err(failure.into())
        }
    }
}
