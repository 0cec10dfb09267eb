use crate::config::toml_config::{AdvisorConfig, UpstreamConfig};
use crate::core::tiers::GatingPolicy;
use crate::domain::model::{OwnedComponent, OwnedComponents};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pc-build-advisor")]
#[command(about = "Recommend a PC parts list for a budget and the parts you already own")]
pub struct CliConfig {
    /// Budget in PHP
    #[arg(short, long, allow_hyphen_values = true)]
    pub budget: String,

    /// Part you already own, e.g. --owned processor="i5-10400" (repeatable)
    #[arg(short, long, value_name = "SLOT=MODEL")]
    pub owned: Vec<OwnedComponent>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gating policy: coarse, remaining or remaining-snapshot
    #[arg(long)]
    pub policy: Option<GatingPolicy>,

    /// Never call the inference endpoint
    #[arg(long)]
    pub offline: bool,

    /// API token for the inference endpoint
    #[arg(long)]
    pub api_token: Option<String>,

    /// Inference endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the build as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn owned_components(&self) -> OwnedComponents {
        self.owned.iter().cloned().collect()
    }

    /// Loads the config file (if any), applies command-line overrides and validates.
    pub fn load_settings(&self) -> Result<AdvisorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                AdvisorConfig::from_file(path)?
            }
            None => AdvisorConfig::default(),
        };

        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AdvisorConfig) {
        if let Some(policy) = self.policy {
            tracing::info!("🔧 Gating policy overridden to: {}", policy);
            config.advisor.policy = policy;
        }

        if self.api_token.is_some() || self.endpoint.is_some() {
            let upstream = config.upstream.get_or_insert_with(UpstreamConfig::default);
            if let Some(token) = &self.api_token {
                upstream.api_token = Some(token.clone());
            }
            if let Some(endpoint) = &self.endpoint {
                upstream.endpoint = Some(endpoint.clone());
            }
        }

        if self.offline {
            config.upstream = None;
        }
    }
}
