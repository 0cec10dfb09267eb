use crate::core::tiers::{
    GatingPolicy, PerformanceTable, SlotTiers, TierTable, DEFAULT_NOTES_TEMPLATE,
};
use crate::domain::model::{ComponentSlot, MAX_PRICE};
use crate::domain::ports::{AdvisorSettings, UpstreamSettings};
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{
    validate_contains, validate_non_empty_string, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
/// Tier thresholds above this are never reachable by a sane budget.
pub const MAX_TIER_THRESHOLD: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub advisor: AdvisorSection,
    pub upstream: Option<UpstreamConfig>,
    pub performance: Option<PerformanceTable>,
    /// Per-slot overrides on top of the reference tier table.
    #[serde(default)]
    pub tiers: BTreeMap<ComponentSlot, SlotTiers>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSection {
    #[serde(default)]
    pub policy: GatingPolicy,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_notes_template")]
    pub notes_template: String,
}

impl Default for AdvisorSection {
    fn default() -> Self {
        Self {
            policy: GatingPolicy::default(),
            currency_symbol: default_currency_symbol(),
            notes_template: default_notes_template(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₱".to_string()
}

fn default_notes_template() -> String {
    DEFAULT_NOTES_TEMPLATE.to_string()
}

/// The endpoint must accept the build request and answer with a build object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl UpstreamConfig {
    /// A blank token, or a `${VAR}` placeholder left unresolved, disables the upstream.
    pub fn usable_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty() && !(token.starts_with("${") && token.ends_with('}')))
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl AdvisorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HF_TOKEN})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdvisorError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("advisor.currency_symbol", &self.advisor.currency_symbol)?;
        validate_contains(
            "advisor.notes_template",
            &self.advisor.notes_template,
            "{budget}",
        )?;

        if let Some(upstream) = &self.upstream {
            match upstream.endpoint() {
                Some(endpoint) => validate_url("upstream.endpoint", endpoint)?,
                None if upstream.usable_token().is_some() => {
                    return Err(AdvisorError::MissingConfigError {
                        field: "upstream.endpoint".to_string(),
                    })
                }
                None => {}
            }
            if let Some(timeout) = upstream.timeout_seconds {
                validate_range("upstream.timeout_seconds", timeout, 1, 300)?;
            }
        }

        if let Some(performance) = &self.performance {
            validate_non_empty_string("performance.default", &performance.default)?;
            for (i, band) in performance.bands.iter().enumerate() {
                validate_non_empty_string(&format!("performance.bands[{}].summary", i), &band.summary)?;
            }
        }

        for (slot, tiers) in &self.tiers {
            if tiers.options.is_empty() {
                return Err(AdvisorError::ConfigValidationError {
                    field: format!("tiers.{}.options", slot),
                    message: "at least one tier is required".to_string(),
                });
            }
            for (i, tier) in tiers.options.iter().enumerate() {
                let field = format!("tiers.{}.options[{}]", slot, i);
                validate_non_empty_string(&format!("{}.model", field), &tier.model)?;
                validate_range(&format!("{}.price", field), tier.price, 0, MAX_PRICE)?;
                validate_range(
                    &format!("{}.min_budget", field),
                    tier.min_budget,
                    0,
                    MAX_TIER_THRESHOLD,
                )?;
            }
        }

        Ok(())
    }

    pub fn upstream_enabled(&self) -> bool {
        self.upstream().is_some()
    }
}

impl AdvisorSettings for AdvisorConfig {
    fn policy(&self) -> GatingPolicy {
        self.advisor.policy
    }

    fn tier_table(&self) -> TierTable {
        let mut table = TierTable::reference();
        for (slot, tiers) in &self.tiers {
            table.set(*slot, tiers.clone());
        }
        table
    }

    fn performance_table(&self) -> PerformanceTable {
        self.performance.clone().unwrap_or_default()
    }

    fn notes_template(&self) -> &str {
        &self.advisor.notes_template
    }

    fn currency_symbol(&self) -> &str {
        &self.advisor.currency_symbol
    }

    fn upstream(&self) -> Option<UpstreamSettings> {
        let upstream = self.upstream.as_ref()?;
        let token = upstream.usable_token()?;
        Some(UpstreamSettings {
            endpoint: upstream.endpoint()?.to_string(),
            api_token: token.to_string(),
            model: upstream.model.clone(),
            timeout: upstream.timeout(),
        })
    }
}

impl Validate for AdvisorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
