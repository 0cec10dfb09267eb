use crate::core::tiers::{GatingPolicy, PerformanceTable, TierTable};
use crate::domain::model::{BuildRequest, BuildResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// An external source of builds. Whatever it returns must already conform to
/// the `BuildResult` schema; any error makes the advisor fall back.
#[async_trait]
pub trait BuildGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: &BuildRequest) -> Result<BuildResult>;
}

pub trait AdvisorSettings: Send + Sync {
    fn policy(&self) -> GatingPolicy;
    fn tier_table(&self) -> TierTable;
    fn performance_table(&self) -> PerformanceTable;
    fn notes_template(&self) -> &str;
    fn currency_symbol(&self) -> &str;

    /// `None` when no usable upstream is configured.
    fn upstream(&self) -> Option<UpstreamSettings>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamSettings {
    pub endpoint: String,
    pub api_token: String,
    pub model: Option<String>,
    pub timeout: Duration,
}
