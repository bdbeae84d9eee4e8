//! Operational knobs, resolved once from [`ScoutConfig`].

use std::time::Duration;

use scout_config::{RefinementPolicy, ScoutConfig};

/// Limits, budgets and policies used by every pipeline stage.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub academic_limit: usize,
    pub grey_limit: usize,
    pub academic_timeout: Duration,
    pub grey_timeout: Duration,
    pub llm_timeout: Duration,
    pub autopilot_threshold: usize,
    pub refinement_policy: RefinementPolicy,
    pub relevance_concurrency: usize,
    pub snowball_limit: usize,
    pub prompt_abstract_chars: usize,
}

impl From<&ScoutConfig> for PipelineSettings {
    fn from(config: &ScoutConfig) -> Self {
        Self {
            academic_limit: config.academic.page_size as usize,
            grey_limit: config.grey.max_results as usize,
            academic_timeout: Duration::from_secs(config.academic.timeout_secs),
            grey_timeout: Duration::from_secs(config.grey.timeout_secs),
            llm_timeout: Duration::from_secs(config.llm.timeout_secs),
            autopilot_threshold: config.pipeline.autopilot_threshold as usize,
            refinement_policy: config.pipeline.refinement_policy,
            relevance_concurrency: config.pipeline.relevance_concurrency.max(1) as usize,
            snowball_limit: config.pipeline.snowball_limit as usize,
            prompt_abstract_chars: config.pipeline.prompt_abstract_chars as usize,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&ScoutConfig::default())
    }
}
