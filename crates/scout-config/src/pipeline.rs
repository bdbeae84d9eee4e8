//! Scout-and-mine pipeline tuning.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Smallest reference cap accepted for snowball mining.
pub const SNOWBALL_LIMIT_MIN: u32 = 5;
/// Largest reference cap accepted for snowball mining.
pub const SNOWBALL_LIMIT_MAX: u32 = 10;

/// What the auto-pilot does with a refinement proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementPolicy {
    /// Re-run fetch + filter on the first proposed query and merge results.
    #[default]
    AutoFirst,
    /// Keep the proposal for the user to trigger one manual hop.
    Surface,
}

const fn default_autopilot_threshold() -> u32 {
    3
}

const fn default_relevance_concurrency() -> u32 {
    4
}

const fn default_snowball_limit() -> u32 {
    SNOWBALL_LIMIT_MAX
}

const fn default_prompt_abstract_chars() -> u32 {
    4000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Auto-pilot engages when fewer relevant results than this survive the
    /// first filtered fetch.
    #[serde(default = "default_autopilot_threshold")]
    pub autopilot_threshold: u32,

    #[serde(default)]
    pub refinement_policy: RefinementPolicy,

    /// Upper bound on in-flight relevance judgments.
    #[serde(default = "default_relevance_concurrency")]
    pub relevance_concurrency: u32,

    /// References fetched per snowball hop.
    #[serde(default = "default_snowball_limit")]
    pub snowball_limit: u32,

    /// Characters of abstract or document text included in a prompt.
    #[serde(default = "default_prompt_abstract_chars")]
    pub prompt_abstract_chars: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            autopilot_threshold: default_autopilot_threshold(),
            refinement_policy: RefinementPolicy::default(),
            relevance_concurrency: default_relevance_concurrency(),
            snowball_limit: default_snowball_limit(),
            prompt_abstract_chars: default_prompt_abstract_chars(),
        }
    }
}

impl PipelineConfig {
    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.relevance_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.relevance_concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(SNOWBALL_LIMIT_MIN..=SNOWBALL_LIMIT_MAX).contains(&self.snowball_limit) {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.snowball_limit".into(),
                reason: format!(
                    "must be between {SNOWBALL_LIMIT_MIN} and {SNOWBALL_LIMIT_MAX}, got {}",
                    self.snowball_limit
                ),
            });
        }
        if self.prompt_abstract_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.prompt_abstract_chars".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
