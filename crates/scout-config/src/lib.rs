//! # scout-config
//!
//! Layered configuration loading for Scout using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SCOUT_*` prefix, `__` as separator)
//! 2. Project-level `.scout/config.toml`
//! 3. User-level `~/.config/scout/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SCOUT_LLM__API_KEY` -> `llm.api_key`,
//! `SCOUT_PIPELINE__AUTOPILOT_THRESHOLD` -> `pipeline.autopilot_threshold`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use scout_config::ScoutConfig;
//!
//! let config = ScoutConfig::load_with_dotenv().expect("config");
//!
//! if config.llm.is_configured() {
//!     println!("Model: {}", config.llm.model);
//! }
//! ```

mod academic;
mod error;
mod general;
mod grey;
mod llm;
mod pipeline;

pub use academic::AcademicConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use grey::GreyConfig;
pub use llm::LlmConfig;
pub use pipeline::{PipelineConfig, RefinementPolicy, SNOWBALL_LIMIT_MAX, SNOWBALL_LIMIT_MIN};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub academic: AcademicConfig,
    #[serde(default)]
    pub grey: GreyConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ScoutConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".scout/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SCOUT_").split("__"))
    }

    /// Check cross-section invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()?;
        if self.academic.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "academic.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.academic.timeout_secs == 0 || self.grey.timeout_secs == 0 || self.llm.timeout_secs == 0
        {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".into(),
                reason: "every external call needs a non-zero timeout".into(),
            });
        }
        Ok(())
    }

    /// Fail unless the text-generation service can be reached.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `llm.api_key` is empty.
    pub fn require_llm(&self) -> Result<&LlmConfig, ConfigError> {
        if self.llm.is_configured() {
            Ok(&self.llm)
        } else {
            Err(ConfigError::NotConfigured {
                section: "llm".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scout").join("config.toml"))
    }
}
