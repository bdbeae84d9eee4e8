//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    ".scout/library.db".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path of the local libSQL library database.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_limit: default_limit(),
        }
    }
}
