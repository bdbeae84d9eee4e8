//! Grey-literature web search configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

const fn default_max_results() -> u32 {
    5
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_placeholder_author() -> String {
    "Web Source".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GreyConfig {
    /// HTML search endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cap on grey-literature hits per search.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Per-call timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Author recorded for web hits, which rarely expose structured authors.
    #[serde(default = "default_placeholder_author")]
    pub placeholder_author: String,
}

impl Default for GreyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            placeholder_author: default_placeholder_author(),
        }
    }
}
