//! Academic graph search (Semantic Scholar) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.semanticscholar.org/graph/v1".to_string()
}

/// Default page size for relevance-ranked search.
const fn default_page_size() -> u32 {
    10
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcademicConfig {
    /// Graph API root, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional API key, sent as `x-api-key`. Unauthenticated access is
    /// rate-limited harder but works.
    #[serde(default)]
    pub api_key: String,

    /// Results requested per search.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-call timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AcademicConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AcademicConfig {
    /// Whether requests are authenticated.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
