use std::path::Path;

use anyhow::{Context, bail};
use scout_config::ScoutConfig;
use scout_core::entities::Project;
use scout_db::ScoutDb;
use scout_llm::GeminiClient;
use scout_pipeline::{CancellationToken, PipelineSettings, Scout};
use scout_sources::{DuckDuckGoClient, SemanticScholarClient};

use crate::cli::GlobalFlags;

pub type AppScout = Scout<SemanticScholarClient, DuckDuckGoClient, GeminiClient, ScoutDb>;

/// Configuration and the opened library, initialized once per invocation.
pub struct AppContext {
    pub config: ScoutConfig,
    pub db: ScoutDb,
}

impl AppContext {
    pub async fn init(config: ScoutConfig) -> anyhow::Result<Self> {
        let db_path = Path::new(&config.general.db_path);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let db = ScoutDb::open_local(&config.general.db_path)
            .await
            .with_context(|| format!("failed to open library at {}", config.general.db_path))?;
        tracing::debug!(path = %config.general.db_path, "library opened");
        Ok(Self { config, db })
    }

    /// The project named by `--project`, or the only project if there is
    /// exactly one.
    pub async fn active_project(&self, flags: &GlobalFlags) -> anyhow::Result<Project> {
        self.resolve_project(flags.project.as_deref()).await
    }

    pub async fn resolve_project(&self, key: Option<&str>) -> anyhow::Result<Project> {
        if let Some(key) = key {
            return self
                .db
                .find_project(key)
                .await?
                .with_context(|| format!("no project with id or name '{key}'"));
        }
        let mut projects = self.db.list_projects().await?;
        match projects.len() {
            1 => Ok(projects.remove(0)),
            0 => bail!("no projects yet; create one with 'scout project create <name>'"),
            _ => bail!("several projects exist; pick one with --project <id|name>"),
        }
    }

    pub fn academic(&self) -> anyhow::Result<SemanticScholarClient> {
        Ok(SemanticScholarClient::new(&self.config.academic)?)
    }

    /// Wire the full pipeline. Requires a configured model.
    pub fn into_scout(self) -> anyhow::Result<AppScout> {
        let llm = GeminiClient::new(&self.config.llm)
            .context("set SCOUT_LLM__API_KEY or [llm] api_key to use the model")?;
        let academic = self.academic()?;
        let grey = DuckDuckGoClient::new(&self.config.grey)?;
        let settings = PipelineSettings::from(&self.config);
        Ok(Scout::new(academic, grey, llm, self.db, settings))
    }
}

/// Token cancelled on the first Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted; cancelling");
            child.cancel();
        }
    });
    token
}
