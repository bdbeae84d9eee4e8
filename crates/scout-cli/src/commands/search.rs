use scout_pipeline::{ScoutOptions, ScoutOutcome};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::library::Saved;
use crate::context::{AppContext, cancel_on_ctrl_c};
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct SearchReport<'a> {
    #[serde(flatten)]
    outcome: &'a ScoutOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    saved: Vec<Saved<'a>>,
}

pub async fn handle(args: &SearchArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.active_project(flags).await?;
    let scout = ctx.into_scout()?;
    let cancel = cancel_on_ctrl_c();
    let options = ScoutOptions {
        include_grey: args.grey,
        autopilot: args.autopilot,
    };

    let progress = Progress::spinner(&format!("scouting \"{}\"", args.query));
    let outcome = match scout.scout(&project.id, &args.query, options, &cancel).await {
        Ok(outcome) => outcome,
        Err(error) => {
            progress.finish_err("scout failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }

    let mut outcomes = Vec::new();
    if args.save {
        for candidate in &outcome.results {
            outcomes.push(scout.save_candidate(&project.id, candidate).await?);
        }
    }
    let report = SearchReport {
        outcome: &outcome,
        saved: outcomes.iter().map(Saved::from).collect(),
    };
    output(&report, flags.format)
}
