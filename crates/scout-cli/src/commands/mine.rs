use scout_pipeline::{PipelineSettings, SnowballMiner};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MineArgs;
use crate::context::{AppContext, cancel_on_ctrl_c};
use crate::output::output;
use crate::progress::Progress;

/// Mining needs no model, so it runs without the full pipeline.
pub async fn handle(args: &MineArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project = ctx.active_project(flags).await?;
    let academic = ctx.academic()?;
    let settings = PipelineSettings::from(&ctx.config);
    let cancel = cancel_on_ctrl_c();

    let progress = Progress::spinner(&format!("mining references of \"{}\"", args.seed));
    let miner = SnowballMiner::new(
        &academic,
        &ctx.db,
        settings.snowball_limit,
        settings.academic_timeout,
    );
    let report = match miner.mine(&project.id, &args.seed, &cancel).await {
        Ok(report) => report,
        Err(error) => {
            progress.finish_err("mining failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();
    output(&report, flags.format)
}
