use crate::cli::GlobalFlags;
use crate::cli::root_commands::SynthesizeArgs;
use crate::context::{AppContext, cancel_on_ctrl_c};
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(
    args: &SynthesizeArgs,
    ctx: AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let project = ctx.active_project(flags).await?;
    let scout = ctx.into_scout()?;
    let cancel = cancel_on_ctrl_c();

    let progress = Progress::spinner(&format!("synthesizing from {}", project.name));
    let answer = scout.synthesize(&project.id, &args.question, &cancel).await;
    progress.finish_clear();
    output(&answer?, flags.format)
}
