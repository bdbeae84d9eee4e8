use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::IngestArgs;
use crate::commands::library::Saved;
use crate::context::{AppContext, cancel_on_ctrl_c};
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(args: &IngestArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let project = ctx.active_project(flags).await?;
    let scout = ctx.into_scout()?;
    let cancel = cancel_on_ctrl_c();

    let progress = Progress::spinner("extracting metadata");
    let metadata = match scout.extract_metadata(&text, &cancel).await {
        Ok(metadata) => metadata,
        Err(error) => {
            progress.finish_err("extraction failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    let outcome = scout
        .archive_metadata(&project.id, metadata, args.url.clone())
        .await?;
    output(&Saved::from(&outcome), flags.format)
}
