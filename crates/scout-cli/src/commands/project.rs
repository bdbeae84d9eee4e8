use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: &'a str,
    papers: usize,
}

pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create { name, client } => {
            let project = ctx.db.create_project(name, client.as_deref()).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List => output(&ctx.db.list_projects().await?, flags.format),
        ProjectCommands::Delete { project } => {
            let project = ctx.resolve_project(Some(project)).await?;
            let papers = ctx.db.list_by_project(&project.id).await?.len();
            ctx.db.delete_project(&project.id).await?;
            output(
                &Deleted {
                    deleted: &project.id,
                    papers,
                },
                flags.format,
            )
        }
    }
}
