use scout_core::entities::ArchivedPaper;
use scout_core::enums::ReadingStatus;
use scout_db::InsertOutcome;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LibraryCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: &'a str,
}

#[derive(Serialize)]
struct Cloned<'a> {
    target_project: &'a str,
    #[serde(flatten)]
    saved: Saved<'a>,
}

pub async fn handle(
    action: &LibraryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LibraryCommands::List { limit } => {
            let project = ctx.active_project(flags).await?;
            let mut papers = ctx.db.list_by_project(&project.id).await?;
            let limit = limit.unwrap_or(ctx.config.general.default_limit);
            papers.truncate(usize::try_from(limit)?);
            output(&papers, flags.format)
        }
        LibraryCommands::Find { fragment } => {
            let project = ctx.active_project(flags).await?;
            output(&ctx.db.search_titles(&project.id, fragment).await?, flags.format)
        }
        LibraryCommands::Status { id, status } => {
            let status = parse_status(status)?;
            output(&ctx.db.update_reading_status(id, status).await?, flags.format)
        }
        LibraryCommands::Clone { id, target } => {
            let target = ctx.resolve_project(Some(target)).await?;
            let outcome = ctx.db.clone_paper(id, &target.id).await?;
            output(
                &Cloned {
                    target_project: &target.id,
                    saved: Saved::from(&outcome),
                },
                flags.format,
            )
        }
        LibraryCommands::Delete { id } => {
            ctx.db.delete_paper(id).await?;
            output(&Deleted { deleted: id }, flags.format)
        }
    }
}

fn parse_status(raw: &str) -> anyhow::Result<ReadingStatus> {
    let json = format!("\"{}\"", raw.trim().to_lowercase().replace('-', "_"));
    serde_json::from_str(&json).map_err(|_| {
        anyhow::anyhow!("invalid status '{raw}': expected unread, reading or synthesized")
    })
}

/// Serializable view of an insert-or-ignore result.
#[derive(Serialize)]
pub struct Saved<'a> {
    pub inserted: bool,
    pub paper: &'a ArchivedPaper,
}

impl<'a> From<&'a InsertOutcome> for Saved<'a> {
    fn from(outcome: &'a InsertOutcome) -> Self {
        Self {
            inserted: outcome.is_inserted(),
            paper: outcome.paper(),
        }
    }
}
