pub mod ingest;
pub mod library;
pub mod mine;
pub mod project;
pub mod schema;
pub mod search;
pub mod synthesize;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => project::handle(&action, &ctx, flags).await,
        Commands::Search(args) => search::handle(&args, ctx, flags).await,
        Commands::Mine(args) => mine::handle(&args, &ctx, flags).await,
        Commands::Library { action } => library::handle(&action, &ctx, flags).await,
        Commands::Ingest(args) => ingest::handle(&args, ctx, flags).await,
        Commands::Synthesize(args) => synthesize::handle(&args, ctx, flags).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
