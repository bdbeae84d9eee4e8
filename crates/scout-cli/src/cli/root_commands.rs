use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{LibraryCommands, ProjectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Research projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Scout academic and grey sources for relevant papers.
    Search(SearchArgs),
    /// Archive one hop of a seed paper's references.
    Mine(MineArgs),
    /// Archived papers of the active project.
    Library {
        #[command(subcommand)]
        action: LibraryCommands,
    },
    /// Extract metadata from a plain-text document and archive it.
    Ingest(IngestArgs),
    /// Answer a question from the active project's archive.
    Synthesize(SynthesizeArgs),
    /// Print the JSON Schema of a structured type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Research query.
    pub query: String,
    /// Also search grey literature (PDF documents on the web).
    #[arg(long)]
    pub grey: bool,
    /// Propose and run a refined query when few results are relevant.
    #[arg(long)]
    pub autopilot: bool,
    /// Archive every relevant result.
    #[arg(long)]
    pub save: bool,
}

#[derive(Clone, Debug, Args)]
pub struct MineArgs {
    /// Title of the seed paper.
    pub seed: String,
}

#[derive(Clone, Debug, Args)]
pub struct IngestArgs {
    /// Text file holding the document's extracted text.
    pub file: PathBuf,
    /// Source URL to store with the paper.
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SynthesizeArgs {
    pub question: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; lists all names when omitted.
    pub name: Option<String>,
}
