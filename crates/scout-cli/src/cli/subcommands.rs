use clap::Subcommand;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        name: String,
        #[arg(long)]
        client: Option<String>,
    },
    /// List projects, newest first.
    List,
    /// Delete a project and every paper it holds.
    Delete { project: String },
}

/// Archive commands, scoped to the active project.
#[derive(Clone, Debug, Subcommand)]
pub enum LibraryCommands {
    /// List archived papers.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Find papers whose title contains a fragment.
    Find { fragment: String },
    /// Move a paper along unread, reading, synthesized.
    Status { id: String, status: String },
    /// Copy a paper into another project.
    Clone {
        id: String,
        /// Target project, by id or name.
        target: String,
    },
    /// Delete one paper.
    Delete { id: String },
}
