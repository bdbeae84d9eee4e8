use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `scout` binary.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about = "Scout - research literature scouting and citation mining")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Active project, by id or name
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            project: self.project.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{LibraryCommands, ProjectCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_json_output() {
        let cli = Cli::try_parse_from(["scout", "project", "list"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Project {
                action: ProjectCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "scout",
            "search",
            "federated learning privacy",
            "--grey",
            "--autopilot",
            "--project",
            "Privacy",
            "--format",
            "table",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.global_flags().project.as_deref(), Some("Privacy"));
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query, "federated learning privacy");
        assert!(args.grey);
        assert!(args.autopilot);
        assert!(!args.save);
    }

    #[test]
    fn library_status_takes_id_and_status() {
        let cli = Cli::try_parse_from(["scout", "library", "status", "pap-0badf00d", "reading"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Library {
                action: LibraryCommands::Status { ref id, ref status }
            } if id == "pap-0badf00d" && status == "reading"
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["scout", "--format", "xml", "project", "list"]).is_err());
    }

    #[test]
    fn mine_requires_seed_title() {
        assert!(Cli::try_parse_from(["scout", "mine"]).is_err());
        let cli = Cli::try_parse_from(["scout", "mine", "Attention Is All You Need"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Mine(ref args) if args.seed == "Attention Is All You Need"));
    }
}
