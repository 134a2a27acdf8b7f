//! Command-line interface for mpregistry.
//!
//! This module provides the CLI structure and command handlers for the
//! `mpreg` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ImportSampleCommand, ListCommand,
    MemberArgs, PhotoArgs, PrefixArg, ShowCommand, StatusCommand,
};

/// mpreg - Keep a register of legislative members
///
/// Add, edit, browse and remove member profiles stored in a local database.
#[derive(Debug, Parser)]
#[command(name = "mpreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one page of members
    List(ListCommand),

    /// Show one member read-only
    Show(ShowCommand),

    /// Add a new member
    Add(AddCommand),

    /// Change an existing member
    Edit(EditCommand),

    /// Remove a member
    Delete(DeleteCommand),

    /// Replace all members with generated sample data
    ImportSample(ImportSampleCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use crate::record::MemberId;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "mpreg");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["mpreg", "status"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["mpreg", "-v", "status"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["mpreg", "-vv", "status"]).verbosity(), Verbosity::Debug);
        assert_eq!(parse(&["mpreg", "-q", "status"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_list_defaults_to_first_page() {
        let cli = parse(&["mpreg", "list"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(cmd.page, 1);
        assert!(!cmd.json);
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "mpreg",
            "add",
            "--prefix",
            "นาย",
            "--first-name",
            "สมชาย",
            "--photo-url",
            "http://x/y.jpg",
        ]);
        let Command::Add(cmd) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(cmd.fields.prefix, Some(PrefixArg::Mr));
        assert_eq!(cmd.fields.first_name.as_deref(), Some("สมชาย"));
        assert_eq!(cmd.photo.photo_url.as_deref(), Some("http://x/y.jpg"));
    }

    #[test]
    fn test_photo_options_conflict() {
        let result = Cli::try_parse_from([
            "mpreg",
            "add",
            "--photo-url",
            "http://x/y.jpg",
            "--photo-file",
            "face.png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit_and_delete_ids() {
        let Command::Edit(edit) = parse(&["mpreg", "edit", "42", "--party", "p"]).command else {
            panic!("expected edit");
        };
        assert_eq!(edit.id, MemberId::new(42));

        let Command::Delete(delete) = parse(&["mpreg", "delete", "7"]).command else {
            panic!("expected delete");
        };
        assert_eq!(delete.id, MemberId::new(7));

        assert!(Cli::try_parse_from(["mpreg", "delete", "seven"]).is_err());
    }

    #[test]
    fn test_parse_import_sample() {
        let Command::ImportSample(cmd) =
            parse(&["mpreg", "import-sample", "--count", "50", "--seed", "3"]).command
        else {
            panic!("expected import-sample");
        };
        assert_eq!(cmd.count, Some(50));
        assert_eq!(cmd.seed, Some(3));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["mpreg", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["mpreg", "config", "validate", "--file", "x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
