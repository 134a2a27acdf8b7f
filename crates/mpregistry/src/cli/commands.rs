//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::error::Result;
use crate::form::MemberForm;
use crate::record::{MemberId, Prefix};
use crate::schema::Field;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Member id
    pub id: MemberId,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Field values for add and edit.
#[derive(Debug, Default, Args)]
pub struct MemberArgs {
    /// Honorific title
    #[arg(long, value_enum)]
    pub prefix: Option<PrefixArg>,

    /// Given name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Family name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Work history
    #[arg(long)]
    pub work_history: Option<String>,

    /// Past works
    #[arg(long)]
    pub past_works: Option<String>,

    /// Ministerial position
    #[arg(long)]
    pub position: Option<String>,

    /// Ministry
    #[arg(long)]
    pub ministry: Option<String>,

    /// Political party
    #[arg(long)]
    pub party: Option<String>,
}

impl MemberArgs {
    /// Copy the given values into `form`. Absent values are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is read-only.
    pub fn apply(&self, form: &mut MemberForm) -> Result<()> {
        if let Some(prefix) = self.prefix {
            form.set(Field::Prefix, Prefix::from(prefix).as_str())?;
        }
        let text = [
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::WorkHistory, &self.work_history),
            (Field::PastWorks, &self.past_works),
            (Field::MinisterialPosition, &self.position),
            (Field::Ministry, &self.ministry),
            (Field::PoliticalParty, &self.party),
        ];
        for (field, value) in text {
            if let Some(value) = value {
                form.set(field, value.as_str())?;
            }
        }
        Ok(())
    }
}

/// Photo source for add and edit.
#[derive(Debug, Default, Args)]
pub struct PhotoArgs {
    /// Photo URL
    #[arg(long, value_name = "URL", conflicts_with = "photo_file")]
    pub photo_url: Option<String>,

    /// Photo file to embed
    #[arg(long, value_name = "PATH")]
    pub photo_file: Option<PathBuf>,
}

impl PhotoArgs {
    /// Feed the given photo into `form`. With neither option the form keeps
    /// its current photo input.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is read-only or the file cannot be read.
    pub async fn apply(&self, form: &mut MemberForm) -> Result<()> {
        if let Some(url) = &self.photo_url {
            form.set_photo_url(url.as_str())?;
        } else if let Some(path) = &self.photo_file {
            form.select_file(path).await?;
        }
        Ok(())
    }
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Field values
    #[command(flatten)]
    pub fields: MemberArgs,

    /// Photo source
    #[command(flatten)]
    pub photo: PhotoArgs,
}

/// Edit command arguments.
///
/// Fields left out keep their stored values.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Member id
    pub id: MemberId,

    /// Field values
    #[command(flatten)]
    pub fields: MemberArgs,

    /// Photo source
    #[command(flatten)]
    pub photo: PhotoArgs,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Member id
    pub id: MemberId,
}

/// Sample import arguments.
#[derive(Debug, Args)]
pub struct ImportSampleCommand {
    /// Number of members to generate (defaults to the configured count)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Seed for reproducible output
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Prefix argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrefixArg {
    /// นาย
    #[value(alias = "นาย")]
    Mr,
    /// นาง
    #[value(alias = "นาง")]
    Mrs,
    /// นางสาว
    #[value(alias = "นางสาว")]
    Miss,
}

impl From<PrefixArg> for Prefix {
    fn from(arg: PrefixArg) -> Self {
        match arg {
            PrefixArg::Mr => Self::Mr,
            PrefixArg::Mrs => Self::Mrs,
            PrefixArg::Miss => Self::Miss,
        }
    }
}
