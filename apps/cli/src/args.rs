//! # CLI Argument Definitions

use ampa::domain::{AdoptionStatus, Sex, Species};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Staff tool for the AMPA adoption platform.
#[derive(Debug, Parser)]
#[command(name = "ampa")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to ./ampa.toml when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of the configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage the pet catalog
    Pets {
        #[command(subcommand)]
        action: PetAction,
    },
    /// Record or undo adoptions
    Adoptions {
        #[command(subcommand)]
        action: AdoptionAction,
    },
    /// Site configuration
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Transparency documents
    Documents {
        #[command(subcommand)]
        action: DocumentAction,
    },
}

impl Commands {
    /// Short name used for the command span in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pets { .. } => "pets",
            Self::Adoptions { .. } => "adoptions",
            Self::Settings { .. } => "settings",
            Self::Documents { .. } => "documents",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum PetAction {
    /// List pets, newest first
    List {
        /// DISPONIVEL, EM_PROCESSO or ADOTADO
        #[arg(long)]
        status: Option<AdoptionStatus>,
        /// Only pets shown on the home page
        #[arg(long)]
        featured: bool,
        /// C (dogs) or G (cats)
        #[arg(long)]
        species: Option<Species>,
        /// Match name or story
        #[arg(long)]
        search: Option<String>,
    },
    /// Register a pet
    Add(NewPet),
    /// Feature a pet on the home page (or remove it with --off)
    Feature {
        id: u64,
        #[arg(long)]
        off: bool,
    },
    /// Set the adoption status by hand
    Status { id: u64, status: AdoptionStatus },
}

#[derive(Debug, Args)]
pub struct NewPet {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub color: String,
    #[arg(long)]
    pub story: String,
    /// Defaults to SRD
    #[arg(long, default_value = "")]
    pub breed: String,
    #[arg(long, default_value = "C")]
    pub species: Species,
    #[arg(long, default_value = "M")]
    pub sex: Sex,
    #[arg(long)]
    pub featured: bool,
}

#[derive(Debug, Subcommand)]
pub enum AdoptionAction {
    /// Record an adoption and mark the pet adopted
    Create {
        #[arg(long)]
        pet: u64,
        #[arg(long)]
        adopter: u64,
        #[arg(long)]
        volunteer: Option<u64>,
    },
    /// Delete an adoption; an adopted pet becomes available again
    Delete { id: u64 },
    /// List adoptions, newest first
    List {
        /// Match pet name, adopter name or CPF
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show the notification recipient
    Show,
    /// Create the site configuration
    Init { email: String },
    /// Change the notification address
    SetEmail { email: String },
}

#[derive(Debug, Subcommand)]
pub enum DocumentAction {
    /// Accountability report, optionally for one year and month
    List {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_codes_parse() {
        let cli = Cli::try_parse_from(["ampa", "pets", "status", "3", "em_processo"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Pets { action: PetAction::Status { id: 3, status: AdoptionStatus::InProcess } }
        ));
    }

    #[test]
    fn command_names_match_subcommands() {
        let cli = Cli::try_parse_from(["ampa", "adoptions", "delete", "4"]).unwrap();
        assert_eq!(cli.command.name(), "adoptions");
        let cli = Cli::try_parse_from(["ampa", "settings", "show"]).unwrap();
        assert_eq!(cli.command.name(), "settings");
    }

    #[test]
    fn month_is_range_checked() {
        assert!(Cli::try_parse_from(["ampa", "documents", "list", "--month", "13"]).is_err());
    }
}
