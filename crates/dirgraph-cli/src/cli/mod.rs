//! CLI for the dirgraph directory client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dirgraph_core::config::{self, DirectoryConfig};
use dirgraph_core::directory::Directory;
use std::path::{Path, PathBuf};

use commands::{
    run_completions, run_groups, run_is_in_group, run_thumbnail, run_user, run_users,
};

/// Top-level CLI for the dirgraph directory client.
#[derive(Debug, Parser)]
#[command(name = "dirgraph")]
#[command(about = "dirgraph: query a tenant's users and groups in the directory service", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/dirgraph/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show a user's profile.
    User {
        /// User principal name (name@tenant).
        upn: String,
    },

    /// List all users in the tenant.
    Users,

    /// List the groups a user is a direct member of.
    Groups {
        /// User principal name (name@tenant).
        upn: String,
    },

    /// Check whether a user belongs to a group.
    IsInGroup {
        /// User principal name (name@tenant).
        upn: String,
        /// Group display name.
        group: String,
    },

    /// Save a user's thumbnail photo.
    Thumbnail {
        /// User principal name (name@tenant).
        upn: String,
        /// Output file.
        #[arg(long, value_name = "PATH")]
        out: PathBuf,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config for tenant {}", cfg.domain_name);
        let mut dir = Directory::from_config(&cfg)?;

        match cli.command {
            CliCommand::User { upn } => run_user(&mut dir, &upn)?,
            CliCommand::Users => run_users(&mut dir)?,
            CliCommand::Groups { upn } => run_groups(&mut dir, &upn)?,
            CliCommand::IsInGroup { upn, group } => run_is_in_group(&mut dir, &upn, &group)?,
            CliCommand::Thumbnail { upn, out } => run_thumbnail(&mut dir, &upn, &out)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<DirectoryConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
