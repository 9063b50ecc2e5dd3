//! CLI module - Command-line interface for memberctl
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;
pub mod console;
pub mod table;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use console::Console;

/// memberctl - front-end member account management
#[derive(Parser, Debug)]
#[command(name = "memberctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "MEMBERCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not ask any interactive question
    #[arg(short = 'n', long, global = true)]
    pub no_interaction: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The `--config` path, or `config.toml` in the working directory.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_config_path)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage member accounts
    Member {
        #[command(subcommand)]
        command: MemberCommands,
    },

    /// Manage member groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Create default config file
    Init,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Create a new member account
    Create(CreateArgs),

    /// Delete a member account
    #[command(alias = "rm")]
    Delete {
        /// The username of the member
        username: String,
    },

    /// List member accounts
    #[command(alias = "ls")]
    List(ListArgs),

    /// Change the password of an existing member
    Password(PasswordArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// The username to create
    #[arg(short, long)]
    pub username: Option<String>,

    /// The first name
    #[arg(long)]
    pub firstname: Option<String>,

    /// The last name
    #[arg(long)]
    pub lastname: Option<String>,

    /// The e-mail address
    #[arg(long)]
    pub email: Option<String>,

    /// The password
    #[arg(short, long)]
    pub password: Option<String>,

    /// The groups to assign the member to, by id or name (optional)
    #[arg(long = "group")]
    pub groups: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// The columns to display
    #[arg(long = "column")]
    pub columns: Vec<String>,

    /// The output format (txt, json)
    #[arg(long, default_value = "txt")]
    pub format: String,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            format: "txt".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PasswordArgs {
    /// The username of the member
    pub username: String,

    /// The new password (using this option is not recommended for security reasons)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Create a member group
    Create {
        /// Group name
        name: String,
    },

    /// List member groups
    #[command(alias = "ls")]
    List,
}

pub use commands::*;
