//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the mdt CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// mdt - Query tasks written as markdown checkboxes
#[derive(Parser, Debug)]
#[command(name = "mdt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Vault directory to scan (default: from config, else the current directory)
    #[arg(long, global = true, env = "MDT_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks in the vault
    #[command(alias = "l")]
    List {
        /// Query clause (repeatable, one clause per value)
        #[arg(short = 'Q', long = "query", action = clap::ArgAction::Append)]
        query: Vec<String>,

        /// Read query clauses from a file, one per line
        #[arg(long)]
        query_file: Option<PathBuf>,

        /// Include checkbox items with unrecognized status symbols
        #[arg(long)]
        include_non_tasks: bool,

        /// Sort by field (default: file path then line)
        #[arg(long, value_enum)]
        sort: Option<SortField>,

        /// Reverse sort order
        #[arg(long)]
        reverse: bool,

        /// Limit results (default: 50, or output.limit from config)
        #[arg(long, conflicts_with = "all")]
        limit: Option<usize>,

        /// Show all tasks (no limit)
        #[arg(long)]
        all: bool,
    },

    /// Show task details
    #[command(alias = "s")]
    Show {
        /// Task ID (path:line)
        task_id: String,
    },

    /// Show how a query is parsed
    Explain {
        /// Query text; clauses may be separated by newlines
        query: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Sort fields for list command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Due,
    Priority,
    Path,
    Status,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
