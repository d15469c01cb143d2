//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they need a scanned vault. Local commands
//! run straight away; vault commands receive the [`TaskIndex`] built by
//! `main` after resolving the root and scan settings.

use std::path::PathBuf;

use mdtasks_vault::TaskIndex;

use crate::cli::{Cli, Commands, ConfigCommands, SortField};
use crate::commands::config::Config;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without scanning the vault.
pub trait LocalCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read tasks from the vault.
pub trait VaultCommand {
    /// Execute the command against a scanned index.
    fn execute(&self, ctx: &CommandContext, config: &Config, index: &TaskIndex) -> Result<()>;
}

/// Commands that don't scan the vault.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a crate::cli::Shell),
    Explain(&'a str),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Try to create a local dispatch from the CLI command.
    /// Returns None if the command needs the vault.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            Some(Commands::Explain { query }) => Some(Self::Explain(query)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Explain(query) => commands::explain::execute(ctx, query),
            Self::Help => {
                if !ctx.quiet {
                    println!("mdt - markdown task queries");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that scan the vault.
pub enum VaultDispatch<'a> {
    List {
        query: &'a [String],
        query_file: &'a Option<PathBuf>,
        include_non_tasks: bool,
        sort: Option<SortField>,
        reverse: bool,
        limit: Option<usize>,
        all: bool,
    },
    Show {
        task_id: &'a str,
    },
}

impl<'a> VaultDispatch<'a> {
    /// Create a vault dispatch from the CLI command.
    /// Returns None for commands handled by [`LocalDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                query,
                query_file,
                include_non_tasks,
                sort,
                reverse,
                limit,
                all,
            }) => Some(Self::List {
                query,
                query_file,
                include_non_tasks: *include_non_tasks,
                sort: *sort,
                reverse: *reverse,
                limit: *limit,
                all: *all,
            }),
            Some(Commands::Show { task_id }) => Some(Self::Show { task_id }),
            // Already handled by LocalDispatch
            Some(Commands::Config { .. })
            | Some(Commands::Completions { .. })
            | Some(Commands::Explain { .. })
            | None => None,
        }
    }
}

impl VaultCommand for VaultDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, config: &Config, index: &TaskIndex) -> Result<()> {
        match self {
            Self::List {
                query,
                query_file,
                include_non_tasks,
                sort,
                reverse,
                limit,
                all,
            } => {
                let opts = commands::list::ListOptions {
                    query: query.to_vec(),
                    query_file: (*query_file).clone(),
                    include_non_tasks: *include_non_tasks,
                    sort: *sort,
                    reverse: *reverse,
                    limit: limit.unwrap_or_else(|| config.list_limit()),
                    all: *all,
                };
                commands::list::execute(ctx, &opts, index)
            }
            Self::Show { task_id } => {
                let opts = commands::show::ShowOptions {
                    task_id: task_id.to_string(),
                };
                commands::show::execute(ctx, &opts, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_local_dispatch_config_show() {
        let cli = Cli::parse_from(["mdt", "config", "show"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Config(_))));
    }

    #[test]
    fn test_local_dispatch_completions() {
        let cli = Cli::parse_from(["mdt", "completions", "zsh"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Completions(_))));
    }

    #[test]
    fn test_local_dispatch_explain() {
        let cli = Cli::parse_from(["mdt", "explain", "not done"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Explain("not done"))));
    }

    #[test]
    fn test_local_dispatch_help() {
        let cli = Cli::parse_from(["mdt"]);
        let dispatch = LocalDispatch::try_from_cli(&cli);
        assert!(matches!(dispatch, Some(LocalDispatch::Help)));
    }

    #[test]
    fn test_local_dispatch_returns_none_for_list() {
        let cli = Cli::parse_from(["mdt", "list"]);
        assert!(LocalDispatch::try_from_cli(&cli).is_none());
    }

    #[test]
    fn test_vault_dispatch_list() {
        let cli = Cli::parse_from(["mdt", "list", "--query", "done", "--limit", "3"]);
        let dispatch = VaultDispatch::from_cli(&cli);
        assert!(matches!(
            dispatch,
            Some(VaultDispatch::List {
                limit: Some(3),
                ..
            })
        ));
    }

    #[test]
    fn test_vault_dispatch_show() {
        let cli = Cli::parse_from(["mdt", "show", "a.md:1"]);
        let dispatch = VaultDispatch::from_cli(&cli);
        assert!(matches!(dispatch, Some(VaultDispatch::Show { task_id: "a.md:1" })));
    }

    #[test]
    fn test_vault_dispatch_returns_none_for_explain() {
        let cli = Cli::parse_from(["mdt", "explain", "done"]);
        assert!(VaultDispatch::from_cli(&cli).is_none());
    }

    #[test]
    fn test_vault_dispatch_list_executes() {
        use mdtasks_core::recognize::recognize_document;

        let cli = Cli::parse_from(["mdt", "--json", "--quiet", "list"]);
        let dispatch = VaultDispatch::from_cli(&cli).unwrap();
        let ctx = CommandContext::from_cli(&cli, None);
        let mut index = TaskIndex::new("/vault");
        index.tasks = recognize_document("- [ ] a\n- [ ] b", "x.md");

        assert!(dispatch.execute(&ctx, &Config::default(), &index).is_ok());
    }
}
