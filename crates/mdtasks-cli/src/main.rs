use clap::Parser;
use std::io;
use std::process::ExitCode;

use mdtasks_vault::{ScanError, TaskIndex};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError};
use dispatch::{LocalCommand, LocalDispatch, VaultCommand, VaultDispatch};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli)));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn default_log_level(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    // Local commands (config, completions, explain, help) never scan
    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        let color = load_config().ok().and_then(|config| config.output.color);
        let ctx = CommandContext::from_cli(cli, color);
        return dispatch.execute(&ctx);
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, config.output.color);

    if let Some(dispatch) = VaultDispatch::from_cli(cli) {
        let index = scan_vault(cli, &config).await?;
        return dispatch.execute(&ctx, &config, &index);
    }

    Ok(())
}

/// Resolves the vault root and scans it with the configured patterns.
async fn scan_vault(cli: &Cli, config: &Config) -> commands::Result<TaskIndex> {
    let root = config.resolve_root(cli.root.as_deref())?;
    debug!(root = %root.display(), "scanning vault");

    let index = config.scanner(root).scan_async().await?;
    Ok(index)
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Scan(ScanError::RootNotFound { .. }) => "ROOT_NOT_FOUND",
        CommandError::Scan(ScanError::InvalidGlob { .. }) => "CONFIG_ERROR",
        CommandError::Scan(_) => "SCAN_ERROR",
        CommandError::Query(_) => "QUERY_ERROR",
        CommandError::NotFound { .. } => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Query(_) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Scan(ScanError::InvalidGlob { .. }) => ExitCode::from(5),
        CommandError::Scan(_) => ExitCode::from(3),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::NotFound { .. } => ExitCode::from(4),
        CommandError::Config(_) => ExitCode::from(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("mdt").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(&cli(&["list"])), "warn");
        assert_eq!(default_log_level(&cli(&["-v", "list"])), "debug");
        assert_eq!(default_log_level(&cli(&["-q", "list"])), "error");
    }

    #[test]
    fn test_error_codes() {
        let missing = CommandError::Scan(ScanError::RootNotFound {
            path: PathBuf::from("/nope"),
        });
        assert_eq!(error_code(&missing), "ROOT_NOT_FOUND");
        assert_eq!(error_exit_code(&missing), ExitCode::from(3));

        let not_found = CommandError::NotFound {
            id: "a.md:1".to_string(),
        };
        assert_eq!(error_code(&not_found), "NOT_FOUND");
        assert_eq!(error_exit_code(&not_found), ExitCode::from(4));

        let config = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config), "CONFIG_ERROR");
        assert_eq!(error_exit_code(&config), ExitCode::from(5));

        let query = CommandError::Query("empty".to_string());
        assert_eq!(error_code(&query), "QUERY_ERROR");
        assert_eq!(error_exit_code(&query), ExitCode::from(1));
    }

    #[test]
    fn test_error_message_wraps_source() {
        let err = CommandError::NotFound {
            id: "notes.md:4".to_string(),
        };
        assert_eq!(err.to_string(), "task not found: notes.md:4");
    }

    #[tokio::test]
    async fn test_scan_vault_uses_flag_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.md"), "- [ ] one\n- [x] two\n").unwrap();

        let root = temp_dir.path().to_str().unwrap();
        let cli = cli(&["--root", root, "list"]);
        let index = scan_vault(&cli, &Config::default()).await.unwrap();

        assert_eq!(index.files_scanned, 1);
        assert_eq!(index.len(), 2);
    }

    #[tokio::test]
    async fn test_scan_vault_missing_root() {
        let cli = cli(&["--root", "/nonexistent/mdt/vault", "list"]);
        let err = scan_vault(&cli, &Config::default()).await.unwrap_err();
        assert!(matches!(err, CommandError::Scan(ScanError::RootNotFound { .. })));
    }
}
