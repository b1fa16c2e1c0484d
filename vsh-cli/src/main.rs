// SPDX-License-Identifier: AGPL-3.0-or-later
//! Virtual Shell CLI
//!
//! A small shell over an in-memory filesystem loaded from a tar archive.

mod config;
mod shell;

use clap::Parser;
use console::Term;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vsh_core::VshResult;
use vsh_vfs::Vfs;

use config::Config;
use shell::Shell;

#[derive(Parser)]
#[command(name = "vsh")]
#[command(author, version, about = "Virtual shell over a tar archive", long_about = None)]
struct Cli {
    /// Configuration file (JSON, or TOML with a .toml extension)
    config: PathBuf,

    /// Archive to load instead of the one named in the configuration
    #[arg(short, long)]
    archive: Option<PathBuf>,

    /// Run a command line and exit (may be repeated)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// `RUST_LOG` wins, then `--verbose`, then the config's level, then `warn`.
fn init_logging(verbose: bool, config_level: Option<&str>) {
    let default = if verbose {
        "debug"
    } else {
        config_level.unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> VshResult<()> {
    let config = Config::load(&cli.config)?;
    init_logging(cli.verbose, config.log_level.as_deref());

    let archive = cli.archive.unwrap_or(config.archive_path);
    tracing::info!(archive = %archive.display(), "loading archive");
    let vfs = Vfs::open(&archive)?;

    let color = Term::stdout().features().colors_supported();
    let mut shell = Shell::new(vfs).with_color(color);

    if let Some(dir) = config.start_dir.as_deref() {
        if let Err(e) = shell.vfs_mut().change_directory(dir) {
            tracing::warn!(dir, error = %e, "start directory unavailable, staying at /");
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.commands.is_empty() {
        shell.run(io::stdin().lock(), &mut out)?;
    } else {
        for line in &cli.commands {
            shell.run_line(line, &mut out)?;
            if !shell.is_running() {
                break;
            }
        }
    }

    tracing::debug!(cwd = %shell.vfs().current_path(), "session ended");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_fatal() {
                tracing::error!(error = %e, "cannot build the virtual filesystem");
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
