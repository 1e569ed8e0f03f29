//! keanu-gen: render leaf templates over the built-in type catalogue.
//!
//! # Usage
//!
//! ```text
//! keanu-gen [-t DIR]... [-T DIR...] [-o DIR] [-x EXT] [--config FILE] [-v] [--dry-run]
//! ```
//!
//! Settings come from `./.gen_tests_config.yaml` (or `--config FILE`) and are
//! overridden by any flag given on the command line.

mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use keanu_gen_core::config::{self, Overrides};
use keanu_gen_driver::pipeline;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "keanu-gen",
    version,
    about = "Generate test sources from leaf templates",
    long_about = None,
)]
struct Cli {
    /// Template search directory; repeat to add more.
    #[arg(short = 't', long = "template-dir", value_name = "DIR")]
    template_dir: Vec<PathBuf>,

    /// Several template search directories at once.
    #[arg(short = 'T', long = "template-dirs", value_name = "DIR", num_args = 1..)]
    template_dirs: Vec<PathBuf>,

    /// Directory rendered files are written into (must exist).
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Only render templates whose name ends in this suffix.
    #[arg(short = 'x', long, value_name = "EXT")]
    extension: Option<String>,

    /// Configuration file to read instead of ./.gen_tests_config.yaml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every step at debug level.
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be written without writing any files.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(self) -> Overrides {
        let mut template_dirs = self.template_dir;
        template_dirs.extend(self.template_dirs);
        Overrides {
            template_dirs,
            output: self.output,
            extension: self.extension,
            config_file: self.config,
            verbose: self.verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let verbose_flag = cli.verbose;

    let log_filter = init_tracing(verbose_flag);
    let config = config::resolve(cli.overrides()).context("invalid configuration")?;
    if config.verbose && !verbose_flag {
        log_filter.enable_debug();
    }
    tracing::debug!(
        "template dirs: {:?}, output: {}, extension: {:?}",
        config.template_dirs,
        config.output.display(),
        config.extension
    );

    let report = pipeline::run(&config, dry_run).context("generation failed")?;
    summary::print(&report, dry_run);
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Handle to the installed log filter.
struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogFilter {
    /// Switch to debug level unless `RUST_LOG` chose the filter.
    fn enable_debug(&self) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.handle.reload(EnvFilter::new("debug")) {
            tracing::warn!("cannot raise log level: {e}");
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flag when set.
///
/// Installed before the configuration is resolved so config lookup is logged;
/// the returned handle raises the level when the config file asks for it.
fn init_tracing(verbose: bool) -> LogFilter {
    let default = if verbose { "debug" } else { "info" };
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default), false),
    };
    let (filter, handle) = reload::Layer::new(filter);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
    LogFilter { handle, from_env }
}
