//! order-cli: resolve declarative execution order manifests
//!
//! Reads a JSON manifest of RunAfter / RunBefore / RunFirst / RunLast
//! declarations and prints, checks or applies the computed priorities.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use declarative_order::adapters::{JsonFileRegistry, ManifestDeclarationSource};
use declarative_order::{
    DeclarationSet, DeclarationSource, OrderResolverApi, OrderResolverService, OrderingConfig,
    OrderingError,
};
use order_telemetry::{init_telemetry, TelemetryConfig};

/// Declarative execution order resolver
#[derive(Parser, Debug)]
#[command(name = "order-cli", version)]
#[command(about = "Compute execution priorities from ordering declarations")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the computed order
    Resolve {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write changed priorities to a JSON registry file
    Apply {
        #[command(flatten)]
        input: InputArgs,

        /// Registry file (`{ "item": priority, ... }`)
        #[arg(short, long)]
        registry: PathBuf,

        /// Report changes without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate declarations without producing output
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Declaration manifest (JSON)
    manifest: PathBuf,

    /// Resolver configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spacing between priorities, overrides the config file
    #[arg(long)]
    step: Option<i32>,
}

impl InputArgs {
    fn ordering_config(&self) -> Result<OrderingConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => OrderingConfig::default(),
        };
        if let Some(step) = self.step {
            config.step = step;
        }
        config.validate().context("invalid resolver configuration")?;
        Ok(config)
    }

    fn declarations(&self) -> Result<DeclarationSet> {
        ManifestDeclarationSource::new(&self.manifest)
            .load_declarations()
            .with_context(|| format!("failed to load manifest {}", self.manifest.display()))
    }
}

fn load_config(path: &Path) -> Result<OrderingConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse config {}", path.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    let _guard = match init_telemetry(telemetry) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: telemetry disabled: {}", e);
            None
        }
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Resolve { input, json } => {
            let service = OrderResolverService::with_config(input.ordering_config()?);
            let declarations = input.declarations()?;
            let result = service
                .resolve(&declarations)
                .map_err(|e| describe_failure(e, &input.manifest))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::order_table(&result));
            }
            Ok(())
        }

        Command::Apply {
            input,
            registry,
            dry_run,
        } => {
            let service = OrderResolverService::with_config(input.ordering_config()?);
            let declarations = input.declarations()?;
            let mut store = JsonFileRegistry::open(&registry)
                .with_context(|| format!("failed to open registry {}", registry.display()))?;

            let report = service
                .resolve_and_apply(&declarations, &mut store)
                .map_err(|e| describe_failure(e, &input.manifest))?;

            if dry_run {
                debug!("Dry run, registry not saved");
            } else {
                store
                    .save()
                    .with_context(|| format!("failed to save registry {}", registry.display()))?;
                info!(registry = %registry.display(), "Registry saved");
            }

            print!("{}", render::apply_summary(&report, dry_run));
            Ok(())
        }

        Command::Check { input } => {
            let service = OrderResolverService::with_config(input.ordering_config()?);
            let declarations = input.declarations()?;
            let result = service
                .resolve(&declarations)
                .map_err(|e| describe_failure(e, &input.manifest))?;

            info!(items = result.len(), "Declarations are consistent");
            Ok(())
        }
    }
}

fn describe_failure(err: OrderingError, manifest: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "cannot order the declarations in {}",
        manifest.display()
    ))
}
