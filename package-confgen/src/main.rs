/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use package_confgen::config::ConfigManager;
use package_confgen::naming::Names;
use package_confgen::package_gen;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Schema and configuration generator for a DAQ package.
///
/// Example:
///   package-confgen schema --package readout --module DataLinkHandler -o schema.json
///   package-confgen generate -c my_config.yaml
#[derive(Debug, Parser)]
#[command(
    name = "package-confgen",
    about = "package_gen schema and configuration generator",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit the dependency-ordered schema document as JSON.
    Schema {
        #[command(flatten)]
        names: NameArgs,

        /// Only emit types under this dotted path (plus their dependencies).
        #[arg(short = 's', long = "select")]
        select: Option<String>,

        #[command(flatten)]
        out: OutArgs,
    },

    /// Emit the default package_gen configuration.
    Defaults {
        #[command(flatten)]
        names: NameArgs,

        #[command(flatten)]
        out: OutArgs,
    },

    /// Validate a user configuration and emit it with defaults filled in.
    Generate {
        #[command(flatten)]
        names: NameArgs,

        /// Path to the YAML or JSON configuration file.
        #[arg(short = 'c', long = "config")]
        config: PathBuf,

        #[command(flatten)]
        out: OutArgs,
    },
}

#[derive(Debug, Args)]
struct NameArgs {
    /// Package name; sets the schema namespace dunedaq.<package>.confgen.
    #[arg(short = 'p', long = "package")]
    package: Option<String>,

    /// DAQ module name (PascalCase); sets the num_<module>s count field.
    #[arg(short = 'm', long = "module")]
    module: Option<String>,
}

#[derive(Debug, Args)]
struct OutArgs {
    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging on stderr; stdout carries the JSON output.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Schema { names, select, out } => {
            let names = parse_names(&names)?;
            let doc = package_gen::schema(&names, select.as_deref())?;
            let text = doc
                .to_json_pretty()
                .context("Failed to serialise schema document")?;
            write_output(out.output.as_deref(), &text)
        }

        Command::Defaults { names, out } => {
            let names = parse_names(&names)?;
            let hier = Arc::new(package_gen::hierarchy(&names)?);
            let mgr = ConfigManager::new(hier, package_gen::root_type(&names))?;
            write_output(out.output.as_deref(), &to_json(mgr.value())?)
        }

        Command::Generate { names, config, out } => {
            let names = parse_names(&names)?;
            let hier = Arc::new(package_gen::hierarchy(&names)?);
            let mut mgr = ConfigManager::new(hier, package_gen::root_type(&names))?;
            mgr.load_from_file(&config)?;
            write_output(out.output.as_deref(), &to_json(mgr.value())?)
        }
    }
}

fn parse_names(args: &NameArgs) -> Result<Names> {
    let names = Names::parse(args.package.as_deref(), args.module.as_deref())?;
    info!(
        package = %names.package,
        module  = %names.module,
        "Configuration"
    );
    Ok(names)
}

fn to_json(value: &oschema::Value) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialise configuration")
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("Cannot write output file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
