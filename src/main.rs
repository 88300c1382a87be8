// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use haproxy_operator::{
    compiler::{Compiler, CompilerConfig},
    constants::DEFAULT_CONFIG_ROOT,
    haproxy::ConfigDocument,
    manifest::{load_manifest, ConfigResource},
};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// HAProxy configuration compiler for Kubernetes resources
#[derive(Parser, Debug)]
#[command(name = "haproxy-operator", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile manifests and print the resulting HAProxy configuration
    Render(CompileArgs),

    /// Compile manifests and report errors without printing the configuration
    Check(CompileArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Manifest files containing Backend, Frontend and Listen resources
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory the certificates, maps and error pages are distributed to
    #[arg(long, env = "HAPROXY_CONFIG_ROOT", default_value = DEFAULT_CONFIG_ROOT)]
    config_root: String,

    /// Write the configuration to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => {
            let doc = compile(&args)?;
            let rendered = doc.to_string();
            match &args.output {
                Some(path) => {
                    std::fs::write(path, &rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Configuration written");
                }
                None => print!("{rendered}"),
            }
        }
        Commands::Check(args) => {
            let doc = compile(&args)?;
            info!(sections = doc.sections().len(), "Configuration is valid");
        }
    }
    Ok(())
}

/// Initialize logging.
///
/// Logs go to stderr so stdout carries only the configuration. Respects `RUST_LOG`
/// (default `info`) and `RUST_LOG_FORMAT` (`text` or `json`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .compact()
                .init();
        }
    }

    debug!("Logging initialized with file and line number tracking");
}

/// Load every manifest and compile all resources into one document.
///
/// Every resource is attempted so all problems are reported at once; any failure
/// fails the command.
fn compile(args: &CompileArgs) -> Result<ConfigDocument> {
    let compiler = Compiler::new(&CompilerConfig {
        config_root: args.config_root.clone(),
    });

    let mut resources: Vec<ConfigResource> = Vec::new();
    for file in &args.files {
        let loaded = load_manifest(file)?;
        debug!(file = %file.display(), resources = loaded.len(), "Loaded manifest");
        resources.extend(loaded);
    }

    let mut doc = ConfigDocument::new();
    let mut failed = 0_usize;
    for resource in &resources {
        if let Err(err) = compiler.compile(resource, &mut doc) {
            warn!(
                kind = resource.kind(),
                name = resource.name(),
                stage = %err.stage(),
                "Rejected resource: {err}"
            );
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} resources failed to compile", resources.len());
    }
    info!(resources = resources.len(), "Compiled all resources");
    Ok(doc)
}
