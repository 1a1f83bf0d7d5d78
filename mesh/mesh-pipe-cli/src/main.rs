//! Pipe mesh generator.
//!
//! Reads a JSON document of waypoint lists and a shared configuration,
//! sweeps every pipe and writes the combined mesh.
//!
//! # Commands
//!
//! - `pipegen generate <INPUT> -o <OUTPUT>` - Write an OBJ or PLY mesh
//! - `pipegen check <INPUT>` - Validate and print diagnostics only
//!
//! Logging is controlled by `-v` or the `RUST_LOG` environment variable.

mod document;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mesh_io::{MeshFormat, save_obj, save_ply};
use mesh_pipe::{PipeMesh, generate_all};
use owo_colors::OwoColorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::document::PipeDocument;

/// Procedural pipe meshes from waypoint lists
#[derive(Parser)]
#[command(name = "pipegen")]
#[command(about = "Generate pipe meshes from waypoint documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the combined mesh and write it to disk
    Generate {
        /// JSON pipe document
        #[arg(name = "INPUT")]
        input: PathBuf,

        /// Output mesh (.obj or .ply)
        #[arg(short, long)]
        output: PathBuf,

        /// Write ASCII instead of binary PLY
        #[arg(long)]
        ascii: bool,
    },

    /// Validate a document and print diagnostics
    Check {
        /// JSON pipe document
        #[arg(name = "INPUT")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            ascii,
        } => generate(&input, &output, ascii),
        Commands::Check { input } => check(&input),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build(input: &Path) -> Result<(PipeDocument, PipeMesh)> {
    let document = PipeDocument::load(input)?;
    let mesh = generate_all(&document.points(), &document.config)
        .with_context(|| format!("Invalid pipes in {}", input.display()))?;
    Ok((document, mesh))
}

fn generate(input: &Path, output: &Path, ascii: bool) -> Result<()> {
    let Some(format) = MeshFormat::from_path(output) else {
        bail!(
            "Unsupported output extension for {} (expected .obj or .ply)",
            output.display()
        );
    };

    let (document, result) = build(input)?;

    match format {
        MeshFormat::Obj => save_obj(&result.mesh, &result.submeshes, output),
        MeshFormat::Ply => save_ply(&result.mesh, output, !ascii),
    }
    .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(path = %output.display(), "Wrote mesh");
    report(&document, &result);
    Ok(())
}

fn check(input: &Path) -> Result<()> {
    let (document, result) = build(input)?;
    report(&document, &result);
    Ok(())
}

fn report(document: &PipeDocument, result: &PipeMesh) {
    println!();
    println!("{}", "Pipe mesh".bright_white().bold());
    println!("  {:14} {}", "pipes", result.pipe_count());
    println!("  {:14} {}", "vertices", result.mesh.vertices.len());
    println!("  {:14} {}", "triangles", result.mesh.faces.len());
    println!("  {:14} {:.3}", "max curvature", result.max_curvature);

    let curvature = document.config.curvature;
    if document.config.curvature_within(result.max_curvature) {
        println!(
            "  {:14} {}",
            "curvature",
            format!("{curvature} ok").green()
        );
    } else {
        println!(
            "  {:14} {}",
            "curvature",
            format!("{curvature} exceeds {:.3}", result.max_curvature).yellow()
        );
    }
    println!();
}
