//! fast-ctd - CAD to DAGMC conversion from the command line
//!
//! # Commands
//!
//! - `fast-ctd step-to-brep` - Convert a STEP file to BREP
//! - `fast-ctd merge` - Merge coincident BREP geometry
//! - `fast-ctd facet` - Facet a BREP into a DAGMC `.h5m` model
//! - `fast-ctd make-watertight` - Repair a DAGMC model
//! - `fast-ctd check-watertight` - Report leaky surfaces/volumes
//! - `fast-ctd to-vtk` - Convert a DAGMC model to VTK
//! - `fast-ctd pipeline` - Run the whole STEP → DAGMC workflow from `ctd.toml`
//!
//! # Manifest (ctd.toml)
//!
//! ```toml
//! [toolchain]
//! dir = "/opt/dagmc/bin"
//!
//! [pipeline]
//! input = "data/EUDEMO.stp"
//! materials = "data/EUDEMO-materials.csv"
//!
//! [pipeline.step_to_brep]
//! minimum_volume = 0.5
//! ```

mod convert;
mod manifest;
mod pipeline;
mod watertight;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fast_ctd::Toolchain;

/// fast-ctd - CAD to DAGMC conversion
#[derive(Parser)]
#[command(name = "fast-ctd")]
#[command(about = "Convert STEP models into watertight DAGMC geometry")]
#[command(version)]
struct Cli {
    /// Directory containing the geometry and DAGMC executables
    /// (defaults to $FAST_CTD_TOOLCHAIN_DIR, then this executable's directory, then PATH)
    #[arg(long, global = true)]
    toolchain: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a STEP file to a BREP file
    StepToBrep(convert::StepToBrepArgs),

    /// Merge coincident geometry of a BREP file
    Merge(convert::MergeArgs),

    /// Facet a BREP file into a DAGMC .h5m model
    Facet(convert::FacetArgs),

    /// Make a DAGMC model watertight
    MakeWatertight(watertight::MakeWatertightArgs),

    /// Check a DAGMC model for leaks
    CheckWatertight(watertight::CheckWatertightArgs),

    /// Convert a DAGMC model to VTK
    ToVtk(watertight::ToVtkArgs),

    /// Run STEP → BREP → merged BREP → DAGMC → watertight DAGMC
    Pipeline(pipeline::PipelineArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let toolchain = match &cli.toolchain {
        Some(dir) => Toolchain::in_dir(dir),
        None => Toolchain::discover(),
    };

    match cli.command {
        Commands::StepToBrep(args) => convert::step_to_brep(args, &toolchain),
        Commands::Merge(args) => convert::merge(args, &toolchain),
        Commands::Facet(args) => convert::facet(args, &toolchain),
        Commands::MakeWatertight(args) => watertight::make_watertight(args, toolchain),
        Commands::CheckWatertight(args) => watertight::check_watertight(args, toolchain),
        Commands::ToVtk(args) => watertight::to_vtk(args, toolchain),
        Commands::Pipeline(args) => pipeline::execute(args, cli.toolchain),
    }
}
