//! Geometry stage commands: step-to-brep, merge, facet

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fast_ctd::{
    FacetOptions, GeometryAdapter, MaterialsDef, MergeOptions, StepToBrepOptions, Toolchain,
    backend,
};

/// Arguments for the step-to-brep command
#[derive(Args)]
pub struct StepToBrepArgs {
    /// Input STEP file (.stp/.step)
    pub input: PathBuf,

    /// Output BREP file (.brep)
    pub output: PathBuf,

    /// Drop components with a smaller volume (default: 1.0)
    #[arg(long)]
    pub minimum_volume: Option<f64>,

    /// Attempt to heal wireframes and shapes
    #[arg(long)]
    pub fix_geometry: bool,

    /// Skip geometry validity checks
    #[arg(long)]
    pub no_check_geometry: bool,

    /// Enable logging inside the geometry library
    #[arg(long)]
    pub ext_logging: bool,
}

/// Arguments for the merge command
#[derive(Args)]
pub struct MergeArgs {
    /// Input BREP file
    pub input: PathBuf,

    /// Output BREP file
    pub output: PathBuf,

    /// Merge distance tolerance (default: 0.001)
    #[arg(long)]
    pub dist_tolerance: Option<f64>,

    /// Enable logging inside the geometry library
    #[arg(long)]
    pub ext_logging: bool,
}

/// Arguments for the facet command
#[derive(Args)]
pub struct FacetArgs {
    /// Input BREP file
    pub input: PathBuf,

    /// Output DAGMC file (.h5m)
    pub output: PathBuf,

    /// Materials CSV, one material per volume in geometry order
    #[arg(short, long)]
    pub materials: PathBuf,

    /// Linear deflection tolerance (default: 0.001)
    #[arg(long)]
    pub lin_deflection_tol: Option<f64>,

    /// Treat the linear tolerance as an absolute length
    #[arg(long)]
    pub tol_is_absolute: bool,

    /// Angular deflection tolerance in radians (default: 0.5)
    #[arg(long)]
    pub ang_deflection_tol: Option<f64>,

    /// Geometry scale factor (default: 0.1, mm → cm)
    #[arg(long)]
    pub scale_factor: Option<f64>,

    /// Enable logging inside the geometry library
    #[arg(long)]
    pub ext_logging: bool,
}

/// Flags only ever switch a default on or off; an absent flag keeps the default.
fn switch(set: bool, value: bool) -> Option<bool> {
    set.then_some(value)
}

/// Execute the step-to-brep command
pub fn step_to_brep(args: StepToBrepArgs, toolchain: &Toolchain) -> Result<()> {
    let adapter = GeometryAdapter::new(backend::default_backend(toolchain));
    let options = StepToBrepOptions {
        minimum_volume: args.minimum_volume,
        fix_geometry: switch(args.fix_geometry, true),
        check_geometry: switch(args.no_check_geometry, false),
        enable_logging: switch(args.ext_logging, true),
    };

    let components = adapter
        .convert_step_to_brep(&args.input, &args.output, &options)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    println!("{} components:", components.len());
    for component in &components {
        println!("  {},{}", component.group, component.name);
    }
    Ok(())
}

/// Execute the merge command
pub fn merge(args: MergeArgs, toolchain: &Toolchain) -> Result<()> {
    let adapter = GeometryAdapter::new(backend::default_backend(toolchain));
    let options = MergeOptions {
        dist_tolerance: args.dist_tolerance,
        enable_logging: switch(args.ext_logging, true),
    };

    adapter
        .merge_brep_geometries(&args.input, &args.output, &options)
        .with_context(|| format!("Failed to merge {}", args.input.display()))
}

/// Execute the facet command
pub fn facet(args: FacetArgs, toolchain: &Toolchain) -> Result<()> {
    let adapter = GeometryAdapter::new(backend::default_backend(toolchain));
    let options = FacetOptions {
        lin_deflection_tol: args.lin_deflection_tol,
        tol_is_absolute: switch(args.tol_is_absolute, true),
        ang_deflection_tol: args.ang_deflection_tol,
        scale_factor: args.scale_factor,
        enable_logging: switch(args.ext_logging, true),
    };

    adapter
        .facet_brep_to_dagmc(
            &args.input,
            &args.output,
            &MaterialsDef::CsvFile(args.materials),
            &[],
            &options,
        )
        .with_context(|| format!("Failed to facet {}", args.input.display()))
}
