//! Pipeline command - the whole STEP → DAGMC workflow
//!
//! Orchestrates: step-to-brep → merge → facet → make-watertight → (to-vtk)
//!
//! Stages run in order and stop at the first failure. Files written by
//! earlier stages are left in place.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fast_ctd::{GeometryAdapter, TightnessVerdict, ToolRunner, Toolchain, backend};

use crate::manifest::CtdManifest;
use crate::watertight::{describe_report, ensure_success};

/// Arguments for the pipeline command
#[derive(Args)]
pub struct PipelineArgs {
    /// Path to ctd.toml manifest
    #[arg(default_value = "ctd.toml")]
    pub manifest: PathBuf,
}

/// Execute the pipeline command
///
/// `toolchain_dir` from the command line wins over the manifest's directory;
/// the manifest's executable names still apply.
pub fn execute(args: PipelineArgs, toolchain_dir: Option<PathBuf>) -> Result<()> {
    let manifest = CtdManifest::load(&args.manifest)?;
    let pipeline = &manifest.pipeline;
    let outputs = pipeline.outputs();

    let toolchain = match toolchain_dir {
        Some(dir) => Toolchain::in_dir(dir).with_names(manifest.toolchain.names.clone()),
        None => Toolchain::from_config(&manifest.toolchain),
    };
    let adapter = GeometryAdapter::new(backend::default_backend(&toolchain));

    println!("=== STEP → BREP ===");
    let components = adapter
        .convert_step_to_brep(&pipeline.input, &outputs.brep, &pipeline.step_to_brep)
        .with_context(|| format!("Failed to convert {}", pipeline.input.display()))?;
    println!("  {} components → {}", components.len(), outputs.brep.display());

    println!("=== Merge ===");
    adapter
        .merge_brep_geometries(&outputs.brep, &outputs.merged_brep, &pipeline.merge)
        .context("Failed to merge BREP geometry")?;
    println!("  → {}", outputs.merged_brep.display());

    println!("=== Facet ===");
    adapter
        .facet_brep_to_dagmc(
            &outputs.merged_brep,
            &outputs.dagmc,
            &pipeline.materials,
            &components,
            &pipeline.facet,
        )
        .context("Failed to facet BREP geometry")?;
    println!("  → {}", outputs.dagmc.display());

    let runner = ToolRunner::new(toolchain);
    let final_model = if pipeline.make_watertight {
        println!("=== Make watertight ===");
        let output = runner.make_watertight(&outputs.dagmc, Some(&outputs.watertight_dagmc))?;
        ensure_success("make_watertight", &output)?;
        println!("  → {}", outputs.watertight_dagmc.display());
        println!("  Leak report: {}", describe_report(&output.stdout));
        if TightnessVerdict::of_report(&output.stdout) != TightnessVerdict::Watertight {
            tracing::warn!(
                model = %outputs.watertight_dagmc.display(),
                "Model may not be watertight"
            );
        }
        &outputs.watertight_dagmc
    } else {
        &outputs.dagmc
    };

    if pipeline.vtk {
        println!("=== VTK ===");
        let output = runner.convert_mesh_format(final_model, &outputs.vtk)?;
        ensure_success("mbconvert", &output)?;
        println!("  → {}", outputs.vtk.display());
    }

    println!("Done: {}", final_model.display());
    Ok(())
}
