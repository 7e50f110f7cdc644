//! Geometry backend driving the library's command line front ends
//!
//! Each operation is one blocking subprocess:
//!
//! ```text
//! occ_step_to_brep <in.stp> <out.brep> --minimum-volume <v> [--check-geometry] [--fix-geometry] [--logging]
//! occ_merger       <in.brep> <out.brep> --tolerance <t> [--logging]
//! occ_faceter      <in.brep> <out.h5m> --materials <mats.csv> --lin-deflection <t> [--tol-is-absolute]
//!                  --ang-deflection <a> --scale-factor <s> [--logging]
//! ```
//!
//! `occ_step_to_brep` prints one `group,name` record per component on stdout.

use std::path::Path;
use std::process::Command;

use fast_ctd_shared::{CtdError, Result};

use super::{FacetRequest, GeometryBackend, MergeRequest, StepToBrepRequest};
use crate::logging::LOG_TARGET;
use crate::runner::{ToolOutput, run_captured};
use crate::toolchain::{Tool, Toolchain};

#[derive(Debug, Clone)]
pub struct CommandBackend {
    toolchain: Toolchain,
}

impl CommandBackend {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    fn run(&self, tool: Tool, operation: &'static str, build: impl FnOnce(&mut Command)) -> Result<ToolOutput> {
        let program = self.toolchain.locate(tool)?;
        let mut command = Command::new(&program);
        build(&mut command);

        let output = run_captured(command, &program)?;
        if !output.success() {
            tracing::warn!(
                target: LOG_TARGET,
                operation,
                exit_code = ?output.exit_code,
                stderr = %output.stderr.trim_end(),
                "Geometry tool failed"
            );
            return Err(CtdError::BackendFailed {
                operation,
                code: output.exit_code.unwrap_or(-1),
            });
        }
        Ok(output)
    }
}

fn flag(command: &mut Command, name: &str, enabled: bool) {
    if enabled {
        command.arg(name);
    }
}

fn io_pair(command: &mut Command, input: &Path, output: &Path) {
    command.arg(input).arg(output);
}

impl GeometryBackend for CommandBackend {
    fn step_to_brep(&self, request: &StepToBrepRequest<'_>) -> Result<Vec<String>> {
        let settings = request.settings;
        let output = self.run(Tool::StepToBrep, "step_to_brep", |command| {
            io_pair(command, request.input, request.output);
            command
                .arg("--minimum-volume")
                .arg(settings.minimum_volume.to_string());
            flag(command, "--check-geometry", settings.check_geometry);
            flag(command, "--fix-geometry", settings.fix_geometry);
            flag(command, "--logging", settings.enable_logging);
        })?;

        Ok(output
            .stdout
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn merge(&self, request: &MergeRequest<'_>) -> Result<()> {
        let settings = request.settings;
        self.run(Tool::BrepMerger, "merge", |command| {
            io_pair(command, request.input, request.output);
            command
                .arg("--tolerance")
                .arg(settings.dist_tolerance.to_string());
            flag(command, "--logging", settings.enable_logging);
        })?;
        Ok(())
    }

    fn facet(&self, request: &FacetRequest<'_>) -> Result<()> {
        let settings = request.settings;
        // Kept alive until the faceter has exited.
        let materials_csv = request.materials.to_temp_csv()?;

        self.run(Tool::BrepFaceter, "facet", |command| {
            io_pair(command, request.input, request.output);
            command
                .arg("--materials")
                .arg(materials_csv.path())
                .arg("--lin-deflection")
                .arg(settings.lin_deflection_tol.to_string());
            flag(command, "--tol-is-absolute", settings.tol_is_absolute);
            command
                .arg("--ang-deflection")
                .arg(settings.ang_deflection_tol.to_string())
                .arg("--scale-factor")
                .arg(settings.scale_factor.to_string());
            flag(command, "--logging", settings.enable_logging);
        })?;
        Ok(())
    }
}
