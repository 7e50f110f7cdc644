//! External tool runner
//!
//! Runs the DAGMC/MOAB command line tools as blocking subprocesses and hands
//! back exactly what they produced. A tool exiting non-zero is not an error
//! here: the exit code is in the returned [`ToolOutput`] and the caller
//! decides what it means. Missing executables and bad paths are errors, and
//! they are raised before anything is spawned.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use fast_ctd_shared::{
    CtdError, FileKind, Result, sibling_with_stem_suffix, validate_file_extension, validate_input,
};

use crate::logging::{LOG_TARGET, channel_span};
use crate::tightness::TightnessVerdict;
use crate::toolchain::{Tool, Toolchain};

/// Captured result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    fn from_output(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Run `command` to completion, capturing stdout and stderr.
///
/// There is no timeout: a hanging tool blocks the caller.
pub(crate) fn run_captured(mut command: Command, program: &Path) -> Result<ToolOutput> {
    tracing::debug!(target: LOG_TARGET, command = ?command, "Running");
    let output = command.output().map_err(|source| CtdError::Spawn {
        program: program.to_path_buf(),
        source,
    })?;
    let output = ToolOutput::from_output(output);
    tracing::debug!(
        target: LOG_TARGET,
        program = %program.display(),
        exit_code = ?output.exit_code,
        "Finished"
    );
    Ok(output)
}

/// Output path used by [`ToolRunner::make_watertight`] when none is given:
/// `model.h5m` → `model-wt.h5m`
pub fn default_watertight_output(h5m_in: &Path) -> PathBuf {
    sibling_with_stem_suffix(h5m_in, "-wt")
}

/// Paths of the stdout/stderr dumps written beside `h5m_in` when a repair
/// leaves leaks behind.
pub fn watertight_log_paths(h5m_in: &Path) -> (PathBuf, PathBuf) {
    let stem = h5m_in
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (
        h5m_in.with_file_name(format!("{}-make_watertight.stdout.txt", stem)),
        h5m_in.with_file_name(format!("{}-make_watertight.stderr.txt", stem)),
    )
}

/// Invokes the watertightness and conversion tools of a [`Toolchain`].
///
/// Log events are emitted inside the runner's span, which callers may
/// replace with [`ToolRunner::with_span`].
#[derive(Debug, Clone)]
pub struct ToolRunner {
    toolchain: Toolchain,
    span: tracing::Span,
}

impl ToolRunner {
    pub fn new(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            span: channel_span(),
        }
    }

    /// Emit this runner's log events inside `span`.
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Repair a DAGMC model with `make_watertight <in> -o <out>`.
    ///
    /// `h5m_out` defaults to [`default_watertight_output`]. The report at
    /// the end of the tool's stdout is decoded for logging; if leaks remain
    /// (or the tool failed) stdout and stderr are dumped beside the input,
    /// see [`watertight_log_paths`].
    ///
    /// # Errors
    /// Not-found if the executable or `h5m_in` is missing; an extension
    /// error if either path is not `.h5m`.
    pub fn make_watertight(&self, h5m_in: &Path, h5m_out: Option<&Path>) -> Result<ToolOutput> {
        let _entered = self.span.enter();

        let program = self.toolchain.locate(Tool::MakeWatertight)?;
        validate_input(h5m_in, FileKind::Dagmc)?;
        let h5m_out = h5m_out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_watertight_output(h5m_in));
        validate_file_extension(&h5m_out, FileKind::Dagmc)?;

        let mut command = Command::new(&program);
        command.arg(h5m_in).arg("-o").arg(&h5m_out);
        let output = run_captured(command, &program)?;

        report_watertight(h5m_in, &h5m_out, &output);
        Ok(output)
    }

    /// Check a DAGMC model with `check_watertight <file> [-t <tolerance>]`.
    ///
    /// Decode the result with [`crate::decode_tightness_checks`].
    pub fn check_watertight(&self, h5m_file: &Path, tolerance: Option<f64>) -> Result<ToolOutput> {
        let _entered = self.span.enter();

        let program = self.toolchain.locate(Tool::CheckWatertight)?;
        validate_input(h5m_file, FileKind::Dagmc)?;

        let mut command = Command::new(&program);
        command.arg(h5m_file);
        if let Some(tolerance) = tolerance {
            command.arg("-t").arg(tolerance.to_string());
        }
        run_captured(command, &program)
    }

    /// Convert a DAGMC model to VTK with `mbconvert <in> -f vtk <out>`.
    pub fn convert_mesh_format(&self, h5m_in: &Path, vtk_out: &Path) -> Result<ToolOutput> {
        let _entered = self.span.enter();

        let program = self.toolchain.locate(Tool::MeshConvert)?;
        validate_input(h5m_in, FileKind::Dagmc)?;
        validate_file_extension(vtk_out, FileKind::Vtk)?;

        let mut command = Command::new(&program);
        command.arg(h5m_in).arg("-f").arg("vtk").arg(vtk_out);
        let output = run_captured(command, &program)?;

        if output.success() {
            tracing::info!(
                target: LOG_TARGET,
                output_file = %vtk_out.display(),
                "Mesh format conversion finished"
            );
        }
        Ok(output)
    }
}

/// Log the outcome of a repair and keep the tool's output around when the
/// model is still leaky.
fn report_watertight(h5m_in: &Path, h5m_out: &Path, output: &ToolOutput) {
    let verdict = TightnessVerdict::of_report(&output.stdout);

    match (output.success(), verdict) {
        (true, TightnessVerdict::Watertight) => {
            tracing::info!(
                target: LOG_TARGET,
                output_file = %h5m_out.display(),
                "make_watertight finished successfully, with check_watertight showing no leaky volumes"
            );
        }
        (true, TightnessVerdict::Unknown) => {
            tracing::warn!(
                target: LOG_TARGET,
                output_file = %h5m_out.display(),
                "make_watertight finished, but its leak report could not be decoded"
            );
        }
        _ => {
            let (stdout_log, stderr_log) = watertight_log_paths(h5m_in);
            let dumped = std::fs::write(&stdout_log, &output.stdout)
                .and_then(|()| std::fs::write(&stderr_log, &output.stderr));
            if let Err(e) = dumped {
                tracing::warn!(target: LOG_TARGET, error = %e, "Failed to dump make_watertight logs");
            }

            if output.success() {
                tracing::warn!(
                    target: LOG_TARGET,
                    output_file = %h5m_out.display(),
                    stdout_log = %stdout_log.display(),
                    stderr_log = %stderr_log.display(),
                    "make_watertight finished successfully, but the model is not watertight. Check log files for details"
                );
            } else {
                tracing::warn!(
                    target: LOG_TARGET,
                    exit_code = ?output.exit_code,
                    stdout_log = %stdout_log.display(),
                    stderr_log = %stderr_log.display(),
                    "make_watertight failed. Check log files for details"
                );
            }
        }
    }
}
