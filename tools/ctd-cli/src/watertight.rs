//! DAGMC tool commands: make-watertight, check-watertight, to-vtk
//!
//! The library never fails on a non-zero tool exit; these commands do, after
//! printing what the tool said.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use fast_ctd::{
    TightnessVerdict, ToolOutput, ToolRunner, Toolchain, decode_tightness_checks,
    default_watertight_output,
};

/// Arguments for the make-watertight command
#[derive(Args)]
pub struct MakeWatertightArgs {
    /// Input DAGMC file (.h5m)
    pub input: PathBuf,

    /// Output DAGMC file (defaults to <input>-wt.h5m)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the check-watertight command
#[derive(Args)]
pub struct CheckWatertightArgs {
    /// DAGMC file to check (.h5m)
    pub input: PathBuf,

    /// Tolerance passed to check_watertight
    #[arg(short, long)]
    pub tolerance: Option<f64>,
}

/// Arguments for the to-vtk command
#[derive(Args)]
pub struct ToVtkArgs {
    /// Input DAGMC file (.h5m)
    pub input: PathBuf,

    /// Output VTK file (.vtk)
    pub output: PathBuf,
}

/// Fail with the tool's stderr if it exited non-zero.
pub fn ensure_success(tool: &str, output: &ToolOutput) -> Result<()> {
    if output.success() {
        return Ok(());
    }
    anyhow::bail!(
        "{} failed (exit code: {})\n{}",
        tool,
        output
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        output.stderr.trim_end()
    )
}

/// One line summary of a leak report
pub fn describe_report(stdout: &str) -> String {
    let decoded = decode_tightness_checks(stdout);
    let verdict = TightnessVerdict::from_percentages(decoded.as_deref());
    match decoded {
        Some(percentages) => {
            let values: Vec<String> = percentages.iter().map(ToString::to_string).collect();
            format!("{} ({})", verdict, values.join(", "))
        }
        None => verdict.to_string(),
    }
}

/// Execute the make-watertight command
pub fn make_watertight(args: MakeWatertightArgs, toolchain: Toolchain) -> Result<()> {
    let runner = ToolRunner::new(toolchain);
    let output = runner.make_watertight(&args.input, args.output.as_deref())?;
    ensure_success("make_watertight", &output)?;

    let written = args
        .output
        .unwrap_or_else(|| default_watertight_output(&args.input));
    println!("Output: {}", written.display());
    println!("Leak report: {}", describe_report(&output.stdout));
    Ok(())
}

/// Execute the check-watertight command
pub fn check_watertight(args: CheckWatertightArgs, toolchain: Toolchain) -> Result<()> {
    let runner = ToolRunner::new(toolchain);
    let output = runner.check_watertight(&args.input, args.tolerance)?;
    ensure_success("check_watertight", &output)?;

    println!("{}", describe_report(&output.stdout));
    Ok(())
}

/// Execute the to-vtk command
pub fn to_vtk(args: ToVtkArgs, toolchain: Toolchain) -> Result<()> {
    let runner = ToolRunner::new(toolchain);
    let output = runner.convert_mesh_format(&args.input, &args.output)?;
    ensure_success("mbconvert", &output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_report() {
        assert_eq!(describe_report("0.0% and 0%"), "watertight (0%, 0%)");
        assert_eq!(describe_report("volumes: 12.5%"), "leaky (12.5%)");
        assert_eq!(describe_report("nothing"), "unknown");
    }

    #[test]
    fn test_ensure_success_includes_stderr() {
        let output = ToolOutput {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "bad file\n".to_string(),
        };
        let err = ensure_success("mbconvert", &output).unwrap_err().to_string();
        assert!(err.contains("exit code: 2"));
        assert!(err.contains("bad file"));
    }
}
