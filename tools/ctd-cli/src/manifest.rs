//! ctd.toml manifest parsing
//!
//! Describes a full STEP → DAGMC run. Relative paths are resolved against
//! the manifest's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fast_ctd::{FacetOptions, MaterialsDef, MergeOptions, StepToBrepOptions, ToolchainConfig};
use serde::Deserialize;

/// ctd.toml manifest structure
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtdManifest {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    pub pipeline: PipelineSection,
}

/// `[pipeline]` section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    /// STEP model to convert
    pub input: PathBuf,

    /// CSV path, list of materials, or component → material table
    pub materials: MaterialsDef,

    /// Where outputs go. Default: the input's directory
    pub output_dir: Option<PathBuf>,

    /// Stem of every output file. Default: the input's stem
    pub name: Option<String>,

    /// Repair the faceted model with make_watertight.
    /// Default: true
    #[serde(default = "default_true")]
    pub make_watertight: bool,

    /// Also write a VTK copy of the final model.
    /// Default: false
    #[serde(default)]
    pub vtk: bool,

    #[serde(default)]
    pub step_to_brep: StepToBrepOptions,
    #[serde(default)]
    pub merge: MergeOptions,
    #[serde(default)]
    pub facet: FacetOptions,
}

fn default_true() -> bool {
    true
}

/// Files written by a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutputs {
    pub brep: PathBuf,
    pub merged_brep: PathBuf,
    /// Faceted, not yet watertight
    pub dagmc: PathBuf,
    pub watertight_dagmc: PathBuf,
    pub vtk: PathBuf,
}

impl CtdManifest {
    /// Load manifest from file, resolving relative paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let mut manifest = Self::parse(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.resolve_paths(base);
        Ok(manifest)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse ctd.toml")
    }

    fn resolve_paths(&mut self, base: &Path) {
        let pipeline = &mut self.pipeline;
        pipeline.input = base.join(&pipeline.input);
        if let MaterialsDef::CsvFile(path) = &mut pipeline.materials {
            *path = base.join(&*path);
        }
        if let Some(dir) = &mut pipeline.output_dir {
            *dir = base.join(&*dir);
        }
        if let Some(dir) = &mut self.toolchain.dir {
            *dir = base.join(&*dir);
        }
    }
}

impl PipelineSection {
    pub fn outputs(&self) -> PipelineOutputs {
        let dir = self
            .output_dir
            .clone()
            .or_else(|| self.input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let name = self.name.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string())
        });

        PipelineOutputs {
            brep: dir.join(format!("{}.brep", name)),
            merged_brep: dir.join(format!("{}-merged.brep", name)),
            dagmc: dir.join(format!("{}-nwt.h5m", name)),
            watertight_dagmc: dir.join(format!("{}.h5m", name)),
            vtk: dir.join(format!("{}.vtk", name)),
        }
    }
}
