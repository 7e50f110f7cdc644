//! fast-ctd - thin orchestration around the CAD-to-DAGMC toolchain
//!
//! Nothing geometric happens in this crate. It validates paths, fills in
//! defaults, hands work to an opaque geometry library or to external
//! command line tools, and decodes their reports.
//!
//! # Architecture
//!
//! - [`GeometryAdapter`] - STEP → BREP, BREP merge and BREP → DAGMC faceting
//!   on top of a [`GeometryBackend`]
//! - [`ToolRunner`] - `make_watertight`, `check_watertight` and mesh format
//!   conversion as subprocesses, returning a [`ToolOutput`]
//! - [`decode_tightness_checks`] - turns a leak report into percentages
//!
//! Stages are composed by the caller, in pipeline order:
//!
//! ```no_run
//! use std::path::Path;
//! use fast_ctd::{GeometryAdapter, MaterialsDef, ToolRunner, Toolchain, backend};
//!
//! # fn main() -> fast_ctd::Result<()> {
//! let toolchain = Toolchain::discover();
//! let adapter = GeometryAdapter::new(backend::default_backend(&toolchain));
//!
//! let components = adapter.convert_step_to_brep(
//!     Path::new("model.stp"),
//!     Path::new("model.brep"),
//!     &Default::default(),
//! )?;
//! adapter.merge_brep_geometries(
//!     Path::new("model.brep"),
//!     Path::new("model-merged.brep"),
//!     &Default::default(),
//! )?;
//! adapter.facet_brep_to_dagmc(
//!     Path::new("model-merged.brep"),
//!     Path::new("model-nwt.h5m"),
//!     &MaterialsDef::CsvFile("materials.csv".into()),
//!     &components,
//!     &Default::default(),
//! )?;
//!
//! let runner = ToolRunner::new(toolchain);
//! let repaired = runner.make_watertight(Path::new("model-nwt.h5m"), Some(Path::new("model.h5m")))?;
//! assert!(repaired.success());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod backend;
pub mod logging;
pub mod materials;
pub mod options;
pub mod runner;
pub mod tightness;
pub mod toolchain;

pub use adapter::{ComponentInfo, GeometryAdapter, parse_component_records};
pub use backend::GeometryBackend;
pub use materials::{MaterialList, MaterialsDef};
pub use options::{FacetOptions, MergeOptions, StepToBrepOptions, none_guard};
pub use runner::{ToolOutput, ToolRunner, default_watertight_output};
pub use tightness::{Percentage, TightnessVerdict, decode_tightness_checks};
pub use toolchain::{Tool, Toolchain, ToolchainConfig};

// Re-export the shared error and file kinds
pub use fast_ctd_shared::{CtdError, FileKind, Result};
