//! Geometry backend seam
//!
//! The CAD kernel work (STEP import, merging, faceting) is done by a
//! separately built library. [`GeometryBackend`] is the call surface this
//! crate expects from it; requests arrive validated and fully defaulted.
//!
//! - [`CommandBackend`] drives the library's command line front ends
//! - `NativeBackend` (feature `native`) calls the compiled library directly

mod command;
#[cfg(feature = "native")]
mod native;

pub use command::CommandBackend;
#[cfg(feature = "native")]
pub use native::NativeBackend;

use std::path::Path;

use fast_ctd_shared::Result;

use crate::materials::MaterialList;
use crate::options::{FacetSettings, MergeSettings, StepToBrepSettings};
use crate::toolchain::Toolchain;

#[derive(Debug, Clone, Copy)]
pub struct StepToBrepRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub settings: StepToBrepSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct MergeRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub settings: MergeSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct FacetRequest<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub materials: &'a MaterialList,
    pub settings: FacetSettings,
}

/// Operations provided by the geometry library.
pub trait GeometryBackend {
    /// Convert STEP to BREP.
    ///
    /// Returns one raw `"<group>,<name>"` record per component, in geometry
    /// order. Parsing is left to the caller.
    fn step_to_brep(&self, request: &StepToBrepRequest<'_>) -> Result<Vec<String>>;

    /// Merge coincident vertices/faces of a BREP.
    fn merge(&self, request: &MergeRequest<'_>) -> Result<()>;

    /// Facet a BREP into a DAGMC `.h5m` model.
    fn facet(&self, request: &FacetRequest<'_>) -> Result<()>;
}

impl<B: GeometryBackend + ?Sized> GeometryBackend for Box<B> {
    fn step_to_brep(&self, request: &StepToBrepRequest<'_>) -> Result<Vec<String>> {
        (**self).step_to_brep(request)
    }

    fn merge(&self, request: &MergeRequest<'_>) -> Result<()> {
        (**self).merge(request)
    }

    fn facet(&self, request: &FacetRequest<'_>) -> Result<()> {
        (**self).facet(request)
    }
}

/// The linked library when built with `native`, the command line tools of
/// `toolchain` otherwise.
#[cfg(feature = "native")]
pub fn default_backend(_toolchain: &Toolchain) -> Box<dyn GeometryBackend> {
    Box::new(NativeBackend)
}

/// The linked library when built with `native`, the command line tools of
/// `toolchain` otherwise.
#[cfg(not(feature = "native"))]
pub fn default_backend(toolchain: &Toolchain) -> Box<dyn GeometryBackend> {
    Box::new(CommandBackend::new(toolchain.clone()))
}
