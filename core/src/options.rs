//! Optional parameters for the geometry stages and their defaults
//!
//! Every option is an `Option<T>`; `None` means "use the default". Defaults
//! are applied in one place, [`none_guard`], when options are resolved into
//! the settings handed to a backend.

use serde::Deserialize;

use fast_ctd_shared::{CtdError, Result};

pub const DEFAULT_MINIMUM_VOLUME: f64 = 1.0;
pub const DEFAULT_CHECK_GEOMETRY: bool = true;
pub const DEFAULT_FIX_GEOMETRY: bool = false;
pub const DEFAULT_DIST_TOLERANCE: f64 = 0.001;
pub const DEFAULT_LIN_DEFLECTION_TOL: f64 = 0.001;
pub const DEFAULT_TOL_IS_ABSOLUTE: bool = false;
pub const DEFAULT_ANG_DEFLECTION_TOL: f64 = 0.5;
pub const DEFAULT_SCALE_FACTOR: f64 = 0.1;
pub const DEFAULT_ENABLE_LOGGING: bool = false;

/// Return `default` if `value` is `None`, otherwise the value itself.
pub fn none_guard<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

fn non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_nan() || value < 0.0 {
        return Err(CtdError::InvalidParameter(format!(
            "{} ({}) should not be negative",
            name, value
        )));
    }
    Ok(value)
}

/// Options for STEP → BREP conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepToBrepOptions {
    /// Components with a smaller volume are dropped. Default: 1.0
    pub minimum_volume: Option<f64>,
    /// Attempt to heal wireframes and shapes. Default: false
    pub fix_geometry: Option<bool>,
    /// Run geometry validity checks. Default: true
    pub check_geometry: Option<bool>,
    /// Enable logging inside the geometry library. Default: false
    pub enable_logging: Option<bool>,
}

/// Fully defaulted STEP → BREP settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepToBrepSettings {
    pub minimum_volume: f64,
    pub fix_geometry: bool,
    pub check_geometry: bool,
    pub enable_logging: bool,
}

impl StepToBrepOptions {
    pub fn resolve(&self) -> Result<StepToBrepSettings> {
        Ok(StepToBrepSettings {
            minimum_volume: non_negative(
                "minimum_volume",
                none_guard(self.minimum_volume, DEFAULT_MINIMUM_VOLUME),
            )?,
            fix_geometry: none_guard(self.fix_geometry, DEFAULT_FIX_GEOMETRY),
            check_geometry: none_guard(self.check_geometry, DEFAULT_CHECK_GEOMETRY),
            enable_logging: none_guard(self.enable_logging, DEFAULT_ENABLE_LOGGING),
        })
    }
}

/// Options for merging coincident BREP geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeOptions {
    /// Distance below which vertices are merged. Default: 0.001
    pub dist_tolerance: Option<f64>,
    pub enable_logging: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeSettings {
    pub dist_tolerance: f64,
    pub enable_logging: bool,
}

impl MergeOptions {
    pub fn resolve(&self) -> Result<MergeSettings> {
        Ok(MergeSettings {
            dist_tolerance: non_negative(
                "dist_tolerance",
                none_guard(self.dist_tolerance, DEFAULT_DIST_TOLERANCE),
            )?,
            enable_logging: none_guard(self.enable_logging, DEFAULT_ENABLE_LOGGING),
        })
    }
}

/// Options for faceting a BREP into a DAGMC model
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacetOptions {
    /// Linear deflection tolerance. Default: 0.001
    pub lin_deflection_tol: Option<f64>,
    /// Treat `lin_deflection_tol` as an absolute length instead of relative
    /// to edge size. Default: false
    pub tol_is_absolute: Option<bool>,
    /// Angular deflection tolerance in radians. Default: 0.5
    pub ang_deflection_tol: Option<f64>,
    /// Scale applied to the geometry, e.g. mm → cm. Default: 0.1
    pub scale_factor: Option<f64>,
    pub enable_logging: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetSettings {
    pub lin_deflection_tol: f64,
    pub tol_is_absolute: bool,
    pub ang_deflection_tol: f64,
    pub scale_factor: f64,
    pub enable_logging: bool,
}

impl FacetOptions {
    pub fn resolve(&self) -> FacetSettings {
        FacetSettings {
            lin_deflection_tol: none_guard(self.lin_deflection_tol, DEFAULT_LIN_DEFLECTION_TOL),
            tol_is_absolute: none_guard(self.tol_is_absolute, DEFAULT_TOL_IS_ABSOLUTE),
            ang_deflection_tol: none_guard(self.ang_deflection_tol, DEFAULT_ANG_DEFLECTION_TOL),
            scale_factor: none_guard(self.scale_factor, DEFAULT_SCALE_FACTOR),
            enable_logging: none_guard(self.enable_logging, DEFAULT_ENABLE_LOGGING),
        }
    }
}
