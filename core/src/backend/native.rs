//! Geometry backend bound to the compiled `fast_ctd_ext` library
//!
//! The library is linked by the build script when the `native` feature is
//! enabled (`FAST_CTD_EXT_DIR` adds a search path). Every entry point
//! returns 0 on success.

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::Path;

use fast_ctd_shared::{CtdError, Result};

use super::{FacetRequest, GeometryBackend, MergeRequest, StepToBrepRequest};

mod sys {
    use std::ffi::{c_char, c_int};

    unsafe extern "C" {
        /// On success `*components` receives a newline separated list of
        /// `group,name` records, to be released with `fast_ctd_free_string`.
        pub fn fast_ctd_step_to_brep(
            input_step_file: *const c_char,
            output_brep_file: *const c_char,
            minimum_volume: f64,
            check_geometry: bool,
            fix_geometry: bool,
            logging: bool,
            components: *mut *mut c_char,
        ) -> c_int;

        pub fn fast_ctd_merge(
            input_brep_file: *const c_char,
            output_brep_file: *const c_char,
            dist_tolerance: f64,
            logging: bool,
        ) -> c_int;

        pub fn fast_ctd_facet(
            input_brep_file: *const c_char,
            output_h5m_file: *const c_char,
            materials_file: *const c_char,
            lin_deflection_tol: f64,
            tol_is_absolute: bool,
            ang_deflection_tol: f64,
            scale_factor: f64,
            logging: bool,
        ) -> c_int;

        pub fn fast_ctd_free_string(s: *mut c_char);
    }
}

/// Calls straight into the linked geometry library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

fn c_path(path: &Path) -> Result<CString> {
    let s = path.to_str().ok_or_else(|| {
        CtdError::InvalidParameter(format!("path is not valid UTF-8: {}", path.display()))
    })?;
    CString::new(s).map_err(|_| {
        CtdError::InvalidParameter(format!("path contains a NUL byte: {}", path.display()))
    })
}

fn check_status(operation: &'static str, status: c_int) -> Result<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(CtdError::BackendFailed {
            operation,
            code: status,
        })
    }
}

impl GeometryBackend for NativeBackend {
    fn step_to_brep(&self, request: &StepToBrepRequest<'_>) -> Result<Vec<String>> {
        let input = c_path(request.input)?;
        let output = c_path(request.output)?;
        let settings = request.settings;
        let mut components: *mut c_char = std::ptr::null_mut();

        // SAFETY: both strings are NUL-terminated and outlive the call; the
        // library only writes `components` on success.
        let status = unsafe {
            sys::fast_ctd_step_to_brep(
                input.as_ptr(),
                output.as_ptr(),
                settings.minimum_volume,
                settings.check_geometry,
                settings.fix_geometry,
                settings.enable_logging,
                &mut components,
            )
        };
        check_status("step_to_brep", status)?;

        if components.is_null() {
            return Err(CtdError::UnexpectedBackendOutput(
                "step_to_brep returned no component records".to_string(),
            ));
        }

        // SAFETY: non-null and owned by us until handed back to the library.
        let text = unsafe { CStr::from_ptr(components) }
            .to_string_lossy()
            .into_owned();
        // SAFETY: allocated by the library, freed once, not used afterwards.
        unsafe { sys::fast_ctd_free_string(components) };

        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn merge(&self, request: &MergeRequest<'_>) -> Result<()> {
        let input = c_path(request.input)?;
        let output = c_path(request.output)?;

        // SAFETY: NUL-terminated strings that outlive the call.
        let status = unsafe {
            sys::fast_ctd_merge(
                input.as_ptr(),
                output.as_ptr(),
                request.settings.dist_tolerance,
                request.settings.enable_logging,
            )
        };
        check_status("merge", status)
    }

    fn facet(&self, request: &FacetRequest<'_>) -> Result<()> {
        let input = c_path(request.input)?;
        let output = c_path(request.output)?;
        let materials_csv = request.materials.to_temp_csv()?;
        let materials = c_path(materials_csv.path())?;
        let settings = request.settings;

        // SAFETY: NUL-terminated strings that outlive the call; the temp
        // file is kept until the call returns.
        let status = unsafe {
            sys::fast_ctd_facet(
                input.as_ptr(),
                output.as_ptr(),
                materials.as_ptr(),
                settings.lin_deflection_tol,
                settings.tol_is_absolute,
                settings.ang_deflection_tol,
                settings.scale_factor,
                settings.enable_logging,
            )
        };
        check_status("facet", status)
    }
}
