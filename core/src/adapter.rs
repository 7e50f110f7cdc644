//! Extension call adapter
//!
//! Validates paths, fills in defaults and forwards each geometry stage to a
//! [`GeometryBackend`]. No retries and no fallbacks: everything is checked
//! before the backend is touched, and backend failures are returned as is.

use std::path::Path;

use fast_ctd_shared::{CtdError, FileKind, Result, validate_file_extension, validate_input};

use crate::backend::{FacetRequest, GeometryBackend, MergeRequest, StepToBrepRequest};
use crate::logging::{LOG_TARGET, channel_span};
use crate::materials::MaterialsDef;
use crate::options::{FacetOptions, MergeOptions, StepToBrepOptions};

/// One component of a converted STEP model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentInfo {
    /// Group (assembly/material group) identifier
    pub group: String,
    /// Component name from the STEP model
    pub name: String,
}

/// Parse the backend's component records, keeping their order.
///
/// A record is `"<group>,<name>"`, optionally followed by more
/// comma-separated fields (volume, colour, material, density) which are
/// ignored here.
pub fn parse_component_records(records: &[String]) -> Result<Vec<ComponentInfo>> {
    records
        .iter()
        .map(|record| {
            let mut fields = record.split(',');
            match (fields.next(), fields.next()) {
                (Some(group), Some(name)) => Ok(ComponentInfo {
                    group: group.trim().to_string(),
                    name: name.trim().to_string(),
                }),
                _ => Err(CtdError::UnexpectedBackendOutput(format!(
                    "component record {:?} is not of the form \"group,name[,...]\"",
                    record
                ))),
            }
        })
        .collect()
}

fn ensure_written(operation: &str, output: &Path) -> Result<()> {
    if output.exists() {
        return Ok(());
    }
    Err(CtdError::UnexpectedBackendOutput(format!(
        "{} reported success but did not write {}",
        operation,
        output.display()
    )))
}

/// Validating front end for a [`GeometryBackend`].
pub struct GeometryAdapter<B> {
    backend: B,
    span: tracing::Span,
}

impl<B: GeometryBackend> GeometryAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            span: channel_span(),
        }
    }

    /// Emit this adapter's log events inside `span`.
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Convert a STEP file into a BREP file.
    ///
    /// Returns the model's components in geometry order.
    ///
    /// # Errors
    /// - extension error unless `input` is `.stp`/`.step` and `output` is `.brep`
    /// - not-found if `input` does not exist
    /// - invalid parameter if `minimum_volume` is negative
    /// - [`CtdError::UnexpectedBackendOutput`] if the backend's component
    ///   records are malformed
    pub fn convert_step_to_brep(
        &self,
        input: &Path,
        output: &Path,
        options: &StepToBrepOptions,
    ) -> Result<Vec<ComponentInfo>> {
        let _entered = self.span.enter();

        validate_input(input, FileKind::Step)?;
        validate_file_extension(output, FileKind::Brep)?;
        let settings = options.resolve()?;

        let records = self.backend.step_to_brep(&StepToBrepRequest {
            input,
            output,
            settings,
        })?;
        let components = parse_component_records(&records)?;
        ensure_written("step_to_brep", output)?;

        tracing::info!(
            target: LOG_TARGET,
            output_file = %output.display(),
            components = components.len(),
            "step_to_brep finished"
        );
        Ok(components)
    }

    /// Merge coincident geometry of a BREP into a new BREP file.
    pub fn merge_brep_geometries(
        &self,
        input: &Path,
        output: &Path,
        options: &MergeOptions,
    ) -> Result<()> {
        let _entered = self.span.enter();

        validate_input(input, FileKind::Brep)?;
        validate_file_extension(output, FileKind::Brep)?;
        let settings = options.resolve()?;

        self.backend.merge(&MergeRequest {
            input,
            output,
            settings,
        })?;
        ensure_written("merge", output)?;

        tracing::info!(
            target: LOG_TARGET,
            output_file = %output.display(),
            "merge_brep_geometries finished"
        );
        Ok(())
    }

    /// Facet a BREP into a DAGMC `.h5m` model with materials assigned.
    ///
    /// `components` is the list returned by [`Self::convert_step_to_brep`];
    /// it orders a material mapping and sanity checks list lengths. Pass an
    /// empty slice when it is not available.
    pub fn facet_brep_to_dagmc(
        &self,
        input: &Path,
        output: &Path,
        materials: &MaterialsDef,
        components: &[ComponentInfo],
        options: &FacetOptions,
    ) -> Result<()> {
        let _entered = self.span.enter();

        validate_input(input, FileKind::Brep)?;
        validate_file_extension(output, FileKind::Dagmc)?;
        materials.validate()?;
        let materials = materials.resolve(components)?;
        let settings = options.resolve();

        self.backend.facet(&FacetRequest {
            input,
            output,
            materials: &materials,
            settings,
        })?;
        ensure_written("facet", output)?;

        tracing::info!(
            target: LOG_TARGET,
            output_file = %output.display(),
            materials = materials.len(),
            "facet_brep_to_dagmc finished"
        );
        Ok(())
    }
}
