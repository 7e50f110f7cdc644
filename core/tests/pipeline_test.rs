//! End-to-end STEP → DAGMC run against fake geometry and DAGMC tools

#![cfg(unix)]

mod common;

use common::{TIGHT_REPORT, fake_make_watertight, fake_tool, recorded_args, touch};
use fast_ctd::backend::CommandBackend;
use fast_ctd::{
    CtdError, FacetOptions, GeometryAdapter, MaterialsDef, StepToBrepOptions, TightnessVerdict,
    ToolRunner, Toolchain,
};
use tempfile::tempdir;

/// Geometry front ends that write their second argument.
fn fake_geometry_tools(dir: &std::path::Path) {
    fake_tool(
        dir,
        "occ_step_to_brep",
        "touch \"$2\"\necho '0,cube_1'\necho '0,cube_2'\necho '1,cube_3'",
    );
    fake_tool(dir, "occ_merger", "touch \"$2\"");
    // Keep a copy of the materials hand-over file before it is deleted.
    fake_tool(
        dir,
        "occ_faceter",
        &format!("cp \"$4\" '{}'\ntouch \"$2\"", dir.join("materials.seen").display()),
    );
}

#[test]
fn test_tools_output_existence_checks() {
    let dir = tempdir().expect("Failed to create temp dir");
    fake_geometry_tools(dir.path());
    fake_make_watertight(dir.path(), TIGHT_REPORT);
    fake_tool(dir.path(), "mbconvert", "touch \"$4\"");

    let step = dir.path().join("test_cubes.stp");
    let mats = dir.path().join("test_cubes-mats.csv");
    let brep = dir.path().join("test_cubes.brep");
    let merged = dir.path().join("test_cubes-merged.brep");
    let nwt = dir.path().join("test_cubes-nwt.h5m");
    let wt = dir.path().join("test_cubes.h5m");
    let vtk = dir.path().join("test_cubes.vtk");
    touch(&step);
    std::fs::write(&mats, "iron\ncopper\nwater\n").unwrap();

    let toolchain = Toolchain::in_dir(dir.path());
    let adapter = GeometryAdapter::new(CommandBackend::new(toolchain.clone()));

    let components = adapter
        .convert_step_to_brep(&step, &brep, &StepToBrepOptions::default())
        .unwrap();
    assert!(brep.exists(), "BREP file was not created");
    let names: Vec<&str> = components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["cube_1", "cube_2", "cube_3"]);
    assert_eq!(
        recorded_args(dir.path(), "occ_step_to_brep"),
        vec![
            step.display().to_string(),
            brep.display().to_string(),
            "--minimum-volume".to_string(),
            "1".to_string(),
            "--check-geometry".to_string(),
        ]
    );

    adapter
        .merge_brep_geometries(&brep, &merged, &Default::default())
        .unwrap();
    assert!(merged.exists(), "Merged BREP file was not created");
    assert_eq!(
        recorded_args(dir.path(), "occ_merger")[2..],
        ["--tolerance".to_string(), "0.001".to_string()]
    );

    let facet_options = FacetOptions {
        tol_is_absolute: Some(true),
        ..Default::default()
    };
    adapter
        .facet_brep_to_dagmc(
            &merged,
            &nwt,
            &MaterialsDef::CsvFile(mats),
            &components,
            &facet_options,
        )
        .unwrap();
    assert!(nwt.exists(), "DAGMC file was not created");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("materials.seen")).unwrap(),
        "iron\ncopper\nwater\n"
    );
    let facet_args = recorded_args(dir.path(), "occ_faceter");
    assert!(facet_args.contains(&"--tol-is-absolute".to_string()));
    assert!(!facet_args.contains(&"--logging".to_string()));

    let runner = ToolRunner::new(toolchain);
    let repaired = runner.make_watertight(&nwt, Some(&wt)).unwrap();
    assert!(repaired.success());
    assert_eq!(
        TightnessVerdict::of_report(&repaired.stdout),
        TightnessVerdict::Watertight
    );

    let converted = runner.convert_mesh_format(&wt, &vtk).unwrap();
    assert!(converted.success());
    assert!(vtk.exists(), "DAGMC VTK file was not created");
}

#[test]
fn test_geometry_tool_failure_is_backend_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    fake_tool(dir.path(), "occ_merger", "echo 'bad shape' >&2\nexit 1");
    let brep = dir.path().join("model.brep");
    touch(&brep);

    let adapter = GeometryAdapter::new(CommandBackend::new(Toolchain::in_dir(dir.path())));
    let err = adapter
        .merge_brep_geometries(&brep, &dir.path().join("merged.brep"), &Default::default())
        .unwrap_err();
    assert!(matches!(
        err,
        CtdError::BackendFailed {
            operation: "merge",
            code: 1
        }
    ));
}

#[test]
fn test_malformed_component_records() {
    let dir = tempdir().expect("Failed to create temp dir");
    fake_tool(dir.path(), "occ_step_to_brep", "touch \"$2\"\necho 'no comma here'");
    let step = dir.path().join("model.step");
    touch(&step);

    let adapter = GeometryAdapter::new(CommandBackend::new(Toolchain::in_dir(dir.path())));
    let err = adapter
        .convert_step_to_brep(&step, &dir.path().join("model.brep"), &Default::default())
        .unwrap_err();
    assert!(matches!(err, CtdError::UnexpectedBackendOutput(_)));
}

#[test]
fn test_missing_geometry_tool_is_not_found() {
    let dir = tempdir().expect("Failed to create temp dir");
    let step = dir.path().join("model.step");
    let brep = dir.path().join("model.brep");
    touch(&step);

    let adapter = GeometryAdapter::new(CommandBackend::new(Toolchain::in_dir(dir.path())));
    let err = adapter
        .convert_step_to_brep(&step, &brep, &Default::default())
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!brep.exists());
}
