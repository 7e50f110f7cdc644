//! Fake toolchain for integration tests
//!
//! Each fake tool is a tiny shell script that records its arguments and
//! prints a canned report.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const LEAKY_REPORT: &str = "\
The following surfaces are leaky:
number of leaky surfaces: 4/96 (4.1667%)
number of leaky volumes: 2/2 (100%)";

pub const TIGHT_REPORT: &str = "\
number of leaky surfaces: 0/96 (0.0%)
number of leaky volumes: 0/2 (0%)";

/// Write an executable `name` into `dir` running `body` under /bin/sh.
///
/// Every invocation appends its arguments, one per line, to `<name>.args`.
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let args_file = dir.join(format!("{}.args", name));
    let script = format!(
        "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\" >> '{}'; done\n{}\n",
        args_file.display(),
        body
    );
    std::fs::write(&path, script).expect("Failed to write fake tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake tool executable");
    path
}

/// Arguments of every invocation of `name`, flattened.
pub fn recorded_args(dir: &Path, name: &str) -> Vec<String> {
    std::fs::read_to_string(dir.join(format!("{}.args", name)))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

/// `make_watertight` stand-in: copies the input to the `-o` path and prints
/// `report`.
pub fn fake_make_watertight(dir: &Path, report: &str) -> PathBuf {
    fake_tool(
        dir,
        "make_watertight",
        &format!("cp \"$1\" \"$3\"\ncat <<'EOF'\n{}\nEOF", report),
    )
}

pub fn touch(path: &Path) {
    std::fs::write(path, b"fixture").expect("Failed to write fixture");
}
