use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn mesh_info_prints_geometry_statistics() {
    let mut cmd = Command::cargo_bin("globe-viewer").expect("binary exists");
    cmd.arg("--mesh-info").arg("--resolution").arg("8");
    cmd.assert()
        .success()
        .stdout(contains("Sphere resolution 8"))
        .stdout(contains("64 vertices"))
        .stdout(contains("98 triangles"))
        .stdout(contains("294 indices"));
}

#[test]
fn mesh_info_handles_degenerate_resolution() {
    let mut cmd = Command::cargo_bin("globe-viewer").expect("binary exists");
    cmd.arg("--mesh-info").arg("--resolution").arg("1");
    cmd.assert()
        .success()
        .stdout(contains("0 vertices"))
        .stdout(contains("0 triangles"));
}

#[test]
fn rejects_unknown_flags() {
    let mut cmd = Command::cargo_bin("globe-viewer").expect("binary exists");
    cmd.arg("--bogus");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --bogus"));
}

#[test]
fn rejects_non_numeric_resolution() {
    let mut cmd = Command::cargo_bin("globe-viewer").expect("binary exists");
    cmd.arg("--mesh-info").arg("--resolution").arg("many");
    cmd.assert()
        .failure()
        .stderr(contains("invalid resolution: many"));
}
