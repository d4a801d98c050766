use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn body_lines(stdout: &[u8]) -> Vec<String> {
    let text = String::from_utf8(stdout.to_vec()).unwrap();
    let (_, body) = text.split_once("end_header\n").unwrap();
    body.lines().map(str::to_string).collect()
}

#[test]
fn two_by_two_with_hole() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 2\nnrows 2\nNODATA_value -9999\n1.0 2.0\n3.0 -9999\n")
        .unwrap();

    let output = Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ply\nformat ascii 1.0\n"))
        .stdout(predicate::str::contains("element vertex 3\n"))
        .stdout(predicate::str::contains("element face 0\n"))
        .stdout(predicate::str::contains("property uchar red").not())
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        body_lines(&output),
        vec![
            "0.0000000000000000 -0.0000000000000000 1.0000000000000000",
            "0.0000000000000000 -1.0000000000000000 2.0000000000000000",
            "1.0000000000000000 -0.0000000000000000 3.0000000000000000",
        ]
    );
}

#[test]
fn flat_three_by_three() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 3\nnrows 3\n0 0 0\n0 0 0\n0 0 0\n").unwrap();

    let output = Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("element vertex 9\n"))
        .stdout(predicate::str::contains("element face 4\n"))
        .get_output()
        .stdout
        .clone();

    let lines = body_lines(&output);
    assert_eq!(lines.len(), 13);
    for face in &lines[9..] {
        let ids: Vec<usize> = face.split(' ').map(|t| t.parse().unwrap()).collect();
        assert_eq!(ids[0], 4);
        assert!(ids[1..].iter().all(|&i| i < 9));
    }
}

#[test]
fn resolution_option() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 3\nnrows 1\n5 5 5\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([file.path().to_str().unwrap(), "-r", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0.0000000000000000 -1.0000000000000000 5.0000000000000000\n",
        ));
}

#[test]
fn gray_colors_are_replicated() {
    let dir = assert_fs::TempDir::new().unwrap();
    let dsm = dir.child("dsm.asc");
    dsm.write_str("ncols 2\nnrows 2\n1 1\n1 1\n").unwrap();
    let colors = dir.child("gray.png");
    image_gray(colors.path(), 2, 2, 128);

    let output = Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([
            dsm.path().to_str().unwrap(),
            "-k",
            colors.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("property uchar blue\n"))
        .get_output()
        .stdout
        .clone();

    let lines = body_lines(&output);
    assert_eq!(lines.len(), 5);
    for vertex in &lines[..4] {
        assert!(vertex.ends_with(" 128 128 128"), "{vertex}");
    }
    dir.close().unwrap();
}

#[test]
fn white_override() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 1\nnrows 1\n3\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([file.path().to_str().unwrap(), "-c", "WHITE"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "0.0000000000000000 -0.0000000000000000 3.0000000000000000 255 255 255\n",
        ));
}

#[test]
fn color_size_mismatch_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let dsm = dir.child("dsm.asc");
    dsm.write_str("ncols 2\nnrows 2\n1 1\n1 1\n").unwrap();
    let colors = dir.child("gray.png");
    image_gray(colors.path(), 3, 2, 0);

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([
            dsm.path().to_str().unwrap(),
            "-k",
            colors.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("size mismatch"));
    dir.close().unwrap();
}

#[test]
fn inert_filters_are_accepted() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 2\nnrows 2\n0 100\n0 0\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([
            file.path().to_str().unwrap(),
            "-f",
            "1",
            "-s",
            "100",
            "-i",
            "-l",
            "img.rpc",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("element face 1\n"));
}

#[test]
fn negative_filter_thresholds_parse() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 1\nnrows 1\n3\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([file.path().to_str().unwrap(), "-f", "-1", "-s", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("element vertex 1\n"));
}

#[test]
fn rpc_warning_with_white_override() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 1\nnrows 1\n3\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .env_remove("RUST_LOG")
        .args([
            file.path().to_str().unwrap(),
            "-c",
            "WHITE",
            "-l",
            "img.rpc",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("255 255 255"))
        .stderr(predicate::str::contains("RPC model img.rpc is not used"));
}

#[test]
fn unknown_height_format_fails() {
    let file = assert_fs::NamedTempFile::new("dsm.xyz").unwrap();
    file.write_str("1 2 3\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported raster format: .xyz"));
}

#[test]
fn wrong_argument_count_prints_usage() {
    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args(["a.asc", "b.asc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_resolution_fails() {
    let file = assert_fs::NamedTempFile::new("dsm.asc").unwrap();
    file.write_str("ncols 1\nnrows 1\n3\n").unwrap();

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([file.path().to_str().unwrap(), "-r", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resolution"));
}

#[test]
fn output_file_and_summary() {
    let dir = assert_fs::TempDir::new().unwrap();
    let dsm = dir.child("dsm.asc");
    dsm.write_str("ncols 3\nnrows 2\n1 2 3\n4 5 6\n").unwrap();
    let ply = dir.child("mesh.ply");
    let summary = dir.child("summary.json");

    Command::cargo_bin("dsm_mesh_cli")
        .unwrap()
        .args([
            dsm.path().to_str().unwrap(),
            "-o",
            ply.path().to_str().unwrap(),
            "--binary",
            "--summary",
            summary.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    ply.assert(predicate::path::exists());
    let bytes = std::fs::read(ply.path()).unwrap();
    assert!(bytes.starts_with(b"ply\nformat binary_little_endian 1.0\n"));
    summary.assert(predicate::str::contains("\"vertices\": 6"));
    summary.assert(predicate::str::contains("\"faces\": 2"));
    dir.close().unwrap();
}

fn image_gray(path: &std::path::Path, width: u32, height: u32, value: u8) {
    image::GrayImage::from_pixel(width, height, image::Luma([value]))
        .save(path)
        .unwrap();
}
