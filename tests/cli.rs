// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn buddha() -> Command {
    Command::cargo_bin("buddha").unwrap()
}

const SMALL: &[&str] = &[
    "--width",
    "40",
    "--samples",
    "3000",
    "--band",
    "0,100",
    "--threads",
    "2",
    "--seed",
    "17",
];

#[test]
fn renders_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("buddha.png");
    buddha()
        .args(SMALL)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn renders_a_sixteen_bit_cubic_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cubic.png");
    buddha()
        .args(SMALL)
        .args(&["--fractal", "cubic", "--depth", "16", "--real=-1.5,1.5", "--imag=-1.5,1.5"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn renders_a_pgm_and_a_histogram_grid() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("buddha.pgm");
    let csv = dir.path().join("buddha.csv");
    buddha()
        .args(SMALL)
        .args(&["--imag=-1,1"])
        .arg("--output")
        .arg(&out)
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success();
    assert!(fs::read(&out).unwrap().starts_with(b"P5"));

    let grid = fs::read_to_string(&csv).unwrap();
    let rows: Vec<&str> = grid.lines().collect();
    assert_eq!(rows.len(), 20);
    for row in rows {
        let cells: Vec<u32> = row.split(',').map(|c| c.parse().unwrap()).collect();
        assert_eq!(cells.len(), 40);
        assert!(cells.iter().all(|&c| c <= 65_535));
    }
}

#[test]
fn inverted_band_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.png");
    buddha()
        .args(&["--band", "50,10", "--samples", "10"])
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("iteration band minimum"));
    assert!(!out.exists());
}

#[test]
fn degenerate_window_fails() {
    buddha()
        .args(&["--real=1,1", "--samples", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("real interval"));
}

#[test]
fn sixteen_bit_pgm_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    buddha()
        .args(&["--depth", "16", "--samples", "10"])
        .arg("--output")
        .arg(dir.path().join("deep.pgm"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("16-bit"));
}

#[test]
fn samples_and_density_conflict() {
    buddha()
        .args(&["--samples", "10", "--density", "0.5"])
        .assert()
        .failure();
}
