// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rstest::{fixture, rstest};
use tempfile::TempDir;

// d1 lists the compulsory module m1 in its core list.
const DRIFTED_SNAPSHOT: &str = r#"{
  "departments": [{ "id": "d1", "name": "Guest Services", "coreModuleIds": ["m1"] }],
  "roles": [{ "id": "r1", "name": "Usher", "departmentId": "d1" }],
  "modules": [{ "id": "m1", "title": "Safe Sanctuary Basics", "chapters": [] }],
  "learners": [{ "id": "v1", "fullName": "John Smith", "roleIds": ["r1"] }]
}
"#;

struct CliCtx {
    tmp: TempDir,
    snapshot: PathBuf,
}

#[fixture]
fn ctx() -> CliCtx {
    let tmp = tempfile::tempdir().expect("tempdir");
    let snapshot = tmp.path().join("portal.json");
    fs::write(&snapshot, DRIFTED_SNAPSHOT).expect("write snapshot");
    CliCtx { tmp, snapshot }
}

fn pathwise(dir: &Path, snapshot: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pathwise"))
        .current_dir(dir)
        .env_remove("PATHWISE_CONFIG")
        .env_remove("PATHWISE_SNAPSHOT")
        .env_remove("RUST_LOG")
        .arg("--snapshot")
        .arg(snapshot)
        .args(args)
        .output()
        .expect("run pathwise")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[rstest]
fn audit_reports_drift_in_the_file_and_leaves_it_alone(ctx: CliCtx) {
    let output = pathwise(ctx.tmp.path(), &ctx.snapshot, &["audit"]);

    assert_eq!(output.status.code(), Some(1), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("compulsory module m1 is listed by department d1"));
    assert_eq!(
        fs::read_to_string(&ctx.snapshot).expect("read"),
        DRIFTED_SNAPSHOT
    );
}

#[rstest]
fn repair_writes_the_fixed_store_back(ctx: CliCtx) {
    let output = pathwise(ctx.tmp.path(), &ctx.snapshot, &["repair"]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("repaired 1 violation(s)"));

    let raw = fs::read_to_string(&ctx.snapshot).expect("read");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["departments"][0]["coreModuleIds"], serde_json::json!([]));

    let output = pathwise(ctx.tmp.path(), &ctx.snapshot, &["audit"]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("no invariant violations"));
}

#[rstest]
fn progress_reads_the_snapshot(ctx: CliCtx) {
    let output = pathwise(ctx.tmp.path(), &ctx.snapshot, &["progress", "v1"]);
    assert!(output.status.success());
    // m1 has no chapters, so it counts as done.
    assert_eq!(stdout(&output).trim(), "1/1 modules (100%)");
}
