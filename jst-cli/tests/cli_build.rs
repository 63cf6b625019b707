use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn jst_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jst"));
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

const CONFIG: &str = "\
targets:
  - name: app
    dest: build/templates.js
    src:
      - templates/*.html
      - templates/missing.html
    options:
      namespace: App.Templates
      process_name:
        strip_prefix: templates/
        strip_extension: true
";

#[test]
fn build_writes_destination_and_warns_on_missing_source() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "jst.yaml", CONFIG);
    write(dir.path(), "templates/user.html", "<b><%- user.name %></b>");

    jst_cmd(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(contains("'app' written (1 template)"))
        .stderr(contains("Source file templates/missing.html not found."));

    let output = fs::read_to_string(dir.path().join("build/templates.js")).expect("output");
    assert!(output.starts_with("this[\"App\"] = this[\"App\"] || {};\n"));
    assert!(output.contains("this[\"App\"][\"Templates\"][\"user\"] = function(obj) {"));
}

#[test]
fn second_build_reports_unchanged() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "jst.yaml", CONFIG);
    write(dir.path(), "templates/user.html", "<b><%- user.name %></b>");

    jst_cmd(dir.path()).arg("build").assert().success();
    jst_cmd(dir.path())
        .args(["build", "app"])
        .assert()
        .success()
        .stdout(contains("'app' unchanged"));
}

#[test]
fn compile_failure_exits_non_zero_and_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "jst.yaml", CONFIG);
    write(dir.path(), "templates/a.html", "<p>fine</p>");
    write(dir.path(), "templates/b.html", "<% if (open) { %>");

    jst_cmd(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(contains("JST \"templates/b.html\" failed to compile"));
    assert!(!dir.path().join("build/templates.js").exists());
}

#[test]
fn dry_run_reports_and_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "jst.yaml", CONFIG);
    write(dir.path(), "templates/user.html", "<b>hi</b>");

    jst_cmd(dir.path())
        .args(["build", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]").and(contains("would write")));
    assert!(!dir.path().join("build").exists());
}

#[test]
fn unknown_target_fails() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "jst.yaml", CONFIG);

    jst_cmd(dir.path())
        .args(["build", "nope"])
        .assert()
        .failure()
        .stderr(contains("nope"));
}

#[test]
fn empty_sources_warn_and_succeed() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "jst.yaml", CONFIG);

    jst_cmd(dir.path())
        .arg("build")
        .assert()
        .success()
        .stderr(contains("not written because compiled files were empty"));
    assert!(!dir.path().join("build/templates.js").exists());
}

#[test]
fn compile_command_without_project_file() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "one.html", "<%= x %>");

    jst_cmd(dir.path())
        .args(["compile", "one.html", "--dest", "out.js", "--no-namespace", "--amd"])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.js")).expect("output");
    assert!(output.starts_with("define(function(){\n\nreturn function(obj) {"));
    assert!(output.ends_with("\n\n});"));
    assert!(!output.contains("JST"));
}

#[test]
fn no_namespace_requires_amd() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "one.html", "<%= x %>");

    jst_cmd(dir.path())
        .args(["compile", "one.html", "--dest", "out.js", "--no-namespace"])
        .assert()
        .failure();
    assert!(!dir.path().join("out.js").exists());
}
