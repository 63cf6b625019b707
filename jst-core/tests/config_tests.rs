//! Project file error-message, parsing, and source expansion tests.

use assert_fs::prelude::*;
use jst_core::{
    config::{self, CONFIG_FILE_NAME},
    ConfigError, Namespace,
};
use predicates::prelude::predicate;
use std::fs;
use std::path::PathBuf;

const FULL_CONFIG: &str = r#"
targets:
  - name: app
    dest: build/app.js
    src:
      - "templates/*.html"
      - "missing.html"
    options:
      namespace: App.Templates
      template_settings:
        interpolate: '\{\{(.+?)\}\}'
      process_name:
        strip_prefix: templates/
        strip_extension: true
      separator: "\n"
      prettify: true
  - name: amd
    dest: build/amd.js
    src: ["templates/one.html"]
    options:
      namespace: false
      amd: true
"#;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_config_returns_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = config::load_at(&dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
    assert!(matches!(err, ConfigError::ConfigNotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("config not found"));
    assert!(err.to_string().contains("jst.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(CONFIG_FILE_NAME);
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = config::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("jst.yaml"), "must contain file path, got: {err}");
}

#[test]
fn load_rejects_unknown_option() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(CONFIG_FILE_NAME);
    file.write_str("targets:\n  - name: a\n    dest: a.js\n    options:\n      pretify: true\n")
        .expect("write");

    let err = config::load_at(file.path()).unwrap_err();
    let source_msg = match &err {
        ConfigError::Parse { source, .. } => source.to_string(),
        other => panic!("expected parse error, got: {other}"),
    };
    assert!(source_msg.contains("pretify"), "got: {source_msg}");
}

#[test]
fn load_rejects_namespace_true() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(CONFIG_FILE_NAME);
    file.write_str("targets:\n  - name: a\n    dest: a.js\n    options:\n      namespace: true\n")
        .expect("write");

    let err = config::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn load_rejects_duplicate_target_names() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(CONFIG_FILE_NAME);
    file.write_str("targets:\n  - name: a\n    dest: a.js\n  - name: a\n    dest: b.js\n")
        .expect("write");

    let err = config::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateTarget { ref name } if name == "a"));
}

// ---------------------------------------------------------------------------
// 2. Parsing
// ---------------------------------------------------------------------------

#[test]
fn full_config_parses_into_options() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(CONFIG_FILE_NAME);
    file.write_str(FULL_CONFIG).expect("write");

    let project = config::load_at(file.path()).expect("load");
    assert_eq!(project.config.targets.len(), 2);

    let app = project.target("app").expect("app target");
    let opts = app.options.to_options();
    assert_eq!(opts.namespace, Namespace::Named("App.Templates".to_string()));
    assert_eq!(opts.separator, "\n");
    assert!(opts.prettify);
    assert_eq!(
        opts.template_settings.interpolate.as_deref(),
        Some(r"\{\{(.+?)\}\}")
    );
    assert_eq!(opts.process_name.apply("templates/users.html"), "users");

    let amd = project.target("amd").expect("amd target");
    assert_eq!(amd.options.namespace, Namespace::Disabled);
    assert!(amd.options.to_options().validate().expect("valid").is_none());
}

#[test]
fn unknown_target_lookup_fails() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(CONFIG_FILE_NAME);
    file.write_str(FULL_CONFIG).expect("write");

    let project = config::load_at(file.path()).expect("load");
    let err = project.target("nope").unwrap_err();
    assert!(err.to_string().contains("unknown target 'nope'"));
}

// ---------------------------------------------------------------------------
// 3. Save + source expansion
// ---------------------------------------------------------------------------

#[test]
fn save_writes_loadable_starter_config() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
    config::save_at(&path, &config::starter_config()).expect("save");

    dir.child("nested/jst.yaml").assert(predicate::path::exists());
    dir.child("nested/jst.yaml.tmp").assert(predicate::path::missing());
    let loaded = config::load_at(&path).expect("load");
    assert_eq!(loaded.config, config::starter_config());
}

#[test]
fn recursive_glob_expands_relative_to_base_dir() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("templates/users/list.html").write_str("<ul></ul>").unwrap();
    dir.child("templates/index.html").write_str("<p></p>").unwrap();
    dir.child("templates/readme.md").write_str("# no").unwrap();

    let sources =
        config::expand_sources(dir.path(), &["templates/**/*.html".to_string()]).expect("expand");
    assert_eq!(
        sources,
        vec![
            PathBuf::from("templates/index.html"),
            PathBuf::from("templates/users/list.html"),
        ]
    );
    assert!(fs::metadata(dir.path().join(&sources[0])).is_ok());
}
