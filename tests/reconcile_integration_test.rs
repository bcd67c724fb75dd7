use async_trait::async_trait;
use depsync::core::PackageManager;
use depsync::{
    Action, ModuleRef, NpmDownloadsOracle, OutcomeStatus, Reconciler, Settings,
};
use httpmock::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct RecordingPackageManager {
    calls: Arc<Mutex<Vec<(Action, String, bool)>>>,
    failing: Vec<String>,
}

impl RecordingPackageManager {
    fn failing_on(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    async fn calls(&self) -> Vec<(Action, String, bool)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PackageManager for RecordingPackageManager {
    async fn apply(&self, action: Action, name: &str, dev: bool) -> bool {
        self.calls
            .lock()
            .await
            .push((action, name.to_string(), dev));
        !self.failing.iter().any(|n| n == name)
    }
}

fn write_project(root: &Path, manifest: &str, files: &[(&str, &str)]) {
    fs::write(root.join("package.json"), manifest).unwrap();
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn oracle_for(server: &MockServer) -> NpmDownloadsOracle {
    NpmDownloadsOracle::new(server.url("/last-month"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_missing_module_is_installed() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{"dependencies": {"lodash": "*"}}"#,
        &[(
            "index.js",
            "const _ = require(\"lodash\");\nconst chalk = require(\"chalk\");\n",
        )],
    );

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    assert_eq!(report.diff.to_install, vec![ModuleRef::prod("chalk")]);
    assert!(report.diff.to_remove.is_empty());
    assert_eq!(
        pm.calls().await,
        vec![(Action::Install, "chalk".to_string(), false)]
    );
    assert_eq!(report.count(OutcomeStatus::Applied), 1);
}

#[tokio::test]
async fn test_in_sync_project_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{"dependencies": {"express": "^4"}, "devDependencies": {"mocha": "*"}}"#,
        &[
            ("src/server.js", "const express = require('express');"),
            ("test/server.js", "const mocha = require('mocha');\nrequire('../src/server');"),
        ],
    );

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    assert!(report.diff.is_clean());
    assert!(report.outcomes.is_empty());
    assert!(pm.calls().await.is_empty());
}

#[tokio::test]
async fn test_unused_dependency_is_removed_with_its_section_flag() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{"dependencies": {"express": "*", "left-pad": "*"}, "devDependencies": {"jest": "*"}}"#,
        &[("index.js", "require('express');")],
    );

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    assert_eq!(
        report.diff.to_remove,
        vec![ModuleRef::prod("left-pad"), ModuleRef::dev("jest")]
    );
    assert_eq!(
        pm.calls().await,
        vec![
            (Action::Uninstall, "left-pad".to_string(), false),
            (Action::Uninstall, "jest".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn test_test_file_usage_installs_as_dev() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        "{}",
        &[("lib/util.test.js", "const assert = require('assert');\nconst chai = require('chai');")],
    );

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    reconciler.run().await.unwrap();

    assert_eq!(
        pm.calls().await,
        vec![(Action::Install, "chai".to_string(), true)]
    );
}

#[tokio::test]
async fn test_failure_does_not_abort_batch() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{"dependencies": {"unused": "*"}}"#,
        &[("index.js", "require('broken'); require('works');")],
    );

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::failing_on(&["broken"]);
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    assert_eq!(pm.calls().await.len(), 3);
    let statuses: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| (o.module.name.as_str(), o.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("broken", OutcomeStatus::Failed),
            ("works", OutcomeStatus::Applied),
            ("unused", OutcomeStatus::Applied),
        ]
    );
    assert!(report.has_failures());
}

#[tokio::test]
async fn test_secure_mode_skips_unpopular_module() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        "{}",
        &[("index.js", "require('express'); require('tiny-unknown');")],
    );

    let server = MockServer::start_async().await;
    let popular = server
        .mock_async(|when, then| {
            when.method(GET).path("/last-month/express");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"downloads": 150_000_000, "package": "express"}));
        })
        .await;
    let unpopular = server
        .mock_async(|when, then| {
            when.method(GET).path("/last-month/tiny-unknown");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"downloads": 37, "package": "tiny-unknown"}));
        })
        .await;

    let mut settings = Settings::new(dir.path());
    settings.secure = true;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(settings, pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    popular.assert_async().await;
    unpopular.assert_async().await;
    assert_eq!(
        pm.calls().await,
        vec![(Action::Install, "express".to_string(), false)]
    );
    let skipped: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.status == OutcomeStatus::Untrusted)
        .map(|o| o.module.name.clone())
        .collect();
    assert_eq!(skipped, vec!["tiny-unknown"]);
}

#[tokio::test]
async fn test_secure_mode_fails_closed_when_oracle_errors() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), "{}", &[("index.js", "require('chalk');")]);

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/last-month/chalk");
            then.status(503);
        })
        .await;

    let mut settings = Settings::new(dir.path());
    settings.secure = true;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(settings, pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    assert!(pm.calls().await.is_empty());
    assert_eq!(report.outcomes[0].status, OutcomeStatus::Untrusted);
}

#[tokio::test]
async fn test_removals_skip_trust_gate() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), r#"{"dependencies": {"old-thing": "*"}}"#, &[]);

    let server = MockServer::start_async().await;
    let any_call = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(serde_json::json!({"downloads": 0}));
        })
        .await;

    let mut settings = Settings::new(dir.path());
    settings.secure = true;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(settings, pm.clone(), oracle_for(&server));

    reconciler.run().await.unwrap();

    any_call.assert_hits_async(0).await;
    assert_eq!(
        pm.calls().await,
        vec![(Action::Uninstall, "old-thing".to_string(), false)]
    );
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{"dependencies": {"unused": "*"}}"#,
        &[("index.js", "require('chalk');")],
    );

    let server = MockServer::start_async().await;
    let any_call = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(serde_json::json!({"downloads": 0}));
        })
        .await;

    let mut settings = Settings::new(dir.path());
    settings.secure = true;
    settings.dry_run = true;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(settings, pm.clone(), oracle_for(&server));

    let report = reconciler.run().await.unwrap();

    any_call.assert_hits_async(0).await;
    assert!(pm.calls().await.is_empty());
    assert_eq!(report.count(OutcomeStatus::Planned), 2);
}

#[tokio::test]
async fn test_invalid_manifest_aborts_run() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), "{ \"dependencies\": ", &[("index.js", "require('chalk');")]);

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    let err = reconciler.run().await.unwrap_err();

    assert!(matches!(err, depsync::DepsyncError::ManifestParseError { .. }));
    assert!(pm.calls().await.is_empty());
}

#[tokio::test]
async fn test_node_modules_is_not_scanned() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{"dependencies": {"express": "*"}}"#,
        &[
            ("index.js", "require('express');"),
            ("node_modules/express/index.js", "require('body-parser');"),
        ],
    );

    let server = MockServer::start_async().await;
    let pm = RecordingPackageManager::default();
    let reconciler = Reconciler::new(Settings::new(dir.path()), pm.clone(), oracle_for(&server));

    let report = reconciler.plan().await.unwrap();

    assert_eq!(report.scan.files_scanned, 1);
    assert!(report.diff.is_clean());
}
