use crate::domain::model::DeclaredSet;
use crate::utils::error::{DepsyncError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";

/// Only the dependency keys matter; version specifiers are kept as raw JSON and ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    dev_dependencies: Option<BTreeMap<String, serde_json::Value>>,
}

pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(MANIFEST_FILE)
}

/// 讀取 package.json 的 dependencies / devDependencies
pub fn read_manifest(project_root: &Path) -> Result<DeclaredSet> {
    let path = manifest_path(project_root);
    let content = std::fs::read_to_string(&path)?;
    parse_manifest(&content, &path)
}

pub fn parse_manifest(content: &str, path: &Path) -> Result<DeclaredSet> {
    let parse_error = |source: serde_json::Error| DepsyncError::ManifestParseError {
        path: path.to_path_buf(),
        source,
    };

    // 頂層必須是物件，陣列也能被 serde 解成 struct
    let value: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
    if !value.is_object() {
        return Err(parse_error(serde::de::Error::custom(
            "package.json must contain a JSON object",
        )));
    }
    let manifest: PackageManifest = serde_json::from_value(value).map_err(parse_error)?;

    let declared = DeclaredSet {
        production: manifest
            .dependencies
            .map(|deps| deps.into_keys().collect())
            .unwrap_or_default(),
        development: manifest
            .dev_dependencies
            .map(|deps| deps.into_keys().collect())
            .unwrap_or_default(),
    };

    tracing::debug!(
        "Manifest {} declares {} dependencies and {} devDependencies",
        path.display(),
        declared.production.len(),
        declared.development.len()
    );
    Ok(declared)
}
