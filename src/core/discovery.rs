use crate::utils::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Test-only context: references found here are dev dependencies.
    pub dev: bool,
}

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub dev_dirs: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string()],
            exclude_dirs: vec!["node_modules".to_string()],
            dev_dirs: ["test", "tests", "__tests__", "spec", "__mocks__"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Walks `root` and returns matching source files sorted by path.
///
/// Any error reported by the walker (unreadable directory, broken root) aborts discovery.
pub fn discover(root: &Path, options: &DiscoveryOptions) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // 根目錄本身不過濾
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_excluded(entry.file_name(), &options.exclude_dirs)
        });

    for entry in walker {
        let entry = entry?;
        if entry.path_is_symlink() {
            // 不追蹤符號連結
            tracing::debug!("Skipping symlink {}", entry.path().display());
            continue;
        }
        if !entry.file_type().is_file() || !has_extension(entry.path(), &options.extensions) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let dev = is_dev_context(relative, options);
        files.push(SourceFile {
            path: entry.into_path(),
            dev,
        });
    }

    tracing::debug!("Discovered {} source files under {}", files.len(), root.display());
    Ok(files)
}

fn is_excluded(name: &OsStr, exclude_dirs: &[String]) -> bool {
    name.to_str()
        .map(|n| exclude_dirs.iter().any(|d| d == n))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e == ext))
        .unwrap_or(false)
}

fn is_dev_context(relative: &Path, options: &DiscoveryOptions) -> bool {
    let mut components: Vec<&str> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    let file_name = components.pop().unwrap_or_default();
    if components
        .iter()
        .any(|dir| options.dev_dirs.iter().any(|d| d == dir))
    {
        return true;
    }

    options.extensions.iter().any(|ext| {
        file_name.ends_with(&format!(".test.{}", ext)) || file_name.ends_with(&format!(".spec.{}", ext))
    })
}
