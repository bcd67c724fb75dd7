use crate::core::classify::registry_modules;
use crate::core::dedup::dedup;
use crate::core::discovery::{discover, DiscoveryOptions, SourceFile};
use crate::core::extract::{extract_references, is_valid};
use crate::domain::model::{ModuleRef, ScanSummary};
use crate::utils::error::Result;
use std::path::Path;

/// Registry modules referenced by a single file's text.
pub fn modules_in_source(source: &str, dev: bool) -> Vec<ModuleRef> {
    registry_modules(extract_references(source).filter(|name| is_valid(name)))
        .map(|name| ModuleRef::new(name, dev))
        .collect()
}

/// Scans every source file under `root` and builds the used-module set.
///
/// Files that cannot be read as UTF-8 text are logged and skipped; a failure while walking the
/// directory tree aborts the scan.
pub fn scan_project(root: &Path, options: &DiscoveryOptions) -> Result<ScanSummary> {
    let files = discover(root, options)?;
    let mut refs = Vec::new();
    let mut files_scanned = 0;
    let mut files_skipped = 0;

    for SourceFile { path, dev } in &files {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable file {}: {}", path.display(), e);
                files_skipped += 1;
                continue;
            }
        };

        let found = modules_in_source(&source, *dev);
        if !found.is_empty() {
            tracing::debug!("{}: {} module reference(s)", path.display(), found.len());
        }
        refs.extend(found);
        files_scanned += 1;
    }

    let used = dedup(refs);
    tracing::info!(
        "🔍 Scanned {} file(s), {} skipped, {} distinct module(s) in use",
        files_scanned,
        files_skipped,
        used.len()
    );

    Ok(ScanSummary {
        files_scanned,
        files_skipped,
        used,
    })
}
