use serde::{Deserialize, Serialize};
use std::fmt;

/// A registry module referenced by the project, tagged with the context it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleRef {
    pub name: String,
    pub dev: bool,
}

impl ModuleRef {
    pub fn new(name: impl Into<String>, dev: bool) -> Self {
        Self {
            name: name.into(),
            dev,
        }
    }

    pub fn prod(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn dev(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dev {
            write!(f, "{} (dev)", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Dependency names declared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredSet {
    pub production: Vec<String>,
    pub development: Vec<String>,
}

impl DeclaredSet {
    pub fn to_refs(&self) -> Vec<ModuleRef> {
        self.production
            .iter()
            .map(ModuleRef::prod)
            .chain(self.development.iter().map(ModuleRef::dev))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.production.len() + self.development.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Modules found by scanning, unique per `(name, dev)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedSet {
    modules: Vec<ModuleRef>,
}

impl UsedSet {
    /// Callers must pass deduplicated input; see `core::dedup::dedup`.
    pub(crate) fn from_unique(modules: Vec<ModuleRef>) -> Self {
        Self { modules }
    }

    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub to_install: Vec<ModuleRef>,
    pub to_remove: Vec<ModuleRef>,
}

impl DiffResult {
    pub fn is_clean(&self) -> bool {
        self.to_install.is_empty() && self.to_remove.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Install,
    Uninstall,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Install => f.write_str("install"),
            Action::Uninstall => f.write_str("uninstall"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Applied,
    Failed,
    /// Install withheld because the popularity check did not pass.
    Untrusted,
    /// Dry run: the action was computed but not executed.
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub module: ModuleRef,
    pub action: Action,
    pub status: OutcomeStatus,
}

/// Counters from the scanning stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub used: UsedSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub scan: ScanSummary,
    pub declared: DeclaredSet,
    pub diff: DiffResult,
    pub outcomes: Vec<ActionOutcome>,
}

impl RunReport {
    pub fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.count(OutcomeStatus::Failed) > 0
    }
}
