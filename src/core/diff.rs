use crate::domain::model::{DeclaredSet, DiffResult, ModuleRef, UsedSet};
use std::collections::HashSet;

/// `a \ b`, comparing by name only.
///
/// The `dev` flag is ignored when testing presence: a production dependency satisfies a
/// test-only usage and the other way round. Entries keep the flag they had in `a`.
pub fn diff(a: &[ModuleRef], b: &[ModuleRef]) -> Vec<ModuleRef> {
    let present: HashSet<&str> = b.iter().map(|m| m.name.as_str()).collect();
    let mut emitted: HashSet<(&str, bool)> = HashSet::new();
    let mut missing = Vec::new();

    for module in a {
        if present.contains(module.name.as_str()) {
            continue;
        }
        if emitted.insert((module.name.as_str(), module.dev)) {
            missing.push(module.clone());
        }
    }

    missing
}

pub fn compute(used: &UsedSet, declared: &DeclaredSet) -> DiffResult {
    let declared = declared.to_refs();
    DiffResult {
        to_install: diff(used.modules(), &declared),
        to_remove: diff(&declared, used.modules()),
    }
}
