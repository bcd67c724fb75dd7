use crate::domain::model::{ModuleRef, UsedSet};
use std::collections::HashSet;

/// Merges module references into a [`UsedSet`].
///
/// Each name is kept once per partition, first occurrence wins. Development references come
/// first in the output, but callers should treat the result as a set.
pub fn dedup<I>(refs: I) -> UsedSet
where
    I: IntoIterator<Item = ModuleRef>,
{
    let mut seen: HashSet<(String, bool)> = HashSet::new();
    let mut dev = Vec::new();
    let mut prod = Vec::new();

    for module in refs {
        if !seen.insert((module.name.clone(), module.dev)) {
            continue;
        }
        if module.dev {
            dev.push(module);
        } else {
            prod.push(module);
        }
    }

    dev.extend(prod);
    UsedSet::from_unique(dev)
}
