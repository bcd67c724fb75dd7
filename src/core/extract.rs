//! Finds `require("...")` references in JavaScript source text.
//!
//! Only calls whose sole argument is a quoted string literal are recognised. Computed arguments
//! such as `require(name)` or `require("a" + b)` are skipped without error, as are ES module
//! `import` statements.

use regex::Regex;
use std::sync::LazyLock;

static REQUIRE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\brequire\s*\(\s*(?:'([^'\n]*)'|"([^"\n]*)")\s*\)"#)
        .expect("require pattern is a valid regex")
});

static MODULE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-_]+$").expect("module name pattern is a valid regex"));

/// Lazily yields the literal argument of every `require` call in `source`.
pub fn extract_references(source: &str) -> impl Iterator<Item = &str> + '_ {
    REQUIRE_CALL.captures_iter(source).filter_map(|caps| {
        // 單引號或雙引號，兩者擇一
        caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().trim())
    })
}

/// True when `name` has the shape of an unscoped registry module name.
///
/// Scoped packages (`@scope/pkg`) and sub-path requires (`lodash/fp`) are rejected.
pub fn is_valid(name: &str) -> bool {
    MODULE_NAME.is_match(name)
}
