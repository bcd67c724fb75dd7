use std::collections::HashSet;
use std::sync::LazyLock;

/// Modules shipped with the Node.js runtime.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

static BUILTINS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NODE_BUILTINS.iter().copied().collect());

const RELATIVE_PREFIXES: &[&str] = &["./", "../", "/"];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(name)
}

pub fn is_local_path(name: &str) -> bool {
    name == "." || name == ".." || RELATIVE_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Keeps only names that refer to installable registry modules.
pub fn registry_modules<'a, I>(candidates: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|name| !is_builtin(name) && !is_local_path(name))
}
