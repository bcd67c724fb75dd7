// Adapters layer: concrete implementations of the domain ports.

pub mod package_manager;
pub mod registry;

pub use package_manager::{CommandPackageManager, PackageManagerKind};
pub use registry::{NpmDownloadsOracle, DEFAULT_DOWNLOADS_ENDPOINT};
