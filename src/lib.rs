pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{CommandPackageManager, NpmDownloadsOracle, PackageManagerKind};
pub use config::Settings;
pub use core::engine::Reconciler;
pub use domain::model::{Action, ActionOutcome, DiffResult, ModuleRef, OutcomeStatus, RunReport};
pub use utils::error::{DepsyncError, Result};
