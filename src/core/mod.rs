pub mod classify;
pub mod dedup;
pub mod diff;
pub mod discovery;
pub mod engine;
pub mod extract;
pub mod manifest;
pub mod scan;
pub mod trust;

pub use crate::domain::model::{
    Action, ActionOutcome, DeclaredSet, DiffResult, ModuleRef, OutcomeStatus, RunReport,
    ScanSummary, UsedSet,
};
pub use crate::domain::ports::{ConfigProvider, PackageManager, PopularityOracle};
pub use crate::utils::error::Result;
