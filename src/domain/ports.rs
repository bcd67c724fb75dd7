use crate::domain::model::Action;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn project_root(&self) -> &Path;
    fn extensions(&self) -> &[String];
    fn exclude_dirs(&self) -> &[String];
    fn dev_dirs(&self) -> &[String];
    fn secure_mode(&self) -> bool;
    fn dry_run(&self) -> bool;
    fn trust_threshold(&self) -> u64;
}

/// Runs install/uninstall commands against the project.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Returns `true` when the command completed successfully.
    async fn apply(&self, action: Action, name: &str, dev: bool) -> bool;
}

/// Reports trailing 30-day download counts for a registry module.
#[async_trait]
pub trait PopularityOracle: Send + Sync {
    async fn downloads(&self, name: &str) -> Result<u64>;
}
