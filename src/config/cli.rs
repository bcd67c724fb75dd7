use crate::adapters::PackageManagerKind;
use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "depsync")]
#[command(about = "Install missing and remove unused npm dependencies based on require() calls")]
pub struct CliConfig {
    /// Project root containing package.json
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Configuration file (defaults to depsync.toml in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only install modules with enough registry downloads
    #[arg(long)]
    pub secure: bool,

    /// Minimum 30-day downloads required in secure mode
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Print the planned changes without running the package manager
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManagerKind>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Merges the configuration file with command line overrides and validates the result.
    pub fn resolve(&self) -> Result<Settings> {
        let file = TomlConfig::discover(&self.path, self.config.as_deref())?;
        let mut settings = Settings::from_toml(self.path.clone(), file);

        // 命令列優先於設定檔
        if self.secure {
            settings.secure = true;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        if let Some(kind) = self.package_manager {
            settings.package_manager = kind;
        }
        settings.dry_run = self.dry_run;

        settings.validate()?;
        Ok(settings)
    }
}
