#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{PackageManagerKind, DEFAULT_DOWNLOADS_ENDPOINT};
use crate::core::discovery::DiscoveryOptions;
use crate::core::trust::DEFAULT_THRESHOLD;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_dir_names, validate_extensions, validate_positive_number, validate_url, Validate,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub project_root: PathBuf,
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub dev_dirs: Vec<String>,
    pub secure: bool,
    pub dry_run: bool,
    pub threshold: u64,
    pub endpoint: String,
    pub timeout: Duration,
    pub package_manager: PackageManagerKind,
}

impl Settings {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let scan = DiscoveryOptions::default();
        Self {
            project_root: project_root.into(),
            extensions: scan.extensions,
            exclude_dirs: scan.exclude_dirs,
            dev_dirs: scan.dev_dirs,
            secure: false,
            dry_run: false,
            threshold: DEFAULT_THRESHOLD,
            endpoint: DEFAULT_DOWNLOADS_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            package_manager: PackageManagerKind::default(),
        }
    }

    /// Defaults overlaid with whatever the file sets.
    pub fn from_toml(project_root: impl Into<PathBuf>, file: TomlConfig) -> Self {
        let mut settings = Self::new(project_root);

        if let Some(extensions) = file.scan.extensions {
            settings.extensions = extensions;
        }
        if let Some(exclude_dirs) = file.scan.exclude_dirs {
            settings.exclude_dirs = exclude_dirs;
        }
        if let Some(dev_dirs) = file.scan.dev_dirs {
            settings.dev_dirs = dev_dirs;
        }
        if let Some(secure) = file.trust.secure {
            settings.secure = secure;
        }
        if let Some(threshold) = file.trust.threshold {
            settings.threshold = threshold;
        }
        if let Some(endpoint) = file.trust.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(timeout) = file.trust.timeout_seconds {
            settings.timeout = Duration::from_secs(timeout);
        }
        if let Some(kind) = file.package_manager.kind {
            settings.package_manager = kind;
        }

        settings
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_extensions("scan.extensions", &self.extensions)?;
        validate_dir_names("scan.exclude_dirs", &self.exclude_dirs)?;
        validate_dir_names("scan.dev_dirs", &self.dev_dirs)?;
        validate_positive_number("trust.timeout_seconds", self.timeout.as_secs(), 1)?;

        // 只有 secure 模式才會連線
        if self.secure {
            validate_url("trust.endpoint", &self.endpoint)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn exclude_dirs(&self) -> &[String] {
        &self.exclude_dirs
    }

    fn dev_dirs(&self) -> &[String] {
        &self.dev_dirs
    }

    fn secure_mode(&self) -> bool {
        self.secure
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn trust_threshold(&self) -> u64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new(".");
        assert!(!settings.secure);
        assert_eq!(settings.threshold, 10_000);
        assert_eq!(settings.extensions, vec!["js"]);
        assert_eq!(settings.exclude_dirs, vec!["node_modules"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            "[trust]\nsecure = true\nthreshold = 42\n\n[package_manager]\nkind = \"yarn\"\n",
        )
        .unwrap();
        let settings = Settings::from_toml("/project", file);

        assert!(settings.secure_mode());
        assert_eq!(settings.trust_threshold(), 42);
        assert_eq!(settings.package_manager, PackageManagerKind::Yarn);
        assert_eq!(settings.endpoint, DEFAULT_DOWNLOADS_ENDPOINT);
        assert_eq!(settings.project_root(), Path::new("/project"));
    }

    #[test]
    fn test_validation_rejects_bad_endpoint_in_secure_mode() {
        let mut settings = Settings::new(".");
        settings.endpoint = "not a url".to_string();
        assert!(settings.validate().is_ok());

        settings.secure = true;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let mut settings = Settings::new(".");
        settings.timeout = Duration::from_secs(0);
        assert!(settings.validate().is_err());
    }
}
