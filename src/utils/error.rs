use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepsyncError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk project directory: {0}")]
    DiscoveryError(#[from] walkdir::Error),

    #[error("Manifest {} is not valid JSON: {source}", .path.display())]
    ManifestParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Popularity lookup for '{name}' failed: {message}")]
    OracleError { name: String, message: String },
}

impl DepsyncError {
    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ManifestParseError { path, .. } => {
                format!("Could not read dependencies from {}", path.display())
            }
            Self::DiscoveryError(_) => "Could not scan the project directory".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ManifestParseError { .. } => "Fix the JSON syntax in package.json and run again",
            Self::DiscoveryError(_) => "Check the read permissions of the project directories",
            Self::IoError(_) => "Make sure the project path exists and package.json is present",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check depsync.toml and the command line flags"
            }
            Self::HttpError(_) | Self::OracleError { .. } => {
                "Check the network connection or the download statistics endpoint"
            }
        }
    }

    /// 依錯誤類型決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => 2,
            Self::ManifestParseError { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DepsyncError>;
