use crate::utils::error::{DepsyncError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DepsyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DepsyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DepsyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DepsyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 副檔名不含點，例如 `js` 而非 `.js`
pub fn validate_extensions(field_name: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(DepsyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one source extension is required".to_string(),
        });
    }

    for ext in extensions {
        if ext.trim().is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(DepsyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: ext.clone(),
                reason: "Extension must be a bare name such as 'js'".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_dir_names(field_name: &str, names: &[String]) -> Result<()> {
    for name in names {
        if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
            return Err(DepsyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Expected a single directory name".to_string(),
            });
        }
    }
    Ok(())
}
