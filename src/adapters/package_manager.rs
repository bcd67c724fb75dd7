use crate::domain::model::Action;
use crate::domain::ports::PackageManager;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::process::Command;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManagerKind {
    pub fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Arguments for one install/uninstall invocation.
    pub fn args(&self, action: Action, name: &str, dev: bool) -> Vec<String> {
        let args: Vec<&str> = match (self, action) {
            (Self::Npm, Action::Install) if dev => vec!["install", "--save-dev"],
            (Self::Npm, Action::Install) => vec!["install", "--save"],
            (Self::Npm, Action::Uninstall) if dev => vec!["uninstall", "--save-dev"],
            (Self::Npm, Action::Uninstall) => vec!["uninstall", "--save"],
            (Self::Yarn, Action::Install) if dev => vec!["add", "--dev"],
            (Self::Yarn, Action::Install) => vec!["add"],
            (Self::Yarn, Action::Uninstall) => vec!["remove"],
            (Self::Pnpm, Action::Install) if dev => vec!["add", "--save-dev"],
            (Self::Pnpm, Action::Install) => vec!["add"],
            (Self::Pnpm, Action::Uninstall) => vec!["remove"],
        };

        args.into_iter()
            .map(str::to_string)
            .chain(std::iter::once(name.to_string()))
            .collect()
    }
}

/// Shells out to the package manager inside the project directory.
#[derive(Debug, Clone)]
pub struct CommandPackageManager {
    kind: PackageManagerKind,
    project_root: PathBuf,
}

impl CommandPackageManager {
    pub fn new(kind: PackageManagerKind, project_root: PathBuf) -> Self {
        Self { kind, project_root }
    }
}

#[async_trait]
impl PackageManager for CommandPackageManager {
    async fn apply(&self, action: Action, name: &str, dev: bool) -> bool {
        let program = self.kind.program();
        let args = self.kind.args(action, name, dev);
        tracing::debug!("Running `{} {}` in {}", program, args.join(" "), self.project_root.display());

        let output = Command::new(program)
            .args(&args)
            .current_dir(&self.project_root)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                tracing::warn!(
                    "{} exited with {}: {}",
                    program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                tracing::error!("Failed to start {}: {}", program, e);
                false
            }
        }
    }
}
