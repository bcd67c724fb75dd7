use crate::core::diff;
use crate::core::discovery::DiscoveryOptions;
use crate::core::manifest::read_manifest;
use crate::core::scan::scan_project;
use crate::core::trust::TrustGate;
use crate::domain::model::{Action, ActionOutcome, ModuleRef, OutcomeStatus, RunReport};
use crate::domain::ports::{ConfigProvider, PackageManager, PopularityOracle};
use crate::utils::error::Result;

/// Runs the scan → diff → apply pipeline once per call.
pub struct Reconciler<C: ConfigProvider, P: PackageManager, O: PopularityOracle> {
    config: C,
    package_manager: P,
    gate: TrustGate<O>,
}

impl<C, P, O> Reconciler<C, P, O>
where
    C: ConfigProvider,
    P: PackageManager,
    O: PopularityOracle,
{
    pub fn new(config: C, package_manager: P, oracle: O) -> Self {
        let gate = TrustGate::with_threshold(oracle, config.trust_threshold());
        Self {
            config,
            package_manager,
            gate,
        }
    }

    fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            extensions: self.config.extensions().to_vec(),
            exclude_dirs: self.config.exclude_dirs().to_vec(),
            dev_dirs: self.config.dev_dirs().to_vec(),
        }
    }

    /// Computes the diff without touching the project.
    pub async fn plan(&self) -> Result<RunReport> {
        let root = self.config.project_root();

        let scan = scan_project(root, &self.discovery_options())?;
        let declared = read_manifest(root)?;
        let diff = diff::compute(&scan.used, &declared);

        tracing::info!(
            "📦 {} to install, {} to remove",
            diff.to_install.len(),
            diff.to_remove.len()
        );

        Ok(RunReport {
            scan,
            declared,
            diff,
            outcomes: Vec::new(),
        })
    }

    pub async fn run(&self) -> Result<RunReport> {
        let mut report = self.plan().await?;

        if report.diff.is_clean() {
            tracing::info!("✅ Dependencies already match the source code");
            return Ok(report);
        }

        for module in &report.diff.to_install {
            let status = self.install(module).await;
            report.outcomes.push(ActionOutcome {
                module: module.clone(),
                action: Action::Install,
                status,
            });
        }

        for module in &report.diff.to_remove {
            let status = self.apply(Action::Uninstall, module).await;
            report.outcomes.push(ActionOutcome {
                module: module.clone(),
                action: Action::Uninstall,
                status,
            });
        }

        Ok(report)
    }

    async fn install(&self, module: &ModuleRef) -> OutcomeStatus {
        if self.config.secure_mode()
            && !self.config.dry_run()
            && !self.gate.is_trusted(&module.name).await
        {
            tracing::warn!(
                "🚫 {} is not trusted (needs more than {} downloads in the last 30 days), skipping",
                module.name,
                self.gate.threshold()
            );
            return OutcomeStatus::Untrusted;
        }

        self.apply(Action::Install, module).await
    }

    async fn apply(&self, action: Action, module: &ModuleRef) -> OutcomeStatus {
        if self.config.dry_run() {
            tracing::info!("📝 [dry run] would {} {}", action, module);
            return OutcomeStatus::Planned;
        }

        tracing::info!("⏳ {} {}", action, module);
        if self
            .package_manager
            .apply(action, &module.name, module.dev)
            .await
        {
            tracing::info!("✅ {} {} succeeded", action, module);
            OutcomeStatus::Applied
        } else {
            tracing::error!("❌ {} {} failed", action, module);
            OutcomeStatus::Failed
        }
    }
}
