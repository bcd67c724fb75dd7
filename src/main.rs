use anyhow::Context;
use clap::Parser;
use depsync::utils::logger;
use depsync::{
    CliConfig, CommandPackageManager, NpmDownloadsOracle, OutcomeStatus, Reconciler, RunReport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting depsync in {}", cli.path.display());
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if settings.secure {
        tracing::info!(
            "🔒 Secure mode: installs need more than {} downloads in the last 30 days",
            settings.threshold
        );
    }

    let oracle = NpmDownloadsOracle::new(settings.endpoint.clone(), settings.timeout)
        .context("failed to build HTTP client for the downloads API")?;
    let package_manager =
        CommandPackageManager::new(settings.package_manager, settings.project_root.clone());
    let reconciler = Reconciler::new(settings, package_manager, oracle);

    match reconciler.run().await {
        Ok(report) => {
            print_report(&report);
            if report.has_failures() {
                std::process::exit(4);
            }
        }
        Err(e) => {
            tracing::error!("❌ depsync failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    if report.diff.is_clean() {
        println!("✅ package.json is in sync with the source code");
        return;
    }

    for outcome in &report.outcomes {
        let marker = match outcome.status {
            OutcomeStatus::Applied => "✅",
            OutcomeStatus::Failed => "❌",
            OutcomeStatus::Untrusted => "🚫",
            OutcomeStatus::Planned => "📝",
        };
        let note = match outcome.status {
            OutcomeStatus::Untrusted => " (not trusted, skipped)",
            OutcomeStatus::Planned => " (dry run)",
            OutcomeStatus::Failed => " (failed)",
            OutcomeStatus::Applied => "",
        };
        println!("{} {} {}{}", marker, outcome.action, outcome.module, note);
    }

    println!(
        "📊 {} file(s) scanned, {} applied, {} failed, {} untrusted",
        report.scan.files_scanned,
        report.count(OutcomeStatus::Applied),
        report.count(OutcomeStatus::Failed),
        report.count(OutcomeStatus::Untrusted)
    );
}
