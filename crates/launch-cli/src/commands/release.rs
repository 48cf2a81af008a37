use launch_core::LaunchConfig;
use launch_tools::Orchestrator;
use std::path::PathBuf;

/// Build and publish both variants, GPU first.
pub async fn release(context: Option<PathBuf>, tag: Option<String>) -> anyhow::Result<()> {
    let config = LaunchConfig::load(&PathBuf::from("."))?;
    let context = context.unwrap_or_else(|| PathBuf::from(&config.build.context));
    let commit = super::commit_for(tag.as_deref()).await?;

    let orchestrator = Orchestrator::new(config);
    let reports = orchestrator
        .release(context, tag, commit.as_deref())
        .await?;

    for report in &reports {
        super::build::print_report(report);
    }
    Ok(())
}
