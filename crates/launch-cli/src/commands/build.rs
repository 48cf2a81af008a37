use launch_build::{PublishSwitches, ResolveRequest};
use launch_core::LaunchConfig;
use launch_tools::{BuildReport, Orchestrator};
use std::path::PathBuf;

pub struct BuildArgs {
    pub context: Option<PathBuf>,
    pub tag: Option<String>,
    pub cpu_only: bool,
    pub push_pinned_only: bool,
    pub push_floating: bool,
}

/// Resolve → build → publish a single variant.
pub async fn build(args: BuildArgs) -> anyhow::Result<()> {
    let project_dir = PathBuf::from(".");
    let config = LaunchConfig::load(&project_dir)?;

    let context = args
        .context
        .unwrap_or_else(|| PathBuf::from(&config.build.context));
    let commit = super::commit_for(args.tag.as_deref()).await?;

    let request = ResolveRequest {
        cpu_only: args.cpu_only,
        explicit_tag: args.tag,
        context,
    };
    let switches = PublishSwitches {
        push_floating: args.push_floating,
        push_pinned_only: args.push_pinned_only,
    };

    let orchestrator = Orchestrator::new(config);
    let report = orchestrator
        .run(&request, commit.as_deref(), switches)
        .await?;

    print_report(&report);
    Ok(())
}

pub(super) fn print_report(report: &BuildReport) {
    println!();
    println!(
        "Built {kind} image {id}",
        kind = report.variant.kind,
        id = report.image_id
    );
    for image in report.tags.all() {
        println!("  tagged {image}");
    }
    if report.pushed.is_empty() {
        println!("Nothing pushed (use -P to publish everywhere, -p for the primary registry)");
    } else {
        for image in &report.pushed {
            println!("  pushed {image}");
        }
    }
}
