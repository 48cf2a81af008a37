use launch_build::VersionRewrite;
use launch_core::{LaunchConfig, ReleaseTag};
use launch_tools::{StampOptions, VersionStamper};
use std::path::PathBuf;

pub struct StampArgs {
    pub tag: Option<String>,
    pub event: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub no_commit: bool,
    pub no_push: bool,
}

pub async fn stamp(args: StampArgs) -> anyhow::Result<()> {
    let project_dir = PathBuf::from(".");
    let config = LaunchConfig::load(&project_dir)?;

    let tag = match (args.tag, args.event) {
        (Some(tag), _) => ReleaseTag::new(tag),
        (None, Some(event)) => ReleaseTag::from_event_file(&event)?,
        (None, None) => anyhow::bail!(
            "no release tag — pass --tag, --event, or run inside a release workflow (GITHUB_EVENT_PATH)"
        ),
    };

    tracing::info!(%tag, "stamping release tag");

    let options = StampOptions {
        commit: !args.no_commit,
        push: !args.no_push,
    };

    let stamper = VersionStamper::new(&project_dir, config.stamp);
    let report = stamper.stamp(&tag, args.file.as_deref(), options).await?;

    let file = report.file.display();
    match &report.rewrite {
        VersionRewrite::Replaced { previous, .. } => {
            println!("Rewrote {file}: {previous} -> {tag}");
        }
        VersionRewrite::Unchanged => println!("{file} already at {tag}"),
        VersionRewrite::Skipped(mismatch) => println!("Skipped rewrite: {mismatch}"),
        VersionRewrite::NoVersionLine => println!("Skipped rewrite: no version line in {file}"),
    }

    if report.pushed {
        println!("Committed and pushed");
    } else if report.committed {
        println!("Committed (not pushed)");
    } else if options.commit {
        println!("Nothing to commit");
    }

    Ok(())
}
