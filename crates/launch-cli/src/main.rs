mod commands;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "launch",
    about = "Build, tag and publish CPU/GPU container images"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one image variant and optionally push it
    Build {
        /// Build context directory (defaults to [build].context)
        #[arg(short = 'd', long = "context", value_name = "PATH")]
        context: Option<PathBuf>,
        /// Primary tag stem (defaults to the short commit hash)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tag: Option<String>,
        /// Build the CPU variant instead of the GPU one
        #[arg(short = 'c', long = "cpu")]
        cpu: bool,
        /// Push the pinned tag to the primary registry only
        #[arg(short = 'p', long = "push-pinned")]
        push_pinned: bool,
        /// Push floating and pinned tags to all registries
        #[arg(short = 'P', long = "push-all")]
        push_all: bool,
    },
    /// Build and publish the GPU and CPU variants (tag-push flow)
    Release {
        /// Build context directory (defaults to [build].context)
        #[arg(short = 'd', long = "context", value_name = "PATH")]
        context: Option<PathBuf>,
        /// Primary tag stem (defaults to the short commit hash)
        #[arg(short = 't', long = "tag", value_name = "TAG")]
        tag: Option<String>,
    },
    /// Stamp the release tag into the package version and commit it
    Stamp {
        /// Release tag (takes precedence over --event)
        #[arg(long)]
        tag: Option<String>,
        /// GitHub release event payload to read the tag from
        #[arg(long, env = "GITHUB_EVENT_PATH", value_name = "PATH")]
        event: Option<PathBuf>,
        /// Package metadata file (defaults to [stamp].file)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Only rewrite the file; do not stage or commit
        #[arg(long)]
        no_commit: bool,
        /// Commit but do not push
        #[arg(long)]
        no_push: bool,
    },
    /// Manage CI workflows
    Ci {
        #[command(subcommand)]
        action: CiAction,
    },
    /// Check docker, git and project setup
    Doctor,
}

#[derive(Subcommand)]
enum CiAction {
    /// Write GitHub Actions workflows for the image and release flows
    Init,
}

/// Usage and argument errors go to stderr with exit status 1.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayVersion => {
            print!("{}", err.render());
            std::process::exit(0);
        }
        Err(err) => {
            eprint!("{}", err.render());
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_cli();

    match cli.command {
        Commands::Build {
            context,
            tag,
            cpu,
            push_pinned,
            push_all,
        } => {
            commands::build(commands::BuildArgs {
                context,
                tag,
                cpu_only: cpu,
                push_pinned_only: push_pinned,
                push_floating: push_all,
            })
            .await?
        }
        Commands::Release { context, tag } => commands::release(context, tag).await?,
        Commands::Stamp {
            tag,
            event,
            file,
            no_commit,
            no_push,
        } => {
            commands::stamp(commands::StampArgs {
                tag,
                event,
                file,
                no_commit,
                no_push,
            })
            .await?
        }
        Commands::Ci { action } => match action {
            CiAction::Init => commands::ci_init().await?,
        },
        Commands::Doctor => commands::doctor().await?,
    }

    Ok(())
}
