use launch_build::TargetResolver;
use launch_core::LaunchConfig;
use launch_tools::{CheckResult, DockerClient, DoctorReport, GitClient};
use std::path::{Path, PathBuf};

pub async fn doctor() -> anyhow::Result<()> {
    let docker = DockerClient::new();
    let git = GitClient::new(".");
    let mut report = DoctorReport::collect(&docker, &git).await;

    let config_exists = Path::new("launch.toml").exists();
    let config = match LaunchConfig::load(Path::new(".")) {
        Ok(config) => {
            report.config_file = if config_exists {
                CheckResult::ok("Found")
            } else {
                CheckResult::ok("Not found, using defaults")
            };
            Some(config)
        }
        Err(e) => {
            report.config_file = CheckResult::fail(&format!("{e}"));
            None
        }
    };

    report.build_context = match &config {
        Some(config) => {
            let context = PathBuf::from(&config.build.context);
            match TargetResolver::new(config).check_context(&context) {
                Ok(()) => CheckResult::ok(&context.join(&config.build.dockerfile).display().to_string()),
                Err(e) => CheckResult::fail(&e.to_string()),
            }
        }
        None => CheckResult::fail("skipped: launch.toml is invalid"),
    };

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}
