use crate::docker::DockerClient;
use crate::executor::ToolExecutor;
use crate::git::GitClient;
use std::fmt;

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub docker: CheckResult,
    pub daemon: CheckResult,
    pub git: CheckResult,
    pub config_file: CheckResult,
    pub build_context: CheckResult,
}

impl DoctorReport {
    /// Run the tool checks without early return. `config_file` and
    /// `build_context` are left for the caller to fill in.
    pub async fn collect<D: ToolExecutor, G: ToolExecutor>(
        docker: &DockerClient<D>,
        git: &GitClient<G>,
    ) -> Self {
        let mut report = Self::default();

        match docker.client_version().await {
            Ok(v) => report.docker = CheckResult::ok(&v),
            Err(e) => report.docker = CheckResult::fail(&e.to_string()),
        }

        match docker.server_version().await {
            Ok(v) if !v.is_empty() => report.daemon = CheckResult::ok(&format!("Server {v}")),
            Ok(_) => report.daemon = CheckResult::fail("daemon reported no version"),
            Err(e) => report.daemon = CheckResult::fail(&format!("daemon not reachable: {e}")),
        }

        match git.version().await {
            Ok(v) => {
                let version = v.strip_prefix("git version ").unwrap_or(&v);
                report.git = CheckResult::ok(version);
            }
            Err(e) => report.git = CheckResult::fail(&e.to_string()),
        }

        report
    }

    pub fn all_passed(&self) -> bool {
        self.docker.passed
            && self.daemon.passed
            && self.git.passed
            && self.config_file.passed
            && self.build_context.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("docker CLI", &self.docker),
            ("docker daemon", &self.daemon),
            ("git CLI", &self.git),
            ("launch.toml", &self.config_file),
            ("build context", &self.build_context),
        ];
        for (label, result) in rows {
            writeln!(f, "  [{}] {label:<14} {}", result.icon(), result.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
