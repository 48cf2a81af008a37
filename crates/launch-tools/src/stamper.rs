use crate::executor::{RealExecutor, ToolExecutor};
use crate::git::{GitClient, GitError};
use launch_build::{VersionRewrite, rewrite_version};
use launch_core::{ReleaseTag, StampConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct StampOptions {
    /// Stage and commit the rewritten file.
    pub commit: bool,
    /// Push the commit to the configured branch.
    pub push: bool,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            commit: true,
            push: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StampReport {
    pub file: PathBuf,
    pub rewrite: VersionRewrite,
    pub committed: bool,
    pub pushed: bool,
}

impl StampReport {
    pub fn rewritten(&self) -> bool {
        matches!(self.rewrite, VersionRewrite::Replaced { .. })
    }
}

/// Rewrites the package version to a release tag and commits it.
///
/// A tag outside `[v0-9.]*` only skips the rewrite. Only a rewritten file is
/// staged, so any other outcome leaves an empty diff and no commit, which is
/// not an error.
pub struct VersionStamper<E: ToolExecutor = RealExecutor> {
    git: GitClient<E>,
    config: StampConfig,
}

impl VersionStamper<RealExecutor> {
    pub fn new(repo_dir: impl Into<PathBuf>, config: StampConfig) -> Self {
        Self {
            git: GitClient::new(repo_dir),
            config,
        }
    }
}

impl<E: ToolExecutor> VersionStamper<E> {
    pub fn with_executor(executor: E, repo_dir: impl Into<PathBuf>, config: StampConfig) -> Self {
        Self {
            git: GitClient::with_executor(executor, repo_dir),
            config,
        }
    }

    /// Stamp `tag` into `file` (relative to the repository), or into the
    /// configured file when `file` is `None`.
    pub async fn stamp(
        &self,
        tag: &ReleaseTag,
        file: Option<&Path>,
        options: StampOptions,
    ) -> Result<StampReport, StampError> {
        let relative = file.map_or_else(|| PathBuf::from(&self.config.file), Path::to_path_buf);
        let path = self.git.repo_dir().join(&relative);

        let content = std::fs::read_to_string(&path).map_err(|e| StampError::Read {
            path: path.clone(),
            source: e,
        })?;

        let rewrite = rewrite_version(&content, tag.as_str());
        match &rewrite {
            VersionRewrite::Replaced {
                previous,
                content: updated,
            } => {
                std::fs::write(&path, updated).map_err(|e| StampError::Write {
                    path: path.clone(),
                    source: e,
                })?;
                tracing::info!(file = %relative.display(), %previous, new = %tag, "version rewritten");
            }
            VersionRewrite::Unchanged => {
                tracing::info!(file = %relative.display(), version = %tag, "version already current");
            }
            VersionRewrite::Skipped(mismatch) => {
                tracing::warn!(file = %relative.display(), "{mismatch}");
            }
            VersionRewrite::NoVersionLine => {
                tracing::warn!(file = %relative.display(), "no version line found, nothing rewritten");
            }
        }

        let mut report = StampReport {
            file: relative,
            rewrite,
            committed: false,
            pushed: false,
        };

        if !options.commit {
            return Ok(report);
        }

        // Unrelated edits already in the file must not ride along.
        if !report.rewritten() {
            tracing::info!("version not rewritten, nothing to commit");
            return Ok(report);
        }

        self.git.add(&report.file).await?;
        let staged = self.git.staged_files(Some(&report.file)).await?;
        if staged.is_empty() {
            tracing::info!("nothing staged, skipping commit");
            return Ok(report);
        }

        let message = self.config.render_commit_message(tag.as_str());
        self.git
            .commit(&message, &self.config.author_name, &self.config.author_email)
            .await?;
        report.committed = true;

        if options.push {
            self.git
                .push(&self.config.remote, &self.config.branch)
                .await?;
            report.pushed = true;
        }

        Ok(report)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("failed to read package metadata at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write package metadata at {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Git(#[from] GitError),
}
