use crate::executor::{RealExecutor, ToolExecutor};
use crate::tool::ToolError;
use std::path::{Path, PathBuf};

const GIT: &str = "git";

/// Git CLI operations against one working tree.
///
/// Every command runs as `git -C <repo_dir> …`, so the caller's working
/// directory does not matter.
pub struct GitClient<E: ToolExecutor = RealExecutor> {
    executor: E,
    repo_dir: PathBuf,
}

impl GitClient<RealExecutor> {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            executor: RealExecutor,
            repo_dir: repo_dir.into(),
        }
    }
}

impl<E: ToolExecutor> GitClient<E> {
    pub fn with_executor(executor: E, repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            repo_dir: repo_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    pub async fn version(&self) -> Result<String, ToolError> {
        self.executor
            .exec(GIT, &["--version".to_owned()])
            .await
            .map(|v| v.trim().to_owned())
    }

    /// Short hash of `HEAD`.
    pub async fn short_head(&self) -> Result<String, GitError> {
        let output = self
            .run(&["rev-parse", "--short", "HEAD"], |e| GitError::RevParse {
                source: e,
            })
            .await?;

        let hash = output.trim();
        if hash.is_empty() {
            return Err(GitError::EmptyHead);
        }
        Ok(hash.to_owned())
    }

    pub async fn add(&self, path: &Path) -> Result<(), GitError> {
        let path_str = path_arg(path)?;
        self.run(&["add", "--", path_str], |e| GitError::Add { source: e })
            .await?;
        Ok(())
    }

    /// Staged paths, optionally limited to `path`.
    pub async fn staged_files(&self, path: Option<&Path>) -> Result<Vec<String>, GitError> {
        let mut cmd = vec!["diff", "--cached", "--name-only"];
        if let Some(p) = path {
            cmd.push("--");
            cmd.push(path_arg(p)?);
        }

        let output = self
            .run(&cmd, |e| GitError::Diff { source: e })
            .await?;

        Ok(output
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.to_owned())
            .collect())
    }

    pub async fn commit(
        &self,
        message: &str,
        author_name: &str,
        author_email: &str,
    ) -> Result<(), GitError> {
        let name = format!("user.name={author_name}");
        let email = format!("user.email={author_email}");
        self.run(&["-c", &name, "-c", &email, "commit", "-m", message], |e| {
            GitError::Commit { source: e }
        })
        .await?;
        Ok(())
    }

    /// Push `HEAD` to `remote/branch`. Rejections are not reconciled.
    pub async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        let refspec = format!("HEAD:{branch}");
        let cmd = self.with_repo(&["push", remote, &refspec])?;
        self.executor
            .exec_streaming(GIT, &cmd)
            .await
            .map_err(|e| GitError::Push {
                remote: remote.to_owned(),
                branch: branch.to_owned(),
                source: e,
            })
    }

    async fn run(
        &self,
        cmd: &[&str],
        wrap: impl FnOnce(ToolError) -> GitError,
    ) -> Result<String, GitError> {
        let full = self.with_repo(cmd)?;
        self.executor.exec(GIT, &full).await.map_err(wrap)
    }

    fn with_repo(&self, cmd: &[&str]) -> Result<Vec<String>, GitError> {
        let repo = path_arg(&self.repo_dir)?;
        let mut full = vec!["-C".to_owned(), repo.to_owned()];
        full.extend(cmd.iter().map(|s| (*s).to_owned()));
        Ok(full)
    }
}

fn path_arg(path: &Path) -> Result<&str, GitError> {
    path.to_str()
        .ok_or_else(|| GitError::InvalidPath(path.to_path_buf()))
}

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("failed to resolve HEAD — is this a git repository with at least one commit?")]
    RevParse { source: ToolError },

    #[error("git rev-parse returned an empty hash")]
    EmptyHead,

    #[error("git add failed")]
    Add { source: ToolError },

    #[error("git diff failed")]
    Diff { source: ToolError },

    #[error("git commit failed")]
    Commit { source: ToolError },

    #[error("git push to {remote}/{branch} failed")]
    Push {
        remote: String,
        branch: String,
        source: ToolError,
    },
}
