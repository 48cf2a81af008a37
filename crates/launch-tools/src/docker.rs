use crate::executor::{RealExecutor, ToolExecutor};
use crate::tool::ToolError;
use launch_build::TagSet;
use launch_core::{BuildConfig, BuildVariant, ImageRef};
use std::path::Path;

const DOCKER: &str = "docker";

/// Docker CLI operations, parameterized over the executor for testability.
pub struct DockerClient<E: ToolExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ToolExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Diagnostics ──

    /// Client version reported by the docker CLI.
    pub async fn client_version(&self) -> Result<String, ToolError> {
        self.executor
            .exec(
                DOCKER,
                &args(["version", "--format", "{{.Client.Version}}"]),
            )
            .await
            .map(|v| v.trim().to_owned())
    }

    /// Server version; fails when the daemon is unreachable.
    pub async fn server_version(&self) -> Result<String, ToolError> {
        self.executor
            .exec(DOCKER, &args(["info", "--format", "{{.ServerVersion}}"]))
            .await
            .map(|v| v.trim().to_owned())
    }

    // ── Build ──

    /// Run exactly one `docker build` producing an image tagged with every
    /// reference in `tags`.
    pub async fn build(
        &self,
        context: &Path,
        variant: &BuildVariant,
        tags: &TagSet,
        build: &BuildConfig,
    ) -> Result<(), BuildError> {
        let context_str = context
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(context.to_path_buf()))?;

        let mut cmd = vec![
            "build".to_owned(),
            context_str.to_owned(),
            "--build-arg".to_owned(),
            format!("{}={}", build.base_image_arg, variant.base_image),
        ];

        for image in tags.all() {
            cmd.push("--tag".to_owned());
            cmd.push(image.to_string());
        }

        if !build.network.is_empty() {
            cmd.push("--network".to_owned());
            cmd.push(build.network.clone());
        }

        self.executor
            .exec_streaming(DOCKER, &cmd)
            .await
            .map_err(|e| BuildError::Build { source: e })
    }

    /// Image id (`sha256:…`) a reference currently points at.
    pub async fn image_id(&self, image: &ImageRef) -> Result<String, BuildError> {
        let reference = image.to_string();
        let output = self
            .executor
            .exec(
                DOCKER,
                &args(["image", "inspect", "--format", "{{.Id}}", &reference]),
            )
            .await
            .map_err(|e| BuildError::Inspect {
                reference: reference.clone(),
                source: e,
            })?;

        Ok(output.trim().to_owned())
    }

    /// Confirm every tag of the set references one image and return its id.
    pub async fn verify_tags(&self, tags: &TagSet) -> Result<String, BuildError> {
        let reference = &tags.primary_entry().primary;
        let expected = self.image_id(reference).await?;

        for image in tags.all() {
            let id = self.image_id(image).await?;
            if id != expected {
                return Err(BuildError::TagDrift {
                    first: reference.to_string(),
                    first_id: expected,
                    other: image.to_string(),
                    other_id: id,
                });
            }
        }

        Ok(expected)
    }

    // ── Push ──

    pub async fn push(&self, image: &ImageRef) -> Result<(), PushError> {
        let reference = image.to_string();
        self.executor
            .exec_streaming(DOCKER, &args(["push", &reference]))
            .await
            .map_err(|e| PushError::Rejected {
                reference,
                source: e,
            })
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build context path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),

    #[error("docker build failed")]
    Build { source: ToolError },

    #[error("failed to inspect built image {reference}")]
    Inspect {
        reference: String,
        source: ToolError,
    },

    #[error("tags diverged after build: {first} is {first_id} but {other} is {other_id}")]
    TagDrift {
        first: String,
        first_id: String,
        other: String,
        other_id: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("push of {reference} failed — check `docker login` for the registry")]
    Rejected {
        reference: String,
        source: ToolError,
    },
}
