use crate::docker::{BuildError, DockerClient, PushError};
use crate::executor::{RealExecutor, ToolExecutor};
use launch_build::{PublishPlan, PublishSwitches, ResolveRequest, TagSet, TargetResolver};
use launch_core::{BuildVariant, ImageRef, LaunchConfig, VariantKind};
use std::path::PathBuf;

/// Result of one successful resolve → build → publish run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub variant: BuildVariant,
    pub tags: TagSet,
    /// Image id every tag resolves to.
    pub image_id: String,
    /// References pushed, in push order.
    pub pushed: Vec<ImageRef>,
}

/// Resolve → Build → Publish, stopping at the first failure.
///
/// The commit hash and configuration are handed in by the caller;
/// nothing is read from the environment.
pub struct Orchestrator<E: ToolExecutor = RealExecutor> {
    config: LaunchConfig,
    docker: DockerClient<E>,
}

impl Orchestrator<RealExecutor> {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            config,
            docker: DockerClient::new(),
        }
    }
}

impl<E: ToolExecutor> Orchestrator<E> {
    pub fn with_executor(config: LaunchConfig, executor: E) -> Self {
        Self {
            config,
            docker: DockerClient::with_executor(executor),
        }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Run the pipeline for a single variant.
    pub async fn run(
        &self,
        request: &ResolveRequest,
        commit: Option<&str>,
        switches: PublishSwitches,
    ) -> Result<BuildReport, OrchestratorError> {
        let variant = TargetResolver::new(&self.config).resolve(request, commit)?;
        let tags = TagSet::new(&variant, &self.config.registries)?;

        tracing::info!(
            kind = %variant.kind,
            base = %variant.base_image,
            tags = tags.count(),
            "building image"
        );
        self.docker
            .build(&request.context, &variant, &tags, &self.config.build)
            .await?;

        let image_id = self.docker.verify_tags(&tags).await?;
        tracing::info!(%image_id, "all tags reference the same image");

        let plan = PublishPlan::new(&tags, switches);
        if plan.is_empty() {
            tracing::info!("no publish switch set, skipping push");
        }

        let mut pushed = Vec::with_capacity(plan.pushes().len());
        for image in plan.pushes() {
            tracing::info!(%image, "pushing");
            self.docker.push(image).await?;
            pushed.push(image.clone());
        }

        Ok(BuildReport {
            variant,
            tags,
            image_id,
            pushed,
        })
    }

    /// The tag-push flow: GPU then CPU, both fully published.
    pub async fn release(
        &self,
        context: PathBuf,
        explicit_tag: Option<String>,
        commit: Option<&str>,
    ) -> Result<Vec<BuildReport>, OrchestratorError> {
        let mut reports = Vec::with_capacity(2);

        for kind in [VariantKind::Gpu, VariantKind::Cpu] {
            let request = ResolveRequest {
                cpu_only: kind == VariantKind::Cpu,
                explicit_tag: explicit_tag.clone(),
                context: context.clone(),
            };
            reports.push(self.run(&request, commit, PublishSwitches::full()).await?);
        }

        Ok(reports)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("configuration error")]
    Configuration(#[from] launch_core::Error),

    #[error("image build failed")]
    Build(#[from] BuildError),

    #[error("image push failed")]
    Push(#[from] PushError),
}
