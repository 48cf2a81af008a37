use std::path::{Path, PathBuf};

use launch_core::{BuildConfig, BuildVariant, Error, ImagesConfig, LaunchConfig, VariantKind};

/// Caller-supplied flags for one resolution.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Build the CPU variant instead of the GPU one.
    pub cpu_only: bool,
    /// Overrides the commit hash as the primary tag stem.
    pub explicit_tag: Option<String>,
    /// Build context directory.
    pub context: PathBuf,
}

/// Derives the [`BuildVariant`] for an invocation.
pub struct TargetResolver<'a> {
    images: &'a ImagesConfig,
    build: &'a BuildConfig,
}

impl<'a> TargetResolver<'a> {
    pub fn new(config: &'a LaunchConfig) -> Self {
        Self {
            images: &config.images,
            build: &config.build,
        }
    }

    /// Resolve the variant for `request`.
    ///
    /// `commit` is the short hash of the current commit. It is only consulted
    /// when no explicit tag was requested, so callers may pass `None` in
    /// that case.
    pub fn resolve(
        &self,
        request: &ResolveRequest,
        commit: Option<&str>,
    ) -> launch_core::Result<BuildVariant> {
        self.check_context(&request.context)?;

        let stem = match request.explicit_tag.as_deref() {
            Some(tag) if tag.trim().is_empty() => {
                return Err(Error::EmptyValue { what: "explicit tag" });
            }
            Some(tag) => tag,
            None => match commit {
                Some(hash) if !hash.trim().is_empty() => hash.trim(),
                _ => return Err(Error::EmptyValue { what: "commit hash" }),
            },
        };

        let kind = VariantKind::from_cpu_only(request.cpu_only);
        let variant = BuildVariant {
            kind,
            base_image: self.images.base_image(kind).to_owned(),
            primary_tag: format!("{stem}{}", kind.suffix()),
            floating_tag: self.images.floating_tag(kind).to_owned(),
        };

        tracing::debug!(
            kind = %variant.kind,
            base = %variant.base_image,
            primary = %variant.primary_tag,
            floating = %variant.floating_tag,
            "resolved build variant"
        );

        Ok(variant)
    }

    /// The context must be a directory holding the configured build descriptor.
    pub fn check_context(&self, context: &Path) -> launch_core::Result<()> {
        if !context.is_dir() {
            return Err(Error::ContextNotFound {
                path: context.to_path_buf(),
            });
        }

        if !context.join(&self.build.dockerfile).is_file() {
            return Err(Error::MissingBuildDescriptor {
                context: context.to_path_buf(),
                descriptor: self.build.dockerfile.clone(),
            });
        }

        Ok(())
    }
}
