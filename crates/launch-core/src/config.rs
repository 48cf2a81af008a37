use serde::{Deserialize, Serialize};

use crate::model::{RegistryTarget, VariantKind};

/// launch.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub build: BuildConfig,
    /// Registries every build is tagged for, in push order.
    #[serde(default = "default_registries")]
    pub registries: Vec<RegistryTarget>,
    #[serde(default)]
    pub stamp: StampConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Base image for the GPU variant
    #[serde(default = "default_gpu_base")]
    pub gpu_base: String,
    /// Base image for the CPU variant
    #[serde(default = "default_cpu_base")]
    pub cpu_base: String,
    /// Floating tag re-pointed on every GPU publish
    #[serde(default = "default_gpu_floating_tag")]
    pub gpu_floating_tag: String,
    /// Floating tag re-pointed on every CPU publish
    #[serde(default = "default_cpu_floating_tag")]
    pub cpu_floating_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build context directory, relative to the working directory
    #[serde(default = "default_context")]
    pub context: String,
    /// Build descriptor that must exist inside the context
    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,
    /// Name of the build argument receiving the base image
    #[serde(default = "default_base_image_arg")]
    pub base_image_arg: String,
    /// Network mode for RUN steps (`docker build --network`).
    /// Set to an empty string to use the daemon default.
    #[serde(default = "default_network")]
    pub network: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampConfig {
    /// Package metadata file carrying the `version='...'` line
    #[serde(default = "default_stamp_file")]
    pub file: String,
    /// Branch the version commit is pushed to
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Git remote to push to
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Commit message; `{tag}` is replaced with the release tag
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    #[serde(default = "default_author_name")]
    pub author_name: String,
    #[serde(default = "default_author_email")]
    pub author_email: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            images: ImagesConfig::default(),
            build: BuildConfig::default(),
            registries: default_registries(),
            stamp: StampConfig::default(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            gpu_base: default_gpu_base(),
            cpu_base: default_cpu_base(),
            gpu_floating_tag: default_gpu_floating_tag(),
            cpu_floating_tag: default_cpu_floating_tag(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            context: default_context(),
            dockerfile: default_dockerfile(),
            base_image_arg: default_base_image_arg(),
            network: default_network(),
        }
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            file: default_stamp_file(),
            branch: default_branch(),
            remote: default_remote(),
            commit_message: default_commit_message(),
            author_name: default_author_name(),
            author_email: default_author_email(),
        }
    }
}

impl ImagesConfig {
    pub fn base_image(&self, kind: VariantKind) -> &str {
        match kind {
            VariantKind::Cpu => &self.cpu_base,
            VariantKind::Gpu => &self.gpu_base,
        }
    }

    pub fn floating_tag(&self, kind: VariantKind) -> &str {
        match kind {
            VariantKind::Cpu => &self.cpu_floating_tag,
            VariantKind::Gpu => &self.gpu_floating_tag,
        }
    }
}

impl StampConfig {
    pub fn render_commit_message(&self, tag: &str) -> String {
        self.commit_message.replace("{tag}", tag)
    }
}

impl LaunchConfig {
    /// Load from launch.toml at the given path, or return defaults if not found.
    ///
    /// The loaded configuration is validated before it is returned.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join("launch.toml");
        let config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path.clone(),
                source: e,
            })?
        } else {
            tracing::debug!(path = %config_path.display(), "no launch.toml, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.registries.is_empty() {
            return Err(crate::Error::NoRegistries);
        }
        if self.registries.iter().any(|r| r.name.trim().is_empty()) {
            return Err(crate::Error::EmptyRegistryName);
        }

        let primaries: Vec<String> = self
            .registries
            .iter()
            .filter(|r| r.primary)
            .map(|r| r.name.clone())
            .collect();
        if primaries.len() > 1 {
            return Err(crate::Error::MultiplePrimaries { names: primaries });
        }

        Ok(())
    }

    pub fn primary_registry(&self) -> crate::Result<&RegistryTarget> {
        crate::model::primary_registry(&self.registries).ok_or(crate::Error::NoRegistries)
    }
}

fn default_gpu_base() -> String {
    "tensorflow/tensorflow:2.9.1-gpu".to_owned()
}

fn default_cpu_base() -> String {
    "tensorflow/tensorflow:2.9.1".to_owned()
}

fn default_gpu_floating_tag() -> String {
    "latest-gpu".to_owned()
}

fn default_cpu_floating_tag() -> String {
    "latest-cpu".to_owned()
}

fn default_context() -> String {
    "docker/vm_boot_images/".to_owned()
}

fn default_dockerfile() -> String {
    "Dockerfile".to_owned()
}

fn default_base_image_arg() -> String {
    "BASE_IMAGE".to_owned()
}

fn default_network() -> String {
    "host".to_owned()
}

fn default_registries() -> Vec<RegistryTarget> {
    vec![
        RegistryTarget {
            name: "gcr.io/broad-ml4cvd/deeplearning".to_owned(),
            requires_auth: true,
            primary: true,
        },
        RegistryTarget {
            name: "ghcr.io/broadinstitute/ml4h".to_owned(),
            requires_auth: true,
            primary: false,
        },
    ]
}

fn default_stamp_file() -> String {
    "setup.py".to_owned()
}

fn default_branch() -> String {
    "master".to_owned()
}

fn default_remote() -> String {
    "origin".to_owned()
}

fn default_commit_message() -> String {
    "Update version to {tag}".to_owned()
}

fn default_author_name() -> String {
    "github-actions[bot]".to_owned()
}

fn default_author_email() -> String {
    "41898282+github-actions[bot]@users.noreply.github.com".to_owned()
}
