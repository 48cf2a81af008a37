use std::fmt;

use serde::{Deserialize, Serialize};

/// Which flavour of image an invocation builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Cpu,
    Gpu,
}

impl VariantKind {
    /// Suffix appended to the primary tag so CPU and GPU images can share
    /// one repository namespace.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Cpu => "-cpu",
            Self::Gpu => "-gpu",
        }
    }

    pub fn from_cpu_only(cpu_only: bool) -> Self {
        if cpu_only { Self::Cpu } else { Self::Gpu }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            Self::Gpu => f.write_str("gpu"),
        }
    }
}

/// One image to build: the base it derives from and the two tags it
/// is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariant {
    pub kind: VariantKind,
    pub base_image: String,
    /// Pinned tag, e.g. `3f2a9c1-gpu`.
    pub primary_tag: String,
    /// Floating tag, e.g. `latest-gpu`. Re-pointed on every publish.
    pub floating_tag: String,
}

/// A container registry repository images are tagged for and pushed to,
/// e.g. `ghcr.io/acme/ml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryTarget {
    pub name: String,
    /// Whether pushes need prior `docker login`. Credentials themselves are
    /// the host environment's business.
    #[serde(default = "default_requires_auth")]
    pub requires_auth: bool,
    /// The non-mirror registry that receives pinned-only pushes.
    #[serde(default)]
    pub primary: bool,
}

impl RegistryTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_auth: true,
            primary: false,
        }
    }

    pub fn image(&self, tag: &str) -> ImageRef {
        ImageRef {
            repository: self.name.clone(),
            tag: tag.to_owned(),
        }
    }
}

/// The registry receiving pinned-only pushes: the one marked `primary`,
/// otherwise the first in the list.
pub fn primary_registry(registries: &[RegistryTarget]) -> Option<&RegistryTarget> {
    registries
        .iter()
        .find(|r| r.primary)
        .or_else(|| registries.first())
}

fn default_requires_auth() -> bool {
    true
}

/// A fully qualified `repository:tag` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
