use launch_core::{BuildVariant, Error, ImageRef, RegistryTarget};

/// The two tags one registry receives for a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTags {
    pub registry: RegistryTarget,
    pub floating: ImageRef,
    pub primary: ImageRef,
}

/// Every `registry × {floating, primary}` reference a single build is
/// tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    entries: Vec<RegistryTags>,
    primary_index: usize,
}

impl TagSet {
    pub fn new(variant: &BuildVariant, registries: &[RegistryTarget]) -> launch_core::Result<Self> {
        if registries.is_empty() {
            return Err(Error::NoRegistries);
        }
        // Same rule as `launch_core::primary_registry`: marked, else first.
        let primary_index = registries.iter().position(|r| r.primary).unwrap_or(0);

        let entries = registries
            .iter()
            .map(|registry| RegistryTags {
                registry: registry.clone(),
                floating: registry.image(&variant.floating_tag),
                primary: registry.image(&variant.primary_tag),
            })
            .collect();

        Ok(Self {
            entries,
            primary_index,
        })
    }

    pub fn entries(&self) -> &[RegistryTags] {
        &self.entries
    }

    /// Tags of the primary (non-mirror) registry.
    pub fn primary_entry(&self) -> &RegistryTags {
        &self.entries[self.primary_index]
    }

    /// All references, per registry in configured order, floating before pinned.
    pub fn all(&self) -> impl Iterator<Item = &ImageRef> {
        self.entries.iter().flat_map(|e| [&e.floating, &e.primary])
    }

    /// Number of references: two per registry, never zero.
    pub fn count(&self) -> usize {
        self.entries.len() * 2
    }
}

/// The two independent publish switches (`-P` and `-p`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSwitches {
    /// Push floating and pinned tags to every registry.
    pub push_floating: bool,
    /// Push the pinned tag to the primary registry only.
    pub push_pinned_only: bool,
}

impl PublishSwitches {
    pub fn full() -> Self {
        Self {
            push_floating: true,
            push_pinned_only: false,
        }
    }

    pub fn any(&self) -> bool {
        self.push_floating || self.push_pinned_only
    }
}

/// Ordered list of pushes for one build.
///
/// Floating pushes come first, pinned-only second. With both switches set the
/// primary registry's pinned ref appears twice; pushing it again is a no-op
/// for the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishPlan {
    pushes: Vec<ImageRef>,
}

impl PublishPlan {
    pub fn new(tags: &TagSet, switches: PublishSwitches) -> Self {
        let mut pushes = Vec::new();

        if switches.push_floating {
            pushes.extend(tags.all().cloned());
        }

        if switches.push_pinned_only {
            pushes.push(tags.primary_entry().primary.clone());
        }

        Self { pushes }
    }

    pub fn pushes(&self) -> &[ImageRef] {
        &self.pushes
    }

    pub fn is_empty(&self) -> bool {
        self.pushes.is_empty()
    }
}
