//! Planning for launch: everything decided before an external tool runs.
//!
//! # Image pipeline
//!
//! ```text
//! launch build
//!   1. Resolve  ── TargetResolver::resolve()   → BuildVariant
//!   2. Tags     ── TagSet::new()               → 2×N image refs
//!   3. Build    ── docker build --tag … (once)
//!   4. Publish  ── PublishPlan::new()          → docker push …
//! ```
//!
//! # Tag layout
//!
//! Every registry receives the same two tags for a variant:
//! - **pinned**: `<commit>-gpu` / `<commit>-cpu` (or `<tag>-gpu` with `-t`)
//! - **floating**: `latest-gpu` / `latest-cpu` (configurable)
//!
//! Both are applied by a single build so they can never diverge.
//!
//! # Release flow
//!
//! [`version::rewrite_version`] replaces the `version='…'` literal of a
//! package metadata file with a release tag, and [`workflow`] renders the
//! GitHub Actions workflows that drive both flows.

pub mod resolver;
pub mod tags;
pub mod version;
pub mod workflow;

pub use resolver::{ResolveRequest, TargetResolver};
pub use tags::{PublishPlan, PublishSwitches, RegistryTags, TagSet};
pub use version::{PatternMismatch, VersionRewrite, rewrite_version};
pub use workflow::WorkflowGenerator;
