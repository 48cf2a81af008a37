//! Core types and configuration for launch.
//!
//! This crate defines the `launch.toml` schema ([`LaunchConfig`]), the
//! image data model ([`BuildVariant`], [`RegistryTarget`], [`ImageRef`]),
//! release tag handling ([`ReleaseTag`]), and shared error types.

pub mod config;
pub mod error;
pub mod model;
pub mod release;

pub use config::{BuildConfig, ImagesConfig, LaunchConfig, StampConfig};
pub use error::{Error, Result};
pub use model::{BuildVariant, ImageRef, RegistryTarget, VariantKind, primary_registry};
pub use release::ReleaseTag;
