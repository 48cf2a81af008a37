use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors: anything wrong with `launch.toml`, the build
/// context, or the values a caller passed in.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no registries configured — add at least one [[registries]] entry to launch.toml")]
    NoRegistries,

    #[error("registry name must not be empty")]
    EmptyRegistryName,

    #[error(
        "multiple primary registries: {}; mark exactly one with `primary = true`",
        names.join(", ")
    )]
    MultiplePrimaries { names: Vec<String> },

    // ── Build context ──
    #[error("build context {path} does not exist or is not a directory")]
    ContextNotFound { path: PathBuf },

    #[error("no build descriptor {descriptor} in build context {context}")]
    MissingBuildDescriptor { context: PathBuf, descriptor: String },

    #[error("{what} must not be empty")]
    EmptyValue { what: &'static str },

    // ── Release events ──
    #[error("failed to read release event at {path}")]
    EventRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse release event at {path}")]
    EventParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("release event at {path} carries no release.tag_name")]
    EventMissingTag { path: PathBuf },
}
