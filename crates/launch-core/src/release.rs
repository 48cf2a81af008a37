use std::fmt;
use std::path::Path;

use serde::Deserialize;

/// The tag name of a published release.
///
/// Created by the release event and consumed once by the version stamper.
/// No validation happens here; filtering is the stamper's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag(String);

#[derive(Deserialize)]
struct ReleaseEvent {
    release: Option<ReleasePayload>,
}

#[derive(Deserialize)]
struct ReleasePayload {
    tag_name: Option<String>,
}

impl ReleaseTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the tag from a GitHub `release` event payload
    /// (the file `GITHUB_EVENT_PATH` points at).
    pub fn from_event_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::EventRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let event: ReleaseEvent =
            serde_json::from_str(&content).map_err(|e| crate::Error::EventParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        event
            .release
            .and_then(|r| r.tag_name)
            .map(Self)
            .ok_or_else(|| crate::Error::EventMissingTag {
                path: path.to_path_buf(),
            })
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
