mod build;
mod ci;
mod doctor;
mod release;
mod stamp;

use launch_tools::GitClient;

pub use build::{BuildArgs, build};
pub use ci::ci_init;
pub use doctor::doctor;
pub use release::release;
pub use stamp::{StampArgs, stamp};

/// Short hash of HEAD, needed only when no explicit tag was given.
pub(crate) async fn commit_for(explicit_tag: Option<&str>) -> anyhow::Result<Option<String>> {
    if explicit_tag.is_some() {
        return Ok(None);
    }
    let hash = GitClient::new(".").short_head().await?;
    tracing::debug!(%hash, "no explicit tag, using HEAD");
    Ok(Some(hash))
}
