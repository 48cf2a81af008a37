pub mod docker;
pub mod doctor;
pub mod executor;
pub mod git;
pub mod orchestrator;
pub mod stamper;
pub mod tool;

pub use docker::{BuildError, DockerClient, PushError};
pub use doctor::{CheckResult, DoctorReport};
pub use executor::{RealExecutor, ToolExecutor};
pub use git::{GitClient, GitError};
pub use orchestrator::{BuildReport, Orchestrator, OrchestratorError};
pub use stamper::{StampError, StampOptions, StampReport, VersionStamper};
pub use tool::ToolError;
