use std::path::Path;

use launch_build::TagSet;
use launch_core::{BuildVariant, LaunchConfig, RegistryTarget, VariantKind};
use launch_tools::docker::{BuildError, DockerClient, PushError};
use launch_tools::doctor::{CheckResult, DoctorReport};
use launch_tools::executor::ToolExecutor;
use launch_tools::git::{GitClient, GitError};
use launch_tools::tool::ToolError;
use mockall::mock;

mock! {
    Executor {}

    impl ToolExecutor for Executor {
        async fn exec(&self, program: &str, args: &[String]) -> Result<String, ToolError>;
        async fn exec_streaming(&self, program: &str, args: &[String]) -> Result<(), ToolError>;
    }
}

fn not_found(program: &str) -> ToolError {
    ToolError::NotFound {
        program: program.to_owned(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    }
}

fn variant() -> BuildVariant {
    BuildVariant {
        kind: VariantKind::Cpu,
        base_image: "tensorflow/tensorflow:2.9.1".to_owned(),
        primary_tag: "abc1234-cpu".to_owned(),
        floating_tag: "latest-cpu".to_owned(),
    }
}

// ── Docker Tests ──

#[tokio::test]
async fn build_passes_base_image_and_all_tags() {
    let mut mock = MockExecutor::new();
    mock.expect_exec_streaming()
        .withf(|program, args| {
            program == "docker"
                && args[0] == "build"
                && args[1] == "ctx"
                && args[2] == "--build-arg"
                && args[3] == "BASE_IMAGE=tensorflow/tensorflow:2.9.1"
                && args.iter().filter(|a| *a == "--tag").count() == 2
                && args.contains(&"only.io/img:latest-cpu".to_owned())
                && args.contains(&"only.io/img:abc1234-cpu".to_owned())
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let registries = vec![RegistryTarget::new("only.io/img")];
    let tags = TagSet::new(&variant(), &registries).unwrap();
    let config = LaunchConfig::default();

    let client = DockerClient::with_executor(mock);
    client
        .build(Path::new("ctx"), &variant(), &tags, &config.build)
        .await
        .unwrap();
}

#[tokio::test]
async fn build_failure_maps_to_build_error() {
    let mut mock = MockExecutor::new();
    mock.expect_exec_streaming().returning(|program, args| {
        Err(ToolError::CommandFailed {
            program: program.to_owned(),
            args: args.to_vec(),
            stderr: "exit code: 1".to_owned(),
        })
    });

    let config = LaunchConfig::default();
    let tags = TagSet::new(&variant(), &config.registries).unwrap();
    let client = DockerClient::with_executor(mock);
    let result = client
        .build(Path::new("ctx"), &variant(), &tags, &config.build)
        .await;

    assert!(matches!(result, Err(BuildError::Build { .. })));
}

#[tokio::test]
async fn image_id_inspects_reference() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|_, args| {
            args == ["image", "inspect", "--format", "{{.Id}}", "only.io/img:latest-cpu"]
        })
        .returning(|_, _| Ok("sha256:feed\n".to_owned()));

    let registry = RegistryTarget::new("only.io/img");
    let client = DockerClient::with_executor(mock);
    let id = client.image_id(&registry.image("latest-cpu")).await.unwrap();

    assert_eq!(id, "sha256:feed");
}

#[tokio::test]
async fn verify_tags_reports_inspect_failure() {
    let mut mock = MockExecutor::new();
    mock.expect_exec().returning(|program, _| Err(not_found(program)));

    let config = LaunchConfig::default();
    let tags = TagSet::new(&variant(), &config.registries).unwrap();
    let client = DockerClient::with_executor(mock);

    let result = client.verify_tags(&tags).await;
    assert!(matches!(result, Err(BuildError::Inspect { .. })));
}

#[tokio::test]
async fn push_failure_names_reference() {
    let mut mock = MockExecutor::new();
    mock.expect_exec_streaming()
        .withf(|_, args| args == ["push", "only.io/img:abc1234-cpu"])
        .returning(|program, _| Err(not_found(program)));

    let registry = RegistryTarget::new("only.io/img");
    let client = DockerClient::with_executor(mock);
    let err = client.push(&registry.image("abc1234-cpu")).await.unwrap_err();

    let PushError::Rejected { ref reference, .. } = err;
    assert_eq!(reference, "only.io/img:abc1234-cpu");
    assert!(err.to_string().contains("docker login"));
}

// ── Git Tests ──

#[tokio::test]
async fn short_head_runs_in_repo_dir() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|program, args| {
            program == "git" && args == ["-C", "/repo", "rev-parse", "--short", "HEAD"]
        })
        .returning(|_, _| Ok("3f2a9c1\n".to_owned()));

    let git = GitClient::with_executor(mock, "/repo");
    assert_eq!(git.short_head().await.unwrap(), "3f2a9c1");
}

#[tokio::test]
async fn short_head_outside_repository_fails() {
    let mut mock = MockExecutor::new();
    mock.expect_exec().returning(|_, _| {
        Err(ToolError::CommandFailed {
            program: "git".to_owned(),
            args: vec![],
            stderr: "fatal: not a git repository".to_owned(),
        })
    });

    let git = GitClient::with_executor(mock, "/tmp");
    assert!(matches!(
        git.short_head().await,
        Err(GitError::RevParse { .. })
    ));
}

#[tokio::test]
async fn short_head_rejects_empty_output() {
    let mut mock = MockExecutor::new();
    mock.expect_exec().returning(|_, _| Ok("\n".to_owned()));

    let git = GitClient::with_executor(mock, "/repo");
    assert!(matches!(git.short_head().await, Err(GitError::EmptyHead)));
}

#[tokio::test]
async fn staged_files_limits_to_path_and_skips_blank_lines() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|_, args| args.ends_with(&["--".to_owned(), "setup.py".to_owned()]))
        .returning(|_, _| Ok("setup.py\n\n".to_owned()));

    let git = GitClient::with_executor(mock, "/repo");
    let staged = git.staged_files(Some(Path::new("setup.py"))).await.unwrap();

    assert_eq!(staged, vec!["setup.py".to_owned()]);
}

#[tokio::test]
async fn commit_sets_author_identity() {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|_, args| {
            args == [
                "-C",
                "/repo",
                "-c",
                "user.name=bot",
                "-c",
                "user.email=bot@example.com",
                "commit",
                "-m",
                "Update version to v1",
            ]
        })
        .times(1)
        .returning(|_, _| Ok(String::new()));

    let git = GitClient::with_executor(mock, "/repo");
    git.commit("Update version to v1", "bot", "bot@example.com")
        .await
        .unwrap();
}

// ── Doctor Tests ──

fn healthy_docker() -> MockExecutor {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|_, args| args[0] == "version")
        .returning(|_, _| Ok("27.1.1\n".to_owned()));
    mock.expect_exec()
        .withf(|_, args| args[0] == "info")
        .returning(|_, _| Ok("27.1.1\n".to_owned()));
    mock
}

fn healthy_git() -> MockExecutor {
    let mut mock = MockExecutor::new();
    mock.expect_exec()
        .withf(|program, _| program == "git")
        .returning(|_, _| Ok("git version 2.43.0\n".to_owned()));
    mock
}

#[tokio::test]
async fn doctor_all_tools_available() {
    let docker = DockerClient::with_executor(healthy_docker());
    let git = GitClient::with_executor(healthy_git(), ".");

    let mut report = DoctorReport::collect(&docker, &git).await;
    report.config_file = CheckResult::ok("Found");
    report.build_context = CheckResult::ok("docker/Dockerfile");

    assert!(report.all_passed());
    assert_eq!(report.docker.detail, "27.1.1");
    assert_eq!(report.daemon.detail, "Server 27.1.1");
    assert_eq!(report.git.detail, "2.43.0");

    let rendered = report.to_string();
    assert!(rendered.contains("[OK] docker daemon"));
}

#[tokio::test]
async fn doctor_reports_unreachable_daemon_without_stopping() {
    let mut docker_mock = MockExecutor::new();
    docker_mock
        .expect_exec()
        .withf(|_, args| args[0] == "version")
        .returning(|_, _| Ok("27.1.1\n".to_owned()));
    docker_mock
        .expect_exec()
        .withf(|_, args| args[0] == "info")
        .returning(|_, _| {
            Err(ToolError::CommandFailed {
                program: "docker".to_owned(),
                args: vec![],
                stderr: "Cannot connect to the Docker daemon".to_owned(),
            })
        });

    let docker = DockerClient::with_executor(docker_mock);
    let git = GitClient::with_executor(healthy_git(), ".");

    let mut report = DoctorReport::collect(&docker, &git).await;
    report.config_file = CheckResult::ok("Found");
    report.build_context = CheckResult::ok("ok");

    assert!(report.docker.passed);
    assert!(!report.daemon.passed);
    assert!(report.git.passed);
    assert!(!report.all_passed());
    assert!(report.to_string().contains("[NG] docker daemon"));
}

#[tokio::test]
async fn doctor_missing_docker_cli() {
    let mut docker_mock = MockExecutor::new();
    docker_mock
        .expect_exec()
        .returning(|program, _| Err(not_found(program)));

    let docker = DockerClient::with_executor(docker_mock);
    let git = GitClient::with_executor(healthy_git(), ".");

    let report = DoctorReport::collect(&docker, &git).await;

    assert!(!report.docker.passed);
    assert!(report.docker.detail.contains("docker CLI not found"));
    assert!(!report.daemon.passed);
}
