use launch_core::{LaunchConfig, RegistryTarget};

/// Where the image workflow is written, relative to the repository root.
pub const IMAGES_WORKFLOW_PATH: &str = ".github/workflows/launch-images.yml";
/// Where the release workflow is written, relative to the repository root.
pub const RELEASE_WORKFLOW_PATH: &str = ".github/workflows/launch-release.yml";

/// Renders the GitHub Actions workflows that drive `launch`.
///
/// - images: tag push / manual dispatch → `launch release`
/// - release: release published → `launch stamp`
pub struct WorkflowGenerator<'a> {
    config: &'a LaunchConfig,
}

impl<'a> WorkflowGenerator<'a> {
    pub fn new(config: &'a LaunchConfig) -> Self {
        Self { config }
    }

    pub fn render_images(&self) -> String {
        let mut hosts: Vec<&str> = Vec::new();
        for registry in self.config.registries.iter().filter(|r| r.requires_auth) {
            let host = registry_host(registry);
            if !hosts.contains(&host) {
                hosts.push(host);
            }
        }
        let login_steps: String = hosts.into_iter().map(login_step).collect();

        format!(
            r#"name: Build and publish images

on:
  push:
    tags:
      - '*'
  workflow_dispatch:

permissions:
  contents: read
  packages: write
  id-token: write

jobs:
  images:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4

      - uses: dtolnay/rust-toolchain@stable

      - name: Install launch
        run: cargo install launch-cli --locked
{login_steps}
      - name: Build and push GPU and CPU images
        run: launch release
"#
        )
    }

    pub fn render_release(&self) -> String {
        let branch = &self.config.stamp.branch;
        let file = &self.config.stamp.file;

        format!(
            r#"name: Stamp release version

on:
  release:
    types: [published]

permissions:
  contents: write

jobs:
  stamp:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
        with:
          ref: {branch}

      - uses: dtolnay/rust-toolchain@stable

      - name: Install launch
        run: cargo install launch-cli --locked

      - name: Stamp {file} with the release tag
        run: launch stamp
"#
        )
    }
}

/// Host part of a registry repository, e.g. `ghcr.io` for `ghcr.io/acme/ml`.
pub fn registry_host(registry: &RegistryTarget) -> &str {
    registry
        .name
        .split_once('/')
        .map_or(registry.name.as_str(), |(host, _)| host)
}

fn login_step(host: &str) -> String {
    if host == "ghcr.io" {
        return format!(
            r#"
      - name: Log in to {host}
        uses: docker/login-action@v3
        with:
          registry: {host}
          username: ${{{{ github.actor }}}}
          password: ${{{{ secrets.GITHUB_TOKEN }}}}
"#
        );
    }

    if host == "gcr.io" || host.ends_with(".gcr.io") || host.ends_with("-docker.pkg.dev") {
        return format!(
            r#"
      - name: Authenticate to Google Cloud
        uses: google-github-actions/auth@v2
        with:
          credentials_json: ${{{{ secrets.GCP_CREDENTIALS }}}}

      - uses: google-github-actions/setup-gcloud@v2

      - name: Configure docker for {host}
        run: gcloud auth configure-docker {host} --quiet
"#
        );
    }

    let secret = secret_prefix(host);
    format!(
        r#"
      - name: Log in to {host}
        uses: docker/login-action@v3
        with:
          registry: {host}
          username: ${{{{ secrets.{secret}_USERNAME }}}}
          password: ${{{{ secrets.{secret}_PASSWORD }}}}
"#
    )
}

/// `registry.example.com:5000` → `REGISTRY_EXAMPLE_COM_5000`
fn secret_prefix(host: &str) -> String {
    host.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
