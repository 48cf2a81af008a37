use launch_build::WorkflowGenerator;
use launch_build::workflow::{IMAGES_WORKFLOW_PATH, RELEASE_WORKFLOW_PATH};
use launch_core::LaunchConfig;
use std::path::{Path, PathBuf};

/// Write the image and release workflows.
pub async fn ci_init() -> anyhow::Result<()> {
    let project_dir = PathBuf::from(".");

    // ── Guard: workflows already exist ──
    for path in [IMAGES_WORKFLOW_PATH, RELEASE_WORKFLOW_PATH] {
        if project_dir.join(path).exists() {
            anyhow::bail!(
                "Workflow already exists at {path} — edit it directly, or delete it to re-run ci init"
            );
        }
    }

    let config = LaunchConfig::load(&project_dir)?;
    let generator = WorkflowGenerator::new(&config);

    write_workflow(&project_dir.join(IMAGES_WORKFLOW_PATH), &generator.render_images())?;
    println!("Created {IMAGES_WORKFLOW_PATH} (tag push / manual dispatch → launch release)");

    write_workflow(&project_dir.join(RELEASE_WORKFLOW_PATH), &generator.render_release())?;
    println!("Created {RELEASE_WORKFLOW_PATH} (release published → launch stamp)");

    let hosts: Vec<&str> = config
        .registries
        .iter()
        .filter(|r| r.requires_auth)
        .map(launch_build::workflow::registry_host)
        .collect();
    if !hosts.is_empty() {
        println!();
        println!("Registry credentials are read from repository secrets; check the login steps for:");
        for host in hosts {
            println!("  - {host}");
        }
    }

    Ok(())
}

fn write_workflow(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
