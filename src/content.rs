//! ComplianceAsCode content repository clone.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Upstream compliance content repository.
pub const CONTENT_REPO_URL: &str = "https://github.com/ComplianceAsCode/content.git";

const CONTENT_BRANCH: &str = "master";
const CONTENT_DIR: &str = "compliance-content";

/// Clone the content repository into the workspace.
///
/// Runs to completion before returning: full history and working tree at
/// branch `master`, no deadline. Any clone failure (network, auth, missing
/// branch) propagates fatally.
pub async fn clone_content(workspace: &Path) -> Result<PathBuf> {
    info!(url = CONTENT_REPO_URL, branch = CONTENT_BRANCH, "fetching compliance content repository");

    let content_path = workspace.join(CONTENT_DIR);
    tokio::fs::create_dir(&content_path)
        .await
        .context("failed to create content checkout directory")?;

    let dest = content_path.clone();
    tokio::task::spawn_blocking(move || clone_blocking(&dest))
        .await
        .context("clone task panicked")??;

    Ok(content_path)
}

fn clone_blocking(dest: &Path) -> Result<()> {
    git2::build::RepoBuilder::new()
        .branch(CONTENT_BRANCH)
        .clone(CONTENT_REPO_URL, dest)
        .with_context(|| format!("failed to clone {CONTENT_REPO_URL}"))?;
    Ok(())
}
