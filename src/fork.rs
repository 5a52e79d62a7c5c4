//! The private-fork orchestration sequence.
//!
//! Seven sequential stages: resolve the source reference, bare-clone it,
//! create the private destination repository, mirror-push, optionally
//! clone the fork and/or rewire the ambient repository's remotes, and
//! always remove the bare-clone staging directory on the way out.

use crate::ops::{ForgeOps, GitOps};
use crate::repo::RepoRef;
use crate::ui;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_REMOTE_NAME: &str = "origin";
const UPSTREAM_REMOTE_NAME: &str = "upstream";

/// Substituted for the destination owner when every lookup fails.
pub const PLACEHOLDER_OWNER: &str = "OWNER";

pub const DEFAULT_HOST: &str = "github.com";

/// Options resolved once from the command line, read-only afterwards.
#[derive(Debug, Clone)]
pub struct ForkOptions {
    pub repository: Option<String>,
    /// Pass-through flags for the `--clone` step's `git clone`.
    pub git_args: Vec<String>,
    pub clone: bool,
    pub remote: bool,
    pub remote_name: String,
    pub organization: Option<String>,
    pub fork_name: Option<String>,
    pub default_branch_only: bool,
}

impl Default for ForkOptions {
    fn default() -> Self {
        Self {
            repository: None,
            git_args: Vec::new(),
            clone: false,
            remote: false,
            remote_name: DEFAULT_REMOTE_NAME.to_string(),
            organization: None,
            fork_name: None,
            default_branch_only: false,
        }
    }
}

/// Explicit execution context for the sequence: where to stage the bare
/// clone and which forge host to build remote URLs for.
#[derive(Debug, Clone)]
pub struct ExecContext {
    pub work_dir: PathBuf,
    pub host: String,
}

impl ExecContext {
    /// Context rooted at `work_dir`, targeting `github.com` unless
    /// `GH_HOST` says otherwise.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let host = std::env::var("GH_HOST")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self {
            work_dir: work_dir.into(),
            host,
        }
    }
}

/// Removes the bare-clone staging directory when dropped.
///
/// Acquired before the clone is attempted, so the directory is gone on
/// every exit path, including failures part-way through the sequence. A
/// directory that was never created is not an error; any other removal
/// failure is a warning only.
struct BareCloneGuard {
    path: PathBuf,
}

impl BareCloneGuard {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for BareCloneGuard {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => ui::warn(&format!(
                "failed to clean up temporary directory {}: {err}",
                self.path.display()
            )),
        }
    }
}

/// Run the full fork sequence.
pub async fn run(
    opts: &ForkOptions,
    ctx: &ExecContext,
    git: &impl GitOps,
    forge: &impl ForgeOps,
) -> Result<()> {
    let source = match &opts.repository {
        Some(repository) => repository.clone(),
        None => forge
            .current_repo_url()
            .await
            .context("unable to determine current repository")?,
    };
    let source_ref = RepoRef::parse(&source)?;

    println!("Creating bare clone of {source}...");
    let bare_dir = ctx.work_dir.join(source_ref.bare_dir_name());
    let _cleanup = BareCloneGuard::new(bare_dir.clone());
    git.clone_bare(&source)
        .await
        .context("failed to create bare clone")?;

    let dest = resolve_destination(&source_ref, opts, forge).await;
    println!("Creating private repository {dest}...");
    forge
        .create_private_repo(&dest.to_string(), opts.default_branch_only)
        .await
        .context("failed to create private repository")?;

    println!("Pushing to private repository...");
    git.push_mirror(&bare_dir, &dest.ssh_url(&ctx.host))
        .await
        .context("failed to push to private repository")?;

    if opts.clone {
        clone_fork(&dest, &source_ref, opts, ctx, git).await?;
    }

    if opts.remote {
        configure_remote(&dest, &opts.remote_name, ctx, git).await?;
    }

    println!("{}Created private fork {dest}", ui::CHECK);
    Ok(())
}

/// Compute the destination repository.
///
/// The name is the `--fork-name` override or the source name. The owner is
/// the `--org` override; otherwise the authenticated user's login, then
/// the forge CLI's configured username, then the `OWNER` placeholder with
/// a warning. The placeholder path is degraded but deliberately not fatal.
pub async fn resolve_destination(
    source: &RepoRef,
    opts: &ForkOptions,
    forge: &impl ForgeOps,
) -> RepoRef {
    let name = opts
        .fork_name
        .clone()
        .unwrap_or_else(|| source.name.clone());

    if let Some(org) = &opts.organization {
        return RepoRef {
            owner: org.clone(),
            name,
        };
    }

    let owner = match forge.viewer_login().await {
        Ok(login) => login,
        Err(primary) => match forge.configured_login().await {
            Ok(login) => login,
            Err(fallback) => {
                ui::warn(&format!(
                    "could not determine the destination owner \
                     ({primary}; {fallback}); using placeholder {PLACEHOLDER_OWNER}"
                ));
                PLACEHOLDER_OWNER.to_string()
            }
        },
    };

    RepoRef { owner, name }
}

async fn clone_fork(
    dest: &RepoRef,
    source: &RepoRef,
    opts: &ForkOptions,
    ctx: &ExecContext,
    git: &impl GitOps,
) -> Result<()> {
    println!("Cloning fork {dest}...");
    git.clone_with_args(&dest.ssh_url(&ctx.host), &opts.git_args)
        .await
        .context("failed to clone")?;

    let clone_dir = ctx.work_dir.join(&dest.name);
    git.add_remote(
        Some(&clone_dir),
        UPSTREAM_REMOTE_NAME,
        &source.https_url(&ctx.host),
    )
    .await
    .context("failed to add upstream remote")?;
    Ok(())
}

/// Rewire the ambient repository's remotes: rename any remote matching
/// `remote_name` to `upstream`, then add the fork under `remote_name`.
async fn configure_remote(
    dest: &RepoRef,
    remote_name: &str,
    ctx: &ExecContext,
    git: &impl GitOps,
) -> Result<()> {
    let remotes = git.list_remotes().await.context("failed to list remotes")?;
    if remotes.iter().any(|name| name == remote_name) {
        git.rename_remote(remote_name, UPSTREAM_REMOTE_NAME)
            .await
            .context("failed to rename remote")?;
    }
    git.add_remote(None, remote_name, &dest.https_url(&ctx.host))
        .await
        .context("failed to add remote")?;
    Ok(())
}
