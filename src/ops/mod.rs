//! External collaborators, invoked as black-box subprocesses.
//!
//! The fork sequence only ever talks to `git` and `gh` through the two
//! traits below, so tests can substitute recording fakes for the real
//! CLIs.

mod gh;
mod git;

pub use gh::GhCli;
pub use git::GitCli;

use crate::errors::CommandError;
use async_trait::async_trait;
use std::path::Path;

/// Version-control operations used by the fork sequence.
#[async_trait]
pub trait GitOps {
    /// `git clone --bare <url>` in the working directory.
    async fn clone_bare(&self, url: &str) -> Result<(), CommandError>;

    /// `git clone <extra_args...> <url>` in the working directory.
    async fn clone_with_args(&self, url: &str, extra_args: &[String]) -> Result<(), CommandError>;

    /// `git -C <repo_dir> push --mirror <remote_url>`.
    async fn push_mirror(&self, repo_dir: &Path, remote_url: &str) -> Result<(), CommandError>;

    /// Names of the remotes configured in the working directory.
    async fn list_remotes(&self) -> Result<Vec<String>, CommandError>;

    /// `git remote rename <from> <to>` in the working directory.
    async fn rename_remote(&self, from: &str, to: &str) -> Result<(), CommandError>;

    /// `git remote add <name> <url>`, optionally inside `repo_dir`.
    async fn add_remote(
        &self,
        repo_dir: Option<&Path>,
        name: &str,
        url: &str,
    ) -> Result<(), CommandError>;
}

/// Forge-side operations, backed by the `gh` CLI.
#[async_trait]
pub trait ForgeOps {
    /// Canonical URL of the repository the working directory belongs to.
    async fn current_repo_url(&self) -> Result<String, CommandError>;

    /// Create `<owner>/<name>` as a private repository.
    async fn create_private_repo(
        &self,
        full_name: &str,
        default_branch_only: bool,
    ) -> Result<(), CommandError>;

    /// Login of the authenticated user.
    async fn viewer_login(&self) -> Result<String, CommandError>;

    /// Username from the forge CLI's local configuration.
    async fn configured_login(&self) -> Result<String, CommandError>;
}
