use super::ForgeOps;
use crate::errors::CommandError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// The GitHub CLI. Repository creation streams through to the terminal;
/// the query commands capture their output instead.
pub struct GhCli {
    work_dir: PathBuf,
}

#[derive(Deserialize)]
struct RepoView {
    url: String,
}

impl GhCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), CommandError> {
        debug!(?args, "running gh");
        let status = Command::new("gh")
            .args(args)
            .current_dir(&self.work_dir)
            .status()
            .await
            .map_err(|source| CommandError::Spawn {
                program: "gh",
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                program: "gh",
                code: status.code().unwrap_or(-1),
            })
        }
    }

    async fn capture(&self, args: &[&str]) -> Result<Output, CommandError> {
        debug!(?args, "running gh");
        Command::new("gh")
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: "gh",
                source,
            })
    }

    fn login_from(output: Output) -> Result<String, CommandError> {
        if !output.status.success() {
            return Err(CommandError::Exit {
                program: "gh",
                code: output.status.code().unwrap_or(-1),
            });
        }
        let login = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if login.is_empty() {
            return Err(CommandError::Output {
                program: "gh",
                reason: "empty login".to_string(),
            });
        }
        Ok(login)
    }
}

#[async_trait]
impl ForgeOps for GhCli {
    async fn current_repo_url(&self) -> Result<String, CommandError> {
        let output = self.capture(&["repo", "view", "--json", "url"]).await?;
        if !output.status.success() {
            // surface gh's own diagnostics before failing
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
            return Err(CommandError::Exit {
                program: "gh",
                code: output.status.code().unwrap_or(-1),
            });
        }
        let view: RepoView =
            serde_json::from_slice(&output.stdout).map_err(|err| CommandError::Output {
                program: "gh",
                reason: err.to_string(),
            })?;
        Ok(view.url)
    }

    async fn create_private_repo(
        &self,
        full_name: &str,
        default_branch_only: bool,
    ) -> Result<(), CommandError> {
        let mut args = vec!["repo", "create", full_name, "--private"];
        if default_branch_only {
            args.push("--default-branch-only");
        }
        self.run(&args).await
    }

    async fn viewer_login(&self) -> Result<String, CommandError> {
        let output = self.capture(&["api", "user", "--jq", ".login"]).await?;
        Self::login_from(output)
    }

    async fn configured_login(&self) -> Result<String, CommandError> {
        let output = self.capture(&["config", "get", "github.user"]).await?;
        Self::login_from(output)
    }
}
