use super::GitOps;
use crate::errors::CommandError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// The `git` CLI. Mutating invocations inherit stdout/stderr so the user
/// sees clone and push progress live.
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), CommandError> {
        debug!(?args, "running git");
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .status()
            .await
            .map_err(|source| CommandError::Spawn {
                program: "git",
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                program: "git",
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

#[async_trait]
impl GitOps for GitCli {
    async fn clone_bare(&self, url: &str) -> Result<(), CommandError> {
        self.run(&["clone", "--bare", url]).await
    }

    async fn clone_with_args(&self, url: &str, extra_args: &[String]) -> Result<(), CommandError> {
        let mut args: Vec<&str> = vec!["clone"];
        args.extend(extra_args.iter().map(String::as_str));
        args.push(url);
        self.run(&args).await
    }

    async fn push_mirror(&self, repo_dir: &Path, remote_url: &str) -> Result<(), CommandError> {
        let dir = repo_dir.to_string_lossy();
        self.run(&["-C", dir.as_ref(), "push", "--mirror", remote_url])
            .await
    }

    async fn list_remotes(&self) -> Result<Vec<String>, CommandError> {
        debug!("listing git remotes");
        let output = Command::new("git")
            .arg("remote")
            .current_dir(&self.work_dir)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: "git",
                source,
            })?;
        if !output.status.success() {
            return Err(CommandError::Exit {
                program: "git",
                code: output.status.code().unwrap_or(-1),
            });
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    async fn rename_remote(&self, from: &str, to: &str) -> Result<(), CommandError> {
        self.run(&["remote", "rename", from, to]).await
    }

    async fn add_remote(
        &self,
        repo_dir: Option<&Path>,
        name: &str,
        url: &str,
    ) -> Result<(), CommandError> {
        match repo_dir {
            Some(dir) => {
                let dir = dir.to_string_lossy();
                self.run(&["-C", dir.as_ref(), "remote", "add", name, url])
                    .await
            }
            None => self.run(&["remote", "add", name, url]).await,
        }
    }
}
