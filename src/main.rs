use anyhow::{Context, Result};
use clap::Parser;
use private_fork::fork::{self, DEFAULT_REMOTE_NAME, ExecContext, ForkOptions};
use private_fork::ops::{GhCli, GitCli};
use tracing_subscriber::EnvFilter;

/// Create a private fork of a repository.
///
/// With no argument, creates a private fork of the current repository.
/// Otherwise, forks the specified repository, given as an HTTPS URL, an
/// SSH URL, or OWNER/REPO shorthand.
///
/// The fork is created by mirror-pushing a bare clone of the source into a
/// fresh private repository, so the full history and all refs carry over.
/// Additional `git clone` flags for the `--clone` step can be passed after
/// `--`.
#[derive(Parser)]
#[command(name = "private-fork", version)]
pub struct Cli {
    /// Repository to fork (defaults to the current repository)
    pub repository: Option<String>,

    /// Extra flags passed through to `git clone`
    #[arg(last = true)]
    pub git_args: Vec<String>,

    /// Clone the fork
    #[arg(long)]
    pub clone: bool,

    /// Add a git remote for the fork
    #[arg(long)]
    pub remote: bool,

    /// Specify the name for the new remote
    #[arg(long, default_value = DEFAULT_REMOTE_NAME)]
    pub remote_name: String,

    /// Create the fork in an organization
    #[arg(long)]
    pub org: Option<String>,

    /// Rename the forked repository
    #[arg(long)]
    pub fork_name: Option<String>,

    /// Only include the default branch in the fork
    #[arg(long)]
    pub default_branch_only: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.repository.is_none() && !cli.git_args.is_empty() {
        anyhow::bail!("repository argument required when passing git clone flags");
    }

    let work_dir = std::env::current_dir().context("Failed to get current directory")?;
    let ctx = ExecContext::new(&work_dir);
    let opts = ForkOptions {
        repository: cli.repository,
        git_args: cli.git_args,
        clone: cli.clone,
        remote: cli.remote,
        remote_name: cli.remote_name,
        organization: cli.org,
        fork_name: cli.fork_name,
        default_branch_only: cli.default_branch_only,
    };

    let git = GitCli::new(&work_dir);
    let forge = GhCli::new(&work_dir);
    fork::run(&opts, &ctx, &git, &forge).await
}
