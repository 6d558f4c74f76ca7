//! cardstack - a terminal Kanban board.
//!
//! Opens a local `.cardstack.yaml` board, a board picked from the projects
//! found below the current directory, or a GitHub Projects v2 board.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cardstack_config::{Config, ProjectRef, auth::resolve_token};
use cardstack_github::{GitHubBackend, GitHubClient, list_projects};
use cardstack_protocol::{Backend, Board};
use cardstack_store::{BOARD_FILE_NAME, LocalBackend, Project, scan_projects};
use cardstack_tui::{App, terminal};

/// Environment variable holding a log filter directive.
const LOG_ENV_VAR: &str = "CARDSTACK_LOG";

#[derive(Debug, Parser)]
#[command(name = "cardstack", version, about)]
struct Cli {
    /// Board file to open instead of searching the current directory.
    #[arg(long, value_name = "PATH", conflicts_with = "github")]
    board: Option<PathBuf>,

    /// GitHub project to open, as `owner/number` or `owner/repo/number`.
    #[arg(long, value_name = "PROJECT")]
    github: Option<ProjectRef>,

    /// Configuration file to use instead of the default locations.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the GitHub projects of OWNER and exit.
    #[arg(long, value_name = "OWNER")]
    list_projects: Option<String>,
}

/// Where the board comes from, once the command line and config are applied.
enum Source {
    Remote(ProjectRef),
    File(PathBuf),
    Scan,
}

impl Source {
    fn select(cli: &Cli, config: &Config) -> Self {
        if let Some(project) = cli.github.clone() {
            return Self::Remote(project);
        }
        if let Some(path) = &cli.board {
            return Self::File(path.clone());
        }
        match &config.github_project {
            Some(project) => Self::Remote(project.clone()),
            None => Self::Scan,
        }
    }
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cardstack")
        .join("cardstack.log")
}

/// Sends logs to a file, since the terminal belongs to the board.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().await.context("failed to load config")?,
    };
    Ok(config)
}

async fn github_client(config: &Config) -> anyhow::Result<GitHubClient> {
    let token = resolve_token(config.github_token.as_deref())
        .await
        .map(SecretString::from);
    GitHubClient::new(token)
        .await
        .context("failed to create GitHub client")
}

async fn print_projects(config: &Config, owner: &str) -> anyhow::Result<()> {
    let client = github_client(config).await?;
    let projects = list_projects(&client, owner)
        .await
        .with_context(|| format!("failed to list projects of {owner}"))?;

    if projects.is_empty() {
        println!("No projects found for {owner}");
    }
    for project in projects {
        let closed = if project.closed { " (closed)" } else { "" };
        println!("{owner}/{}\t{}{closed}\n\t{}", project.number, project.title, project.url);
    }
    Ok(())
}

/// Opens a local board file, writing the sample board first if it is
/// missing.
async fn open_local(path: &Path) -> anyhow::Result<(Board, Box<dyn Backend>)> {
    let backend = LocalBackend::new(path);
    if backend
        .initialize()
        .with_context(|| format!("failed to create {}", path.display()))?
    {
        info!(path = %path.display(), "created new board file");
    }
    let board = backend
        .load_board()
        .await
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok((board, Box::new(backend)))
}

async fn build_app(cli: &Cli, config: &Config) -> anyhow::Result<App> {
    match Source::select(cli, config) {
        Source::Remote(project) => {
            let client = github_client(config).await?;
            let backend = GitHubBackend::new(client, project.owner(), project.number());
            let board = backend
                .load_board()
                .await
                .with_context(|| format!("failed to load GitHub project {project}"))?;
            info!(%project, cards = board.len(), "opened remote board");
            Ok(App::new(board, Some(Box::new(backend)), config))
        }
        Source::File(path) => {
            let (board, backend) = open_local(&path).await?;
            Ok(App::new(board, Some(backend), config))
        }
        Source::Scan => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            let projects: Vec<Project> = scan_projects(&cwd);
            info!(count = projects.len(), dir = %cwd.display(), "scanned for projects");
            let path = projects
                .first()
                .map_or_else(|| cwd.join(BOARD_FILE_NAME), |project| project.path.clone());
            let (board, backend) = open_local(&path).await?;
            Ok(App::new(board, Some(backend), config).with_projects(projects, cwd))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let config = load_config(&cli).await?;

    if let Some(owner) = &cli.list_projects {
        return print_projects(&config, owner).await;
    }

    let mut app = build_app(&cli, &config).await?;

    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let result = app.run(&mut terminal).await;

    // Restore even if the loop failed.
    terminal::restore_terminal(&mut terminal)?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_github_project() {
        let cli = Cli::try_parse_from(["cardstack", "--github", "acme/api/3", "-vv"]).unwrap();
        assert_eq!(cli.github, Some(ProjectRef::new("acme", 3).with_repo("api")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_rejects_board_with_github() {
        let result = Cli::try_parse_from(["cardstack", "--board", "b.yaml", "--github", "acme/1"]);
        assert!(result.is_err());
    }

    #[test]
    fn command_line_overrides_config_project() {
        let config = Config {
            github_project: Some(ProjectRef::new("acme", 1)),
            ..Config::default()
        };

        let cli = Cli::try_parse_from(["cardstack", "--board", "b.yaml"]).unwrap();
        assert!(matches!(Source::select(&cli, &config), Source::File(_)));

        let cli = Cli::try_parse_from(["cardstack"]).unwrap();
        assert!(matches!(Source::select(&cli, &config), Source::Remote(p) if p.number() == 1));

        let cli = Cli::try_parse_from(["cardstack"]).unwrap();
        assert!(matches!(Source::select(&cli, &Config::default()), Source::Scan));
    }

    #[tokio::test]
    async fn missing_board_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BOARD_FILE_NAME);

        let (board, backend) = open_local(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(board.name, "My Project");
        assert!(!backend.is_remote());
    }
}
