use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nw_core::config::load_boards;
use nw_core::{collect_listing, ArticleSource, Dispatcher, WatchConfig};
use nw_notify::{EmailDispatcher, StdoutDispatcher};
use nw_scrappers::{init_logging, ListingScraper, WatchManager};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Watch university notice boards and mail new posts", long_about = None)]
pub struct Cli {
    /// State file holding the identities already seen per board
    #[arg(long, env = "STATE_PATH", default_value = "state.json")]
    state: PathBuf,
    /// State backend: json (the state file) or memory (nothing persisted)
    #[arg(long, default_value = "json")]
    storage: String,
    /// JSON file with the boards to watch, replacing the built-in list
    #[arg(long)]
    boards: Option<PathBuf>,
    /// Report every listed post of a board seen for the first time (also SEND_BACKLOG=true)
    #[arg(long)]
    send_backlog: bool,
    /// Summarizer for new posts: lead or none
    #[arg(long, env = "SUMMARIZER", default_value = "lead")]
    summarizer: String,
    /// Skip fetching post pages for summaries (also FETCH_SUMMARY=false)
    #[arg(long)]
    no_summary: bool,
    /// Print the message instead of mailing it. State is still saved.
    #[arg(long)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
enum Commands {
    /// Check all boards once and notify about new posts (default)
    Run,
    /// List the configured boards
    Boards,
    /// Print the current listing of one board without touching state
    Check {
        /// Board name or tag
        board: String,
    },
}

/// `true` iff the variable is set to "true", ignoring case.
fn env_flag(value: Option<String>) -> bool {
    value.map_or(false, |v| v.trim().eq_ignore_ascii_case("true"))
}

/// `false` iff the variable is set to "false", ignoring case.
fn env_enabled(value: Option<String>) -> bool {
    !value.map_or(false, |v| v.trim().eq_ignore_ascii_case("false"))
}

fn build_config(cli: &Cli) -> anyhow::Result<WatchConfig> {
    let mut config = WatchConfig::default()
        .with_send_backlog(cli.send_backlog || env_flag(std::env::var("SEND_BACKLOG").ok()))
        .with_summaries(!cli.no_summary && env_enabled(std::env::var("FETCH_SUMMARY").ok()));

    if let Some(path) = &cli.boards {
        config = config.with_boards(load_boards(path)?);
    }
    Ok(config)
}

async fn run(cli: &Cli, config: WatchConfig) -> anyhow::Result<()> {
    let store = nw_storage::create_storage(&cli.storage, &cli.state)?;
    let source = Arc::new(ListingScraper::new()?);
    let dispatcher: Arc<dyn Dispatcher> = if cli.dry_run {
        Arc::new(StdoutDispatcher)
    } else {
        Arc::new(EmailDispatcher::from_env())
    };

    info!(
        "🦗 Watching {} boards (backlog: {}, summaries: {}, state: {})",
        config.boards.len(),
        config.send_backlog,
        config.summarize,
        store.describe()
    );

    let summarizer = if config.summarize {
        nw_inference::create_model(&cli.summarizer)?
    } else {
        None
    };

    let mut manager = WatchManager::new(config, source, store, dispatcher);
    if let Some(summarizer) = summarizer {
        manager = manager.with_summarizer(summarizer);
    }

    let report = manager.run().await.context("watch run failed")?;
    for board in &report.boards {
        info!(
            "📋 {}: {} listed, {} new{}",
            board.board,
            board.listed,
            board.new,
            if board.seeded { " (seeded)" } else { "" }
        );
    }

    if cli.dry_run && report.dispatched {
        println!("Dry run: {} new posts", report.total_new);
    } else {
        println!("{}", report.summary_line());
    }
    Ok(())
}

fn list_boards(config: &WatchConfig) {
    for board in &config.boards {
        println!("{}\t[{}]\t{}", board.name, board.tag(), board.url);
    }
}

async fn check_board(config: &WatchConfig, name: &str) -> anyhow::Result<()> {
    let board = config
        .boards
        .iter()
        .find(|b| b.name == name || b.tag() == name)
        .with_context(|| format!("No board named {}", name))?;

    let scraper = ListingScraper::new()?;
    let articles = collect_listing(scraper.list_articles(board).await?);
    println!("{} ({} posts)", board.name, articles.len());
    for article in articles {
        println!(
            "{}\t{}\t{}\t{}",
            article.id,
            article.date.as_deref().unwrap_or("-"),
            article.title,
            article.url
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::Run => run(&cli, config).await,
        Commands::Boards => {
            list_boards(&config);
            Ok(())
        }
        Commands::Check { board } => check_board(&config, &board).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_flags() {
        assert!(env_flag(Some("true".to_string())));
        assert!(env_flag(Some("TRUE ".to_string())));
        assert!(!env_flag(Some("1".to_string())));
        assert!(!env_flag(Some("yes".to_string())));
        assert!(!env_flag(None));

        assert!(env_enabled(None));
        assert!(env_enabled(Some("true".to_string())));
        assert!(!env_enabled(Some("False".to_string())));
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["nw"]).unwrap();
        assert_eq!(cli.storage, "json");
        assert!(!cli.dry_run);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["nw", "--dry-run", "--send-backlog", "run"]).unwrap();
        assert!(cli.dry_run);
        assert!(cli.send_backlog);
        assert_eq!(cli.command, Some(Commands::Run));

        let cli = Cli::try_parse_from(["nw", "--state", "/tmp/s.json", "check", "학사"]).unwrap();
        assert_eq!(cli.state, PathBuf::from("/tmp/s.json"));
        assert_eq!(cli.command, Some(Commands::Check { board: "학사".to_string() }));

        assert!(Cli::try_parse_from(["nw", "scrape"]).is_err());
    }

    #[test]
    fn test_build_config_flags() {
        let cli = Cli::try_parse_from(["nw", "--send-backlog", "--no-summary"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert!(config.send_backlog);
        assert!(!config.summarize);
        assert_eq!(config.boards.len(), 6);
    }

    #[test]
    fn test_build_config_missing_board_file() {
        let cli = Cli::try_parse_from(["nw", "--boards", "/nonexistent/boards.json"]).unwrap();
        assert!(build_config(&cli).is_err());
    }
}
