use std::sync::Arc;

use nw_core::{
    collect_listing, detect, Article, ArticleSource, Board, Detection, Dispatcher, NewPostsByBoard,
    Result, SeenState, StateStore, Summarizer, WatchConfig,
};
use tracing::{debug, info};

use crate::logging::Logger;

/// Where a run currently is. A run only moves forward; any error ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    LoadingState,
    ProcessingBoards,
    PersistingState,
    Notifying,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardReport {
    pub board: String,
    pub listed: usize,
    pub new: usize,
    /// First sighting with backlog suppressed.
    pub seeded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub boards: Vec<BoardReport>,
    pub total_new: usize,
    pub dispatched: bool,
}

impl RunReport {
    pub fn summary_line(&self) -> String {
        if self.dispatched {
            format!("Sent email: {} new posts", self.total_new)
        } else {
            "No new posts".to_string()
        }
    }
}

/// Runs one watch cycle: load state, check every board in order, save state,
/// then send a single message if anything new turned up.
pub struct WatchManager {
    config: WatchConfig,
    source: Arc<dyn ArticleSource>,
    store: Arc<dyn StateStore>,
    dispatcher: Arc<dyn Dispatcher>,
    summarizer: Option<Arc<dyn Summarizer>>,
    logger: Logger,
}

impl WatchManager {
    pub fn new(
        config: WatchConfig,
        source: Arc<dyn ArticleSource>,
        store: Arc<dyn StateStore>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            dispatcher,
            summarizer: None,
            logger: Logger::new(),
        }
    }

    /// Summaries are only requested when the config also asks for them.
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    fn enter(&self, phase: RunPhase) {
        debug!(?phase, "run phase");
    }

    pub async fn run(&self) -> Result<RunReport> {
        self.enter(RunPhase::Idle);

        self.enter(RunPhase::LoadingState);
        let mut state = self.store.load().await?;
        self.logger.info(&format!(
            "💾 Loaded state for {} boards from {}",
            state.len(),
            self.store.describe()
        ));

        self.enter(RunPhase::ProcessingBoards);
        let mut report = RunReport::default();
        let mut new_posts = NewPostsByBoard::new();
        for board in &self.config.boards {
            let (board_report, posts) = self.process_board(&mut state, board).await?;
            report.boards.push(board_report);
            new_posts.push(board.clone(), posts);
        }

        self.enter(RunPhase::PersistingState);
        self.store.save(&state).await?;
        self.logger.info(&format!("💾 State saved to {}", self.store.describe()));

        report.total_new = new_posts.total();
        if report.total_new > 0 {
            self.enter(RunPhase::Notifying);
            self.dispatcher.dispatch(&new_posts).await?;
            self.logger.info(&format!(
                "✉️ Dispatched {} new posts via {}",
                report.total_new,
                self.dispatcher.name()
            ));
            report.dispatched = true;
        }

        self.enter(RunPhase::Done);
        Ok(report)
    }

    async fn process_board(
        &self,
        state: &mut SeenState,
        board: &Board,
    ) -> Result<(BoardReport, Vec<Article>)> {
        let logger = self.logger.clone().with_prefix(format!("[{}]", board.name));

        let raw = self.source.list_articles(board).await?;
        let articles = collect_listing(raw);
        logger.debug(&format!("Listed {} posts", articles.len()));

        let detection = detect(
            state,
            &board.name,
            &articles,
            self.config.send_backlog,
            &self.config.policy,
        );

        let seeded = matches!(detection, Detection::Seeded { .. });
        if let Detection::Seeded { retained } = detection {
            logger.info(&format!("🌱 First run, stored {} posts without notifying", retained));
        }

        let mut posts = detection.into_new_posts();
        if !posts.is_empty() {
            logger.info(&format!("🆕 {} new posts", posts.len()));
            self.summarize(&logger, &mut posts).await;
        }

        let board_report = BoardReport {
            board: board.name.clone(),
            listed: articles.len(),
            new: posts.len(),
            seeded,
        };
        Ok((board_report, posts))
    }

    async fn summarize(&self, logger: &Logger, posts: &mut [Article]) {
        let summarizer = match (&self.summarizer, self.config.summarize) {
            (Some(summarizer), true) => summarizer,
            _ => return,
        };

        for post in posts.iter_mut() {
            match summarizer.summarize(post).await {
                Ok(summary) => post.summary = Some(summary),
                Err(e) => {
                    logger.warn(&format!("⚠️ No summary for {}: {}", post.url, e));
                    post.summary = Some(String::new());
                }
            }
        }
        info!("🤖 Summarized {} posts with {}", posts.len(), summarizer.name());
    }
}
