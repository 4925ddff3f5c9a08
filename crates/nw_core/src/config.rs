use std::path::Path;

use crate::types::Board;
use crate::{Error, Result};

/// Limits applied by the change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Identities stored when a board is first seen and its backlog is suppressed.
    pub seed_count: usize,
    /// Maximum new posts reported per board per run.
    pub per_run_cap: usize,
    /// Maximum identities retained per board.
    pub state_cap: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            seed_count: 300,
            per_run_cap: 50,
            state_cap: 500,
        }
    }
}

/// Everything a run needs to know up front. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub boards: Vec<Board>,
    /// Report the whole current listing of a never-seen board instead of seeding it silently.
    pub send_backlog: bool,
    /// Fetch detail pages of new posts for a short summary.
    pub summarize: bool,
    pub policy: Policy,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            boards: default_boards(),
            send_backlog: false,
            summarize: true,
            policy: Policy::default(),
        }
    }
}

impl WatchConfig {
    pub fn with_boards(mut self, boards: Vec<Board>) -> Self {
        self.boards = boards;
        self
    }

    pub fn with_send_backlog(mut self, send_backlog: bool) -> Self {
        self.send_backlog = send_backlog;
        self
    }

    pub fn with_summaries(mut self, summarize: bool) -> Self {
        self.summarize = summarize;
        self
    }

    pub fn board(&self, name: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.name == name)
    }
}

/// The university notice boards watched when no board file is given.
pub fn default_boards() -> Vec<Board> {
    vec![
        Board::new("일반공지", "일반", "https://www.mju.ac.kr/mjukr/255/subview.do?fnctId=bbs&fnctNo=141"),
        Board::new("행사공지", "행사", "https://www.mju.ac.kr/mjukr/256/subview.do?fnctId=bbs&fnctNo=142"),
        Board::new("학사공지", "학사", "https://www.mju.ac.kr/mjukr/257/subview.do?fnctId=bbs&fnctNo=143"),
        Board::new("장학/학자금공지", "장학", "https://www.mju.ac.kr/mjukr/259/subview.do?fnctId=bbs&fnctNo=145"),
        Board::new("진로/취업/창업공지", "진로", "https://www.mju.ac.kr/mjukr/260/subview.do?fnctId=bbs&fnctNo=146"),
        Board::new("학생활동공지", "활동", "https://www.mju.ac.kr/mjukr/5364/subview.do?fnctId=bbs&fnctNo=853"),
    ]
}

/// Reads a JSON array of `{"name", "tag"?, "url"}` objects.
pub fn load_boards(path: &Path) -> Result<Vec<Board>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read board file {}: {}", path.display(), e)))?;
    parse_boards(&text)
}

pub fn parse_boards(text: &str) -> Result<Vec<Board>> {
    let boards: Vec<Board> = serde_json::from_str(text)
        .map_err(|e| Error::Config(format!("Invalid board list: {}", e)))?;

    if boards.is_empty() {
        return Err(Error::Config("Board list is empty".to_string()));
    }
    for board in &boards {
        url::Url::parse(&board.url)
            .map_err(|e| Error::Config(format!("Invalid URL for board {}: {}", board.name, e)))?;
    }
    for (i, board) in boards.iter().enumerate() {
        if boards[..i].iter().any(|b| b.name == board.name) {
            return Err(Error::Config(format!("Duplicate board name: {}", board.name)));
        }
    }
    Ok(boards)
}
