use serde::{Deserialize, Serialize};

/// A listing entry as it comes off the page, before an identity is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub title: String,
    pub date: Option<String>,
    pub url: String,
}

/// A listed post with its resolved identity.
///
/// Articles are rebuilt from the live page on every run and never persisted;
/// only their identities end up in [`crate::SeenState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Board-local date text (e.g. `2024.03.02`), kept as-is.
    pub date: Option<String>,
    pub url: String,
    /// Only filled for posts classified as new in this run.
    pub summary: Option<String>,
}

impl Article {
    pub fn from_raw(id: String, raw: RawArticle) -> Self {
        Self {
            id,
            title: raw.title,
            date: raw.date,
            url: raw.url,
            summary: None,
        }
    }
}

/// A notice board to watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Stable key in the state file.
    pub name: String,
    /// Short label used in the mail subject; falls back to `name`.
    #[serde(default)]
    pub tag: Option<String>,
    /// First listing page of the board.
    pub url: String,
}

impl Board {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag.into()),
            url: url.into(),
        }
    }

    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.name)
    }
}

/// New posts found on one board, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPosts {
    pub board: Board,
    pub posts: Vec<Article>,
}

/// New posts of a run, in configured board order. Boards without new posts
/// are kept with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPostsByBoard {
    boards: Vec<BoardPosts>,
}

impl NewPostsByBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, board: Board, posts: Vec<Article>) {
        self.boards.push(BoardPosts { board, posts });
    }

    pub fn total(&self) -> usize {
        self.boards.iter().map(|b| b.posts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardPosts> {
        self.boards.iter()
    }

    /// Boards that contributed at least one post.
    pub fn active(&self) -> impl Iterator<Item = &BoardPosts> {
        self.boards.iter().filter(|b| !b.posts.is_empty())
    }

    pub fn get(&self, board_name: &str) -> Option<&[Article]> {
        self.boards
            .iter()
            .find(|b| b.board.name == board_name)
            .map(|b| b.posts.as_slice())
    }
}
