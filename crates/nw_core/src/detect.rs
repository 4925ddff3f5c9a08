//! Change detection: decide which listed posts are new and fold the listing
//! into the seen-state.

use std::collections::HashSet;

use crate::config::Policy;
use crate::state::SeenState;
use crate::types::Article;

/// What happened to one board in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// First sighting with backlog suppressed: state seeded, nothing reported.
    Seeded { retained: usize },
    /// New posts, oldest first. May be empty.
    Checked { new: Vec<Article> },
}

impl Detection {
    pub fn new_posts(&self) -> &[Article] {
        match self {
            Detection::Seeded { .. } => &[],
            Detection::Checked { new } => new,
        }
    }

    pub fn into_new_posts(self) -> Vec<Article> {
        match self {
            Detection::Seeded { .. } => Vec::new(),
            Detection::Checked { new } => new,
        }
    }
}

/// Classifies `articles` (newest first, as returned by
/// [`crate::identity::collect_listing`]) for `board` and updates `state`.
///
/// Only the first `per_run_cap` new posts are reported. The rest are still
/// merged into the state and will never be reported later.
pub fn detect(
    state: &mut SeenState,
    board: &str,
    articles: &[Article],
    send_backlog: bool,
    policy: &Policy,
) -> Detection {
    let ids: Vec<String> = articles.iter().map(|a| a.id.clone()).collect();

    if !state.contains_board(board) && !send_backlog {
        let seeded: Vec<String> = ids.into_iter().take(policy.seed_count).collect();
        let retained = seeded.len();
        state.set(board, seeded);
        return Detection::Seeded { retained };
    }

    let previous = state.ids(board).unwrap_or(&[]);
    let seen: HashSet<&str> = previous.iter().map(String::as_str).collect();

    let mut new: Vec<Article> = articles
        .iter()
        .filter(|a| !seen.contains(a.id.as_str()))
        .take(policy.per_run_cap)
        .cloned()
        .collect();
    new.reverse();

    let merged = merge_identities(&ids, previous, policy.state_cap);
    state.set(board, merged);

    Detection::Checked { new }
}

/// Current identities first, then previously seen ones in their prior order,
/// without duplicates, cut to `cap`.
pub fn merge_identities(current: &[String], previous: &[String], cap: usize) -> Vec<String> {
    let mut taken: HashSet<&str> = HashSet::with_capacity(current.len() + previous.len());
    current
        .iter()
        .chain(previous.iter())
        .filter(|id| taken.insert(id.as_str()))
        .take(cap)
        .cloned()
        .collect()
}
