use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identities already observed, per board name, most recently observed first.
///
/// This is the only thing that survives between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenState {
    boards: BTreeMap<String, Vec<String>>,
}

impl SeenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_board(&self, board: &str) -> bool {
        self.boards.contains_key(board)
    }

    pub fn ids(&self, board: &str) -> Option<&[String]> {
        self.boards.get(board).map(Vec::as_slice)
    }

    pub fn set(&mut self, board: impl Into<String>, ids: Vec<String>) {
        self.boards.insert(board.into(), ids);
    }

    pub fn boards(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.boards.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for SeenState {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self {
            boards: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let state: SeenState = [("학사공지", vec!["100".to_string(), "99".to_string()])]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"학사공지":["100","99"]}"#);

        let back: SeenState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.ids("학사공지").unwrap(), ["100", "99"]);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(serde_json::from_str::<SeenState>(r#"{"a": "100"}"#).is_err());
        assert!(serde_json::from_str::<SeenState>(r#"["100"]"#).is_err());
        assert!(serde_json::from_str::<SeenState>(r#"{"a": [100]}"#).is_err());
    }

    #[test]
    fn test_set_and_lookup() {
        let mut state = SeenState::new();
        assert!(state.is_empty());
        assert!(!state.contains_board("a"));

        state.set("a", vec![]);
        assert!(state.contains_board("a"));
        assert_eq!(state.ids("a").map(|ids| ids.len()), Some(0));
        assert_eq!(state.len(), 1);
    }
}
