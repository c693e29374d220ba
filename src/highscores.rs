//! High score leaderboard
//!
//! Keeps the top 10 runs. Where the table lives is up to the host; this
//! module only converts it to and from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    /// Level reached
    pub level: u32,
    pub difficulty: Difficulty,
    /// Whether the run reached the win score
    #[serde(default)]
    pub won: bool,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending by score; ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        // Don't trust stored order or length
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    /// Parse a stored table, starting fresh if it is unreadable
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32) -> HighScoreEntry {
        HighScoreEntry {
            name: "Player".to_string(),
            score,
            level: 1,
            difficulty: Difficulty::Medium,
            won: false,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(10));
    }

    #[test]
    fn test_insert_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(50)), Some(1));
        assert_eq!(scores.add_score(entry(120)), Some(1));
        assert_eq!(scores.add_score(entry(80)), Some(2));
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![120, 80, 50]);
        assert_eq!(scores.top_score(), Some(120));
    }

    #[test]
    fn test_table_caps_at_ten() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(entry(i * 10));
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(15), Some(10));
        assert_eq!(scores.add_score(entry(5)), None);

        assert_eq!(scores.add_score(entry(1000)), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut scores = HighScores::new();
        scores.add_score(entry(100));
        assert_eq!(scores.potential_rank(100), Some(2));
    }

    #[test]
    fn test_json_load_resorts_and_tolerates_garbage() {
        let mut unsorted = HighScores::new();
        unsorted.entries = vec![entry(10), entry(90), entry(40)];
        let json = unsorted.to_json().unwrap();
        let loaded = HighScores::from_json(&json).unwrap();
        assert_eq!(loaded.top_score(), Some(90));

        assert!(HighScores::from_json_or_default("{oops").is_empty());
    }
}
