//! High score leaderboard system
//!
//! In-memory top 5, seeded with the house chefs. Resets with the process.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Leaderboard the game opens with
const SEED_SCORES: [(&str, u64); 3] = [
    ("Chef Luigi", 5250),
    ("Pizza Pete", 4100),
    ("Mama Mia", 3800),
];

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub id: u64,
    pub name: String,
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
    next_id: u64,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Leaderboard with the three house entries
    pub fn seeded() -> Self {
        let mut scores = Self::new();
        for (name, score) in SEED_SCORES {
            scores.insert(name, score);
        }
        scores
    }

    /// Entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry outright
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        // Ties rank below existing entries
        let rank = self.entries.iter().filter(|e| e.score >= score).count();
        Some(rank + 1)
    }

    /// Add a score if it qualifies
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn record_if_qualifying(&mut self, score: u64, name: &str) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let id = self.insert(name, score);
        self.entries.iter().position(|e| e.id == id).map(|i| i + 1)
    }

    /// Append, stable-sort descending, trim. Returns the new entry's ID.
    fn insert(&mut self, name: &str, score: u64) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.entries.push(HighScoreEntry {
            id,
            name: name.to_string(),
            score,
        });
        // sort_by is stable: equal scores keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
        id
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
