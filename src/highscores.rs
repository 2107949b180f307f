//! High score and survival leaderboard
//!
//! The high score is a single decimal number on disk. The leaderboard keeps
//! the top 10 survival runs as a JSON array, ranked by score (descending) then
//! time (ascending).

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEADERBOARD_ENTRIES, MAX_NAME_LEN};
use crate::persistence::{self, PersistError};

/// Name recorded when the player enters nothing usable
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player's name (alphanumeric, bounded length)
    pub name: String,
    /// Final score
    pub score: u64,
    /// Seconds survived
    #[serde(rename = "time")]
    pub time_secs: u64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u64, time_secs: u64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
            time_secs,
        }
    }

    /// Ranking order: higher score first, then faster time
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.time_secs.cmp(&other.time_secs))
    }
}

/// Keep alphanumeric characters only, capped at `MAX_NAME_LEN`
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(MAX_NAME_LEN)
        .collect();
    if cleaned.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        cleaned
    }
}

/// Ranked list of the best survival runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, sorting and trimming them into shape
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(LeaderboardEntry::rank_cmp);
        entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Self { entries }
    }

    /// Get the rank a run would achieve (1-indexed, None if it wouldn't place)
    pub fn potential_rank(&self, score: u64, time_secs: u64) -> Option<usize> {
        let probe = LeaderboardEntry {
            name: String::new(),
            score,
            time_secs,
        };
        let pos = self.insertion_point(&probe);
        (pos < MAX_LEADERBOARD_ENTRIES).then_some(pos + 1)
    }

    /// Add an entry, keeping the board sorted and trimmed to the top 10.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        // Equal entries keep arrival order: the newcomer goes after them
        let pos = self.insertion_point(&entry);
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        (pos < MAX_LEADERBOARD_ENTRIES).then_some(pos + 1)
    }

    fn insertion_point(&self, entry: &LeaderboardEntry) -> usize {
        self.entries
            .iter()
            .position(|e| entry.rank_cmp(e) == Ordering::Less)
            .unwrap_or(self.entries.len())
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top entry (if any)
    pub fn top(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }
}

/// Leaderboard bound to its file
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
    board: Leaderboard,
}

impl LeaderboardStore {
    /// Load standings, falling back to an empty board on a missing or corrupt file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let board = match Self::load(&path) {
            Ok(Some(board)) => {
                log::info!("Loaded {} leaderboard entries", board.len());
                board
            }
            Ok(None) => {
                log::info!("No leaderboard found, starting fresh");
                Leaderboard::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable leaderboard: {e}");
                Leaderboard::new()
            }
        };
        Self { path, board }
    }

    /// Read standings from disk without fallback
    pub fn load(path: &Path) -> Result<Option<Leaderboard>, PersistError> {
        let entries: Option<Vec<LeaderboardEntry>> = persistence::read_json(path)?;
        Ok(entries.map(Leaderboard::from_entries))
    }

    /// Record a finished run and persist the board
    pub fn record(
        &mut self,
        name: &str,
        score: u64,
        time_secs: u64,
    ) -> Result<Option<usize>, PersistError> {
        let rank = self
            .board
            .record(LeaderboardEntry::new(name, score, time_secs));
        persistence::write_json(&self.path, &self.board)?;
        log::info!(
            "Leaderboard saved ({} entries, new rank {:?})",
            self.board.len(),
            rank
        );
        Ok(rank)
    }

    pub fn board(&self) -> &Leaderboard {
        &self.board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.board.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Best score ever, bound to its file
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u64,
}

impl HighScoreStore {
    /// Load the high score, falling back to 0 on a missing or corrupt file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match persistence::read_number(&path) {
            Ok(Some(best)) => best,
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {e}");
                0
            }
        };
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Persist `score` if it beats the stored value. Returns whether it did.
    pub fn submit(&mut self, score: u64) -> Result<bool, PersistError> {
        if score <= self.best {
            return Ok(false);
        }
        persistence::write_number(&self.path, score)?;
        log::info!("New high score {} (was {})", score, self.best);
        self.best = score;
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
