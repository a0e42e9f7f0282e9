//! Per-size progress tracking.

use crate::config::SUPPORTED_SIZES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics for one board size.
///
/// A `best_time` of zero means no recorded completion yet. `achievements`
/// keeps insertion order and never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub puzzles_completed: u32,
    pub total_time: u64,
    pub average_time: u64,
    pub best_time: u64,
    pub hints_used: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub achievements: Vec<String>,
    pub last_played: Option<u64>,
}

impl ProgressStats {
    /// Fold one completed puzzle into the stats.
    pub fn record_completion(&mut self, time_seconds: u64, hints_used: u32, completed_at: u64) {
        self.puzzles_completed += 1;
        self.total_time += time_seconds;
        self.average_time = self.total_time / u64::from(self.puzzles_completed);
        self.best_time = if self.best_time == 0 {
            time_seconds
        } else {
            self.best_time.min(time_seconds)
        };
        self.hints_used += hints_used;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
        self.last_played = Some(completed_at);
    }

    /// Add an achievement tag if it is not already present. Returns whether
    /// anything changed.
    pub fn add_achievement(&mut self, tag: &str) -> bool {
        if self.achievements.iter().any(|a| a == tag) {
            return false;
        }
        self.achievements.push(tag.to_string());
        true
    }
}

/// A partial stats record, merged field by field into [`ProgressStats`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub puzzles_completed: Option<u32>,
    pub total_time: Option<u64>,
    pub average_time: Option<u64>,
    pub best_time: Option<u64>,
    pub hints_used: Option<u32>,
    pub current_streak: Option<u32>,
    pub best_streak: Option<u32>,
    pub last_played: Option<u64>,
}

impl ProgressStats {
    /// Overlay the provided fields of `update` onto the stats.
    pub fn apply(&mut self, update: &ProgressUpdate) {
        if let Some(v) = update.puzzles_completed {
            self.puzzles_completed = v;
        }
        if let Some(v) = update.total_time {
            self.total_time = v;
        }
        if let Some(v) = update.average_time {
            self.average_time = v;
        }
        if let Some(v) = update.best_time {
            self.best_time = v;
        }
        if let Some(v) = update.hints_used {
            self.hints_used = v;
        }
        if let Some(v) = update.current_streak {
            self.current_streak = v;
        }
        if let Some(v) = update.best_streak {
            self.best_streak = v;
        }
        if let Some(v) = update.last_played {
            self.last_played = Some(v);
        }
    }
}

/// Zeroed stats for every supported size. Sessions and migrations both
/// start from this, so the progress map is never missing a size key.
pub fn default_progress() -> BTreeMap<usize, ProgressStats> {
    SUPPORTED_SIZES
        .iter()
        .map(|&size| (size, ProgressStats::default()))
        .collect()
}

/// Format seconds as MM:SS, or H:MM:SS past an hour.
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
