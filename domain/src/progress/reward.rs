//! The reward rule applied when a daily question is completed.
//!
//! # Level increments
//!
//! The level is not derived from total XP. Each completion adds
//! `floor((previous_total_xp + award) / XP_PER_LEVEL)` to the stored level,
//! so once a couple passes 100 XP every further completion raises the level
//! again, possibly by several tiers at once.

use serde::{Deserialize, Serialize};

/// XP granted to a couple when both partners answer a daily question.
pub const DAILY_QUESTION_XP: u64 = 10;

/// Divisor used by the level increment.
pub const XP_PER_LEVEL: u64 = 100;

/// Progression counters shared by both partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Number of completed daily questions in a row.
    pub streak: u32,
    /// Cumulative XP.
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub level: u64,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            streak: 0,
            total_xp: 0,
            level: 1,
        }
    }
}

/// Result of [`Progress::reward`]: the counters before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub award: u64,
    pub before: Progress,
    pub after: Progress,
}

impl Reward {
    /// Levels gained by this reward.
    pub fn levels_gained(&self) -> u64 {
        self.after.level - self.before.level
    }
}

impl Progress {
    pub fn new(streak: u32, total_xp: u64, level: u64) -> Self {
        Self {
            streak,
            total_xp,
            level,
        }
    }

    /// Apply a completion award.
    ///
    /// Streak grows by one, XP by `award`, and the level by
    /// `floor((total_xp + award) / XP_PER_LEVEL)`.
    pub fn reward(self, award: u64) -> Reward {
        let new_total = self.total_xp.saturating_add(award);
        let after = Progress {
            streak: self.streak.saturating_add(1),
            total_xp: new_total,
            level: self.level.saturating_add(new_total / XP_PER_LEVEL),
        };
        Reward {
            award,
            before: self,
            after,
        }
    }
}
