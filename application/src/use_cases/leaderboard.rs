//! Couple leaderboard
//!
//! Complete couples ranked by total XP. Ties go to the older couple.

use super::shared::ErrorStatus;
use crate::ports::repositories::Repositories;
use crate::ports::store_error::StoreError;
use couplequest_domain::{Couple, CoupleId, DEFAULT_PARTNER_NAME, UserId};
use serde::Serialize;
use std::cmp::Reverse;
use thiserror::Error;

/// Number of couples shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}

impl LeaderboardError {
    pub fn status(&self) -> ErrorStatus {
        ErrorStatus::Internal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub couple_id: CoupleId,
    /// "Creator & Partner" display names.
    pub names: String,
    pub streak: u32,
    pub score: u64,
    pub level: u64,
}

pub struct LeaderboardUseCase {
    repos: Repositories,
}

impl LeaderboardUseCase {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn execute(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut couples: Vec<Couple> = self
            .repos
            .couples
            .list_all()
            .await?
            .into_iter()
            .filter(Couple::is_complete)
            .collect();
        couples.sort_by_key(|c| (Reverse(c.progress.total_xp), c.id));
        couples.truncate(LEADERBOARD_SIZE);

        let mut entries = Vec::with_capacity(couples.len());
        for (i, couple) in couples.into_iter().enumerate() {
            let mut names = Vec::with_capacity(2);
            for member in couple.members() {
                names.push(self.display_name(member).await?);
            }
            entries.push(LeaderboardEntry {
                rank: i + 1,
                couple_id: couple.id,
                names: names.join(" & "),
                streak: couple.progress.streak,
                score: couple.progress.total_xp,
                level: couple.progress.level,
            });
        }
        Ok(entries)
    }

    async fn display_name(&self, user: &UserId) -> Result<String, LeaderboardError> {
        Ok(self
            .repos
            .profiles
            .find(user)
            .await?
            .map_or_else(
                || DEFAULT_PARTNER_NAME.to_string(),
                |p| p.display_name_or_default().to_string(),
            ))
    }
}
