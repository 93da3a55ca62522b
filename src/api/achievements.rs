use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::services::achievement::{self, AchievementDef, AchievementState, UserAchievementRecord};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserAchievements {
    pub total_achievements: usize,
    pub earned_count: usize,
    pub achievements: Vec<UserAchievementRecord>,
}

/// Server-side rollup; authoritative over [`achievement::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStatsPayload {
    pub total_achievements: usize,
    pub earned_achievements: usize,
    pub completion_percentage: f64,
    pub xp_from_achievements: i64,
    #[serde(default)]
    pub user_total_xp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewlyEarnedAchievement {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub xp_reward: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AchievementCheck {
    pub message: String,
    #[serde(default)]
    pub newly_earned: Vec<NewlyEarnedAchievement>,
}

impl ApiClient {
    pub async fn achievement_catalog(&self) -> Result<Vec<AchievementDef>, ApiError> {
        self.get_json("/api/achievements/", Vec::new()).await
    }

    pub async fn user_achievements(&self) -> Result<UserAchievements, ApiError> {
        self.get_json("/api/achievements/user", Vec::new()).await
    }

    pub async fn achievement_stats(&self) -> Result<AchievementStatsPayload, ApiError> {
        self.get_json("/api/achievements/stats", Vec::new()).await
    }

    pub async fn check_achievements(&self) -> Result<AchievementCheck, ApiError> {
        self.post_json("/api/achievements/check", &serde_json::json!({}))
            .await
    }

    /// Catalog and per-user records, fetched together and merged.
    pub async fn achievement_overview(&self) -> Result<Vec<AchievementState>, ApiError> {
        let (catalog, user) = tokio::try_join!(self.achievement_catalog(), self.user_achievements())?;
        Ok(achievement::merge(&catalog, &user.achievements))
    }
}
