use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::check_range;
use super::{ApiClient, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardKind {
    Global,
    Weekly,
    Monthly,
    Friends,
}

impl LeaderboardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Friends => "friends",
        }
    }
}

impl fmt::Display for LeaderboardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "friends" => Ok(Self::Friends),
            other => Err(format!(
                "unknown leaderboard '{other}', expected global, weekly, monthly or friends"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub total_xp: i64,
    #[serde(default)]
    pub problems_solved: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub title: String,
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardSnapshot {
    pub count: u32,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardStats {
    pub global: BoardSnapshot,
    pub weekly: BoardSnapshot,
    pub monthly: BoardSnapshot,
}

/// Podium marker for the top three ranks.
pub fn medal(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

impl ApiClient {
    pub async fn leaderboard(
        &self,
        kind: LeaderboardKind,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let limit = check_range("limit", limit, 1, 100)?;
        let query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        self.get_json(&format!("/api/leaderboards/{}", kind.as_str()), query)
            .await
    }

    pub async fn leaderboard_stats(&self) -> Result<LeaderboardStats, ApiError> {
        self.get_json("/api/leaderboards/stats", Vec::new()).await
    }
}
