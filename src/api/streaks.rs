use chrono::NaiveDate;
use serde::Deserialize;

use super::error::check_range;
use super::{ApiClient, ApiError};
use crate::services::calendar::DayRecord;
use crate::services::streak::StreakState;

pub const DEFAULT_CALENDAR_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreakCalendar {
    pub calendar_data: Vec<DayRecord>,
    #[serde(default)]
    pub total_solve_days: u32,
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreakStats {
    #[serde(flatten)]
    pub streak: StreakState,
    #[serde(default)]
    pub total_solve_days_this_year: u32,
    #[serde(default)]
    pub current_streak_rank: u32,
    #[serde(default)]
    pub longest_streak_rank: u32,
    #[serde(default)]
    pub streak_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreakLeaderboardEntry {
    pub rank: u32,
    pub username: String,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreakLeaderboard {
    pub leaderboard: Vec<StreakLeaderboardEntry>,
    #[serde(default)]
    pub total_users: u32,
}

impl ApiClient {
    pub async fn streak(&self) -> Result<StreakState, ApiError> {
        self.get_json("/api/streaks/", Vec::new()).await
    }

    pub async fn streak_calendar(&self, days: u32) -> Result<StreakCalendar, ApiError> {
        let days = check_range("days", days, 1, 365)?;
        self.get_json("/api/streaks/calendar", vec![("days", days.to_string())])
            .await
    }

    pub async fn streak_stats(&self) -> Result<StreakStats, ApiError> {
        self.get_json("/api/streaks/stats", Vec::new()).await
    }

    pub async fn streak_leaderboard(&self, limit: u32) -> Result<StreakLeaderboard, ApiError> {
        let limit = check_range("limit", limit, 1, 100)?;
        self.get_json("/api/streaks/leaderboard", vec![("limit", limit.to_string())])
            .await
    }
}
