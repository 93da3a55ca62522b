use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub total_xp: i64,
    #[serde(default)]
    pub theme_preference: Option<String>,
    #[serde(default)]
    pub font_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileStats {
    pub total_submissions: u32,
    pub problems_solved: u32,
    pub total_xp: i64,
    #[serde(default)]
    pub easy_solved: u32,
    #[serde(default)]
    pub medium_solved: u32,
    #[serde(default)]
    pub hard_solved: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub streak_active: bool,
}

/// One entry of the user's submission history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub problem_id: i64,
    pub problem_title: String,
    #[serde(default)]
    pub problem_difficulty: Option<String>,
    pub result: String,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub submission_time: Option<NaiveDateTime>,
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub overall_status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub memory_usage: Option<f64>,
    #[serde(default)]
    pub xp_awarded: i64,
}

impl Submission {
    /// Older rows only carry `result`; newer ones add `overall_status`.
    pub fn passed(&self) -> bool {
        self.overall_status.as_deref().unwrap_or(&self.result) == "pass"
    }
}

/// Newest first; entries without a timestamp sort last.
pub fn latest_first(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| b.submission_time.cmp(&a.submission_time));
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameResponse {
    pub user: UserProfile,
    pub access_token: String,
}

impl ApiClient {
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/api/profile/", Vec::new()).await
    }

    pub async fn submissions(&self) -> Result<Vec<Submission>, ApiError> {
        self.get_json("/api/profile/submissions/", Vec::new()).await
    }

    pub async fn profile_stats(&self) -> Result<ProfileStats, ApiError> {
        self.get_json("/api/profile/stats/", Vec::new()).await
    }

    /// The backend reissues the token for the new name; the session follows.
    pub async fn rename(&self, new_username: &str) -> Result<UserProfile, ApiError> {
        if new_username.trim().is_empty() {
            return Err(ApiError::InvalidArgument("username must not be empty".to_string()));
        }

        let renamed: RenameResponse = self
            .put_json(
                "/api/profile/username",
                &serde_json::json!({ "new_username": new_username.trim() }),
            )
            .await?;

        let mut session = self.session().write();
        session.token = Some(renamed.access_token);
        session.username = Some(renamed.user.username.clone());

        Ok(renamed.user)
    }
}
