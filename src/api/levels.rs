use super::{ApiClient, ApiError};
use crate::services::level::{LevelThreshold, UserProgress};

impl ApiClient {
    pub async fn levels(&self) -> Result<Vec<LevelThreshold>, ApiError> {
        self.get_json("/api/levels/all", Vec::new()).await
    }

    pub async fn level_progress(&self) -> Result<UserProgress, ApiError> {
        self.get_json("/api/levels/progress", Vec::new()).await
    }
}
