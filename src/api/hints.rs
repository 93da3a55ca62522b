use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hint {
    pub id: i64,
    pub content: String,
    pub order: u32,
    #[serde(default)]
    pub xp_penalty: i64,
    #[serde(default)]
    pub generated_by_ai: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HintsAvailable {
    pub total_hints: u32,
    pub revealed_hints: u32,
    #[serde(default)]
    pub next_hint_order: Option<u32>,
    #[serde(default)]
    pub hints_exhausted: bool,
}

impl HintsAvailable {
    pub fn remaining(&self) -> u32 {
        self.total_hints.saturating_sub(self.revealed_hints)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HintReveal {
    pub hint: Hint,
    #[serde(default)]
    pub xp_penalty_applied: i64,
    #[serde(default)]
    pub remaining_xp: i64,
}

#[derive(Serialize)]
struct RevealRequest {
    hint_order: u32,
}

impl ApiClient {
    pub async fn hints_available(&self, problem_id: i64) -> Result<HintsAvailable, ApiError> {
        self.get_json(
            &format!("/api/hints/problems/{problem_id}/hints/available"),
            Vec::new(),
        )
        .await
    }

    pub async fn revealed_hints(&self, problem_id: i64) -> Result<Vec<Hint>, ApiError> {
        self.get_json(
            &format!("/api/hints/problems/{problem_id}/hints/revealed"),
            Vec::new(),
        )
        .await
    }

    /// Costs XP on every call, so it must only run on explicit user action.
    pub async fn reveal_hint(&self, problem_id: i64, hint_order: u32) -> Result<HintReveal, ApiError> {
        if hint_order == 0 {
            return Err(ApiError::InvalidArgument("hint_order starts at 1".to_string()));
        }

        let reveal: HintReveal = self
            .post_json(
                &format!("/api/hints/problems/{problem_id}/hints/reveal"),
                &RevealRequest { hint_order },
            )
            .await?;

        tracing::info!(
            problem_id,
            hint_order,
            penalty = reveal.xp_penalty_applied,
            "hint revealed"
        );
        Ok(reveal)
    }
}
