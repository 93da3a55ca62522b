use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub condition_type: String,
    #[serde(default)]
    pub condition_value: i64,
    #[serde(default)]
    pub xp_reward: i64,
}

/// Per-user entry from `/api/achievements/user`. Everything beyond the id is
/// optional; missing progress fields fall back to 0 of 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievementRecord {
    pub id: i64,
    #[serde(default)]
    pub earned: bool,
    #[serde(default)]
    pub earned_at: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub xp_reward: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementState {
    #[serde(flatten)]
    pub def: AchievementDef,
    pub earned: bool,
    pub earned_at: Option<String>,
    pub progress: i64,
    pub total: i64,
}

impl AchievementState {
    pub fn progress_percentage(&self) -> f64 {
        let total = self.total.max(1) as f64;
        (100.0 * self.progress.max(0) as f64 / total).min(100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    ProblemSolving,
    DifficultyMastery,
    SpecialSkills,
    Consistency,
}

impl AchievementCategory {
    pub const ALL: [Self; 4] = [
        Self::ProblemSolving,
        Self::DifficultyMastery,
        Self::SpecialSkills,
        Self::Consistency,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::ProblemSolving => "Problem Solving",
            Self::DifficultyMastery => "Difficulty Mastery",
            Self::SpecialSkills => "Special Skills",
            Self::Consistency => "Consistency",
        }
    }

    pub fn matches(self, condition_type: &str) -> bool {
        match self {
            Self::ProblemSolving => matches!(condition_type, "first_solve" | "count"),
            Self::DifficultyMastery => condition_type.starts_with("difficulty_"),
            Self::SpecialSkills => matches!(condition_type, "speed" | "perfect_streak"),
            Self::Consistency => condition_type == "streak",
        }
    }

    pub fn classify(condition_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.matches(condition_type))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStats {
    pub total_achievements: usize,
    pub earned_achievements: usize,
    pub completion_percentage: f64,
    pub xp_from_achievements: i64,
}

/// Records without a catalog entry are dropped; catalog order is preserved.
pub fn merge(catalog: &[AchievementDef], records: &[UserAchievementRecord]) -> Vec<AchievementState> {
    let by_id: HashMap<i64, &UserAchievementRecord> = records.iter().map(|r| (r.id, r)).collect();

    catalog
        .iter()
        .map(|def| {
            let record = by_id.get(&def.id).copied();
            let mut def = def.clone();
            if let Some(xp) = record.and_then(|r| r.xp_reward) {
                def.xp_reward = xp;
            }

            AchievementState {
                earned: record.is_some_and(|r| r.earned),
                earned_at: record.and_then(|r| r.earned_at.clone()),
                progress: record.and_then(|r| r.progress).unwrap_or(0),
                total: record.and_then(|r| r.total).filter(|t| *t > 0).unwrap_or(1),
                def,
            }
        })
        .collect()
}

/// Every category is present, possibly empty. Achievements matching no
/// category do not appear.
pub fn group_by_category(
    states: &[AchievementState],
) -> Vec<(AchievementCategory, Vec<&AchievementState>)> {
    AchievementCategory::ALL
        .into_iter()
        .map(|category| {
            let members = states
                .iter()
                .filter(|s| category.matches(&s.def.condition_type))
                .collect();
            (category, members)
        })
        .collect()
}

pub fn summarize(states: &[AchievementState]) -> AchievementStats {
    let total = states.len();
    let earned: Vec<&AchievementState> = states.iter().filter(|s| s.earned).collect();
    let completion_percentage = if total == 0 {
        0.0
    } else {
        100.0 * earned.len() as f64 / total as f64
    };

    AchievementStats {
        total_achievements: total,
        earned_achievements: earned.len(),
        completion_percentage,
        xp_from_achievements: earned.iter().map(|s| s.def.xp_reward).sum(),
    }
}
