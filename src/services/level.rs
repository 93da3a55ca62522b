use serde::{Deserialize, Serialize};

const LEVEL_TABLE: [(i64, &str); 6] = [
    (0, "Novice"),
    (500, "Apprentice"),
    (1500, "Practitioner"),
    (3000, "Expert"),
    (6000, "Master"),
    (10000, "Grandmaster"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub level: u32,
    pub title: String,
    pub xp_required: i64,
    #[serde(default)]
    pub is_max_level: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub level: u32,
    pub title: String,
    pub total_xp: i64,
    pub xp_to_next_level: i64,
    pub level_start_xp: i64,
    pub level_end_xp: i64,
    pub progress_percentage: f64,
}

impl UserProgress {
    /// At the top level the backend reports an empty XP range.
    pub fn is_max_level(&self) -> bool {
        self.level_end_xp <= self.level_start_xp
    }

    pub fn xp_into_level(&self) -> i64 {
        self.total_xp.saturating_sub(self.level_start_xp).max(0)
    }

    pub fn level_span(&self) -> i64 {
        self.level_end_xp.saturating_sub(self.level_start_xp).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpInfo {
    pub leveled_up: bool,
    pub old_level: u32,
    pub old_title: String,
    pub new_level: u32,
    pub new_title: String,
}

pub fn default_levels() -> Vec<LevelThreshold> {
    LEVEL_TABLE
        .iter()
        .enumerate()
        .map(|(i, (xp, title))| LevelThreshold {
            level: i as u32 + 1,
            title: (*title).to_string(),
            xp_required: *xp,
            is_max_level: i == LEVEL_TABLE.len() - 1,
        })
        .collect()
}

/// Mirrors the backend's level computation. Responses from `/api/levels/progress`
/// take precedence over this whenever they are available. Negative XP counts
/// as zero.
pub fn compute_progress(total_xp: i64, levels: &[LevelThreshold]) -> Option<UserProgress> {
    if levels.is_empty() {
        return None;
    }
    let total_xp = total_xp.max(0);

    let index = levels
        .iter()
        .rposition(|l| l.xp_required <= total_xp)
        .unwrap_or(0);
    let current = &levels[index];
    let next = levels.get(index + 1).filter(|_| !current.is_max_level);

    let Some(next) = next else {
        return Some(UserProgress {
            level: current.level,
            title: current.title.clone(),
            total_xp,
            xp_to_next_level: 0,
            level_start_xp: current.xp_required,
            level_end_xp: current.xp_required,
            progress_percentage: 100.0,
        });
    };

    let span = next.xp_required.saturating_sub(current.xp_required);
    let progress_percentage = if span > 0 {
        (100.0 * total_xp.saturating_sub(current.xp_required) as f64 / span as f64).clamp(0.0, 100.0)
    } else {
        100.0
    };

    Some(UserProgress {
        level: current.level,
        title: current.title.clone(),
        total_xp,
        xp_to_next_level: next.xp_required.saturating_sub(total_xp),
        level_start_xp: current.xp_required,
        level_end_xp: next.xp_required,
        progress_percentage,
    })
}

pub fn detect_level_up(before: &UserProgress, after: &UserProgress) -> Option<LevelUpInfo> {
    (after.level > before.level).then(|| LevelUpInfo {
        leveled_up: true,
        old_level: before.level,
        old_title: before.title.clone(),
        new_level: after.level,
        new_title: after.title.clone(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub icon: &'static str,
    pub accent: &'static str,
}

const LEVEL_ONE_STYLE: LevelStyle = LevelStyle { icon: "🌱", accent: "gray" };

impl LevelStyle {
    /// Unknown levels render like level 1.
    pub fn for_level(level: u32) -> Self {
        match level {
            2 => Self { icon: "📚", accent: "green" },
            3 => Self { icon: "⚡", accent: "blue" },
            4 => Self { icon: "🎯", accent: "purple" },
            5 => Self { icon: "👑", accent: "orange" },
            6 => Self { icon: "💎", accent: "yellow" },
            _ => LEVEL_ONE_STYLE,
        }
    }
}
