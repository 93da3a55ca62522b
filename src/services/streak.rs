use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_active: bool,
    #[serde(default)]
    pub last_solve_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub days_since_last_solve: Option<i64>,
}

impl StreakState {
    /// The backend keeps `longest_streak >= current_streak`; this holds it even
    /// for snapshots taken between its updates.
    pub fn personal_best(&self) -> u32 {
        self.longest_streak.max(self.current_streak)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreakTier {
    Neutral,
    GoldStart,
    OrangeLight,
    OrangeMid,
    OrangeHigh,
    RedOrangeMax,
}

impl StreakTier {
    pub fn from_streak(current_streak: u32) -> Self {
        match current_streak {
            0 => Self::Neutral,
            1..=2 => Self::GoldStart,
            3..=6 => Self::OrangeLight,
            7..=13 => Self::OrangeMid,
            14..=29 => Self::OrangeHigh,
            _ => Self::RedOrangeMax,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::GoldStart => "gold-start",
            Self::OrangeLight => "orange-light",
            Self::OrangeMid => "orange-mid",
            Self::OrangeHigh => "orange-high",
            Self::RedOrangeMax => "red-orange-max",
        }
    }

    /// `None` for the neutral tier, which renders in the disabled text color.
    pub fn color(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::GoldStart => Some("#FFD700"),
            Self::OrangeLight => Some("#FFA500"),
            Self::OrangeMid => Some("#FF8C42"),
            Self::OrangeHigh => Some("#FF6B35"),
            Self::RedOrangeMax => Some("#FF4500"),
        }
    }
}

impl std::fmt::Display for StreakTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier and broken flag are reported side by side; an inactive streak keeps
/// its numeric tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakDisplay {
    pub tier: StreakTier,
    pub broken: bool,
    pub current_streak: u32,
    pub personal_best: u32,
}

impl StreakDisplay {
    pub fn summary(&self) -> String {
        if self.current_streak == 0 {
            return "No current streak".to_string();
        }
        format!(
            "{} streak ({})",
            plural_days(self.current_streak),
            if self.broken { "broken" } else { "active" }
        )
    }

    pub fn best_summary(&self) -> Option<String> {
        (self.personal_best > 0).then(|| format!("Personal best: {}", plural_days(self.personal_best)))
    }
}

pub fn evaluate(state: &StreakState) -> StreakDisplay {
    StreakDisplay {
        tier: StreakTier::from_streak(state.current_streak),
        broken: !state.streak_active,
        current_streak: state.current_streak,
        personal_best: state.personal_best(),
    }
}

fn plural_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(current: u32, longest: u32, active: bool) -> StreakState {
        StreakState {
            current_streak: current,
            longest_streak: longest,
            streak_active: active,
            last_solve_date: None,
            days_since_last_solve: None,
        }
    }

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(StreakTier::from_streak(0), StreakTier::Neutral);
        assert_eq!(StreakTier::from_streak(1), StreakTier::GoldStart);
        assert_eq!(StreakTier::from_streak(2), StreakTier::GoldStart);
        assert_eq!(StreakTier::from_streak(3), StreakTier::OrangeLight);
        assert_eq!(StreakTier::from_streak(6), StreakTier::OrangeLight);
        assert_eq!(StreakTier::from_streak(7), StreakTier::OrangeMid);
        assert_eq!(StreakTier::from_streak(13), StreakTier::OrangeMid);
        assert_eq!(StreakTier::from_streak(14), StreakTier::OrangeHigh);
        assert_eq!(StreakTier::from_streak(29), StreakTier::OrangeHigh);
        assert_eq!(StreakTier::from_streak(30), StreakTier::RedOrangeMax);
        assert_eq!(StreakTier::from_streak(u32::MAX), StreakTier::RedOrangeMax);
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(StreakTier::OrangeHigh.to_string(), "orange-high");
        assert_eq!(StreakTier::RedOrangeMax.as_str(), "red-orange-max");
        assert_eq!(StreakTier::Neutral.color(), None);
        assert_eq!(
            serde_json::to_string(&StreakTier::GoldStart).unwrap(),
            "\"gold-start\""
        );
    }

    #[test]
    fn test_inactive_streak_reports_broken_and_tier() {
        let display = evaluate(&state(50, 50, false));
        assert!(display.broken);
        assert_eq!(display.tier, StreakTier::RedOrangeMax);
        assert_eq!(display.summary(), "50 days streak (broken)");
    }

    #[test]
    fn test_active_streak_summary() {
        let display = evaluate(&state(1, 4, true));
        assert!(!display.broken);
        assert_eq!(display.summary(), "1 day streak (active)");
        assert_eq!(display.best_summary().as_deref(), Some("Personal best: 4 days"));
    }

    #[test]
    fn test_zero_streak() {
        let display = evaluate(&state(0, 0, false));
        assert_eq!(display.tier, StreakTier::Neutral);
        assert_eq!(display.summary(), "No current streak");
        assert!(display.best_summary().is_none());
    }

    #[test]
    fn test_personal_best_never_below_current() {
        assert_eq!(state(8, 5, true).personal_best(), 8);
        assert_eq!(state(3, 12, true).personal_best(), 12);
    }

    #[test]
    fn test_backend_payload() {
        let parsed: StreakState = serde_json::from_str(
            r#"{"current_streak":4,"longest_streak":9,"last_solve_date":"2024-05-02T18:21:07.511203","streak_active":true,"days_since_last_solve":0}"#,
        )
        .unwrap();
        assert_eq!(parsed.current_streak, 4);
        assert!(parsed.last_solve_date.is_some());
        assert_eq!(parsed.days_since_last_solve, Some(0));
    }
}
