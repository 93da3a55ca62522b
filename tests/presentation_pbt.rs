//! Property-based tests for the presentation calculators
//!
//! Invariants:
//! - Week rows: row count is ceil((offset + n) / 7), only the first row is
//!   padded, input order is preserved
//! - Level progress stays within [0, 100] and picks the highest reached level
//! - Streak tier never decreases as the streak grows; broken never changes it
//! - Achievement completion stays within [0, 100]

use chrono::NaiveDate;
use proptest::prelude::*;

use structures_client::services::achievement::{self, AchievementDef, UserAchievementRecord};
use structures_client::services::calendar::{bucket_weeks, DayRecord};
use structures_client::services::level::{compute_progress, default_levels};
use structures_client::services::streak::{evaluate, StreakState, StreakTier};

// ============================================================================
// Generators
// ============================================================================

fn arb_days() -> impl Strategy<Value = Vec<DayRecord>> {
    (0i64..20_000, prop::collection::vec(any::<bool>(), 0..120)).prop_map(|(start, solved)| {
        let origin = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date");
        solved
            .into_iter()
            .enumerate()
            .map(|(i, solved)| DayRecord {
                date: origin + chrono::Duration::days(start + i as i64),
                solved,
                is_today: false,
            })
            .collect()
    })
}

fn arb_catalog_and_records() -> impl Strategy<Value = (Vec<AchievementDef>, Vec<UserAchievementRecord>)> {
    prop::collection::vec((any::<bool>(), 0i64..20, -3i64..20, 0i64..200), 0..30).prop_map(|rows| {
        let mut catalog = Vec::new();
        let mut records = Vec::new();
        for (i, (earned, progress, total, xp)) in rows.into_iter().enumerate() {
            let id = i as i64 + 1;
            catalog.push(AchievementDef {
                id,
                name: format!("achievement {id}"),
                description: String::new(),
                icon: String::new(),
                condition_type: "count".to_string(),
                condition_value: total,
                xp_reward: xp,
            });
            if id % 3 != 0 {
                records.push(UserAchievementRecord {
                    id,
                    earned,
                    progress: Some(progress),
                    total: Some(total),
                    ..UserAchievementRecord::default()
                });
            }
        }
        (catalog, records)
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn week_rows_cover_padded_input(days in arb_days(), offset in 0usize..7) {
        let rows = bucket_weeks(&days, offset);

        if days.is_empty() {
            prop_assert!(rows.is_empty());
        } else {
            prop_assert_eq!(rows.len(), (offset + days.len()).div_ceil(7));
            prop_assert!(rows[0].slots.iter().take(offset).all(Option::is_none));
            for row in rows.iter().skip(1) {
                prop_assert!(row.slots[0].is_some());
            }

            let flattened: Vec<DayRecord> = rows.iter().flat_map(|r| r.days().copied()).collect();
            prop_assert_eq!(flattened, days);
        }
    }

    #[test]
    fn level_progress_is_bounded(total_xp in -1_000i64..20_000) {
        let levels = default_levels();
        let progress = compute_progress(total_xp, &levels).unwrap();

        prop_assert!((0.0..=100.0).contains(&progress.progress_percentage));

        let reached = levels.iter().filter(|l| l.xp_required <= total_xp).count().max(1);
        prop_assert_eq!(progress.level as usize, reached);
        if !progress.is_max_level() {
            prop_assert!(progress.xp_to_next_level > 0);
            prop_assert!(progress.progress_percentage < 100.0);
        }
    }

    #[test]
    fn streak_tier_is_monotonic(streak in 0u32..400, active in any::<bool>()) {
        prop_assert!(StreakTier::from_streak(streak) <= StreakTier::from_streak(streak + 1));

        let display = evaluate(&StreakState {
            current_streak: streak,
            longest_streak: streak,
            streak_active: active,
            last_solve_date: None,
            days_since_last_solve: None,
        });
        prop_assert_eq!(display.tier, StreakTier::from_streak(streak));
        prop_assert_eq!(display.broken, !active);
    }

    #[test]
    fn achievement_percentages_are_bounded((catalog, records) in arb_catalog_and_records()) {
        let states = achievement::merge(&catalog, &records);
        prop_assert_eq!(states.len(), catalog.len());

        for state in &states {
            prop_assert!(state.total >= 1);
            prop_assert!((0.0..=100.0).contains(&state.progress_percentage()));
        }

        let stats = achievement::summarize(&states);
        prop_assert!((0.0..=100.0).contains(&stats.completion_percentage));
        prop_assert!(stats.earned_achievements <= stats.total_achievements);
    }
}
