use anyhow::Result;

use structures_client::api::ApiClient;
use structures_client::services::achievement::{self, AchievementState};
use structures_client::services::calendar::{self, DayRecord};
use structures_client::services::level::{self, LevelStyle, UserProgress};
use structures_client::services::streak::{self, StreakDisplay, StreakState};

use super::{load, render};

pub async fn achievements_command(client: &ApiClient, check: bool) -> Result<()> {
    if check {
        let api = client.clone();
        if let Some(result) = load("achievement check", async move { api.check_achievements().await }).await {
            println!("{}", result.message);
            for earned in &result.newly_earned {
                println!("  {} {} (+{} XP)", earned.icon, earned.name, earned.xp_reward);
            }
            println!();
        }
    }

    let overview_api = client.clone();
    let stats_api = client.clone();
    let (states, server_stats) = tokio::join!(
        load("achievements", async move { overview_api.achievement_overview().await }),
        load("achievement stats", async move { stats_api.achievement_stats().await }),
    );
    let Some(states) = states else {
        return Ok(());
    };

    match server_stats {
        Some(stats) => print_stats_line(
            stats.earned_achievements,
            stats.total_achievements,
            stats.xp_from_achievements,
            stats.completion_percentage,
        ),
        None => print_local_stats(&states),
    }
    print_categories(&states);
    Ok(())
}

fn print_stats_line(earned: usize, total: usize, xp: i64, completion: f64) {
    println!("Achievements: {earned}/{total} earned, {xp} XP");
    println!("{}\n", render::progress_bar(completion));
}

fn print_local_stats(states: &[AchievementState]) {
    let stats = achievement::summarize(states);
    print_stats_line(
        stats.earned_achievements,
        stats.total_achievements,
        stats.xp_from_achievements,
        stats.completion_percentage,
    );
}

pub fn print_achievements(states: &[AchievementState]) {
    print_local_stats(states);
    print_categories(states);
}

fn print_categories(states: &[AchievementState]) {
    for (category, members) in achievement::group_by_category(states) {
        if members.is_empty() {
            continue;
        }
        println!("{}", category.title());
        for state in members {
            let mark = if state.earned { "✓" } else { " " };
            println!(
                "  [{mark}] {} {}  {}/{}  {}",
                state.def.icon,
                state.def.name,
                state.progress,
                state.total,
                render::progress_bar(state.progress_percentage())
            );
        }
        println!();
    }
}

pub async fn levels_command(client: &ApiClient) -> Result<()> {
    let levels_api = client.clone();
    let progress_api = client.clone();
    let (levels, progress) = tokio::join!(
        load("levels", async move { levels_api.levels().await }),
        load("level progress", async move { progress_api.level_progress().await }),
    );

    if let Some(progress) = &progress {
        print_progress(progress);
        println!();
    }

    let levels = levels.unwrap_or_else(level::default_levels);
    let current = progress.as_ref().map(|p| p.level);
    let rows: Vec<Vec<String>> = levels
        .iter()
        .map(|l| {
            let style = LevelStyle::for_level(l.level);
            let marker = if Some(l.level) == current { "<" } else { "" };
            vec![
                format!("{} {}", style.icon, l.level),
                l.title.clone(),
                l.xp_required.to_string(),
                marker.to_string(),
            ]
        })
        .collect();
    print!("{}", render::table(&["Level", "Title", "XP", ""], &rows));
    Ok(())
}

pub fn print_progress(progress: &UserProgress) {
    let style = LevelStyle::for_level(progress.level);
    println!("{} Level {}: {}", style.icon, progress.level, progress.title);
    println!("{}", render::progress_bar(progress.progress_percentage));
    if progress.is_max_level() {
        println!("{} XP, max level reached", progress.total_xp);
    } else {
        println!(
            "{}/{} XP into this level, {} XP to next level",
            progress.xp_into_level(),
            progress.level_span(),
            progress.xp_to_next_level
        );
    }
}

pub async fn streak_command(client: &ApiClient, days: u32) -> Result<()> {
    let stats_api = client.clone();
    let calendar_api = client.clone();
    let (stats, calendar) = tokio::join!(
        load("streak", async move { stats_api.streak_stats().await }),
        load("streak calendar", async move { calendar_api.streak_calendar(days).await }),
    );

    if let Some(stats) = &stats {
        print_streak(&stats.streak);
        println!(
            "Rank #{} current, #{} longest, percentile {:.0}%",
            stats.current_streak_rank, stats.longest_streak_rank, stats.streak_percentage
        );
        println!("{} solve days this year", stats.total_solve_days_this_year);
    }

    if let Some(calendar) = calendar {
        println!();
        print_calendar(&calendar.calendar_data);
    }
    Ok(())
}

pub fn print_streak(state: &StreakState) {
    let display: StreakDisplay = streak::evaluate(state);
    let color = display.tier.color().unwrap_or("default");
    println!("🔥 {} [{} {}]", display.summary(), display.tier, color);
    if let Some(best) = display.best_summary() {
        println!("{best}");
    }
}

pub fn print_calendar(days: &[DayRecord]) {
    if days.is_empty() {
        println!("No activity recorded.");
        return;
    }
    print!("{}", render::calendar_grid(&calendar::bucket_calendar(days)));
    println!("{}/{} days solved", calendar::solved_days(days), days.len());
}
