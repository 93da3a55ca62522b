use anyhow::Result;

use structures_client::api::leaderboards::LeaderboardKind;
use structures_client::api::streaks::DEFAULT_CALENDAR_DAYS;
use structures_client::api::ApiClient;
use structures_client::fetch::ViewTask;

use super::progress::{print_achievements, print_calendar, print_progress, print_streak};
use super::settle;

const TOP_PLAYERS: u32 = 5;

/// Every panel runs its own request; one failing panel leaves the others
/// intact.
pub async fn dashboard_command(client: &ApiClient) -> Result<()> {
    let api = client.clone();
    let mut profile = ViewTask::spawn("profile", async move { api.profile().await });
    let api = client.clone();
    let mut progress = ViewTask::spawn("level progress", async move { api.level_progress().await });
    let api = client.clone();
    let mut streak = ViewTask::spawn("streak", async move { api.streak().await });
    let api = client.clone();
    let mut calendar = ViewTask::spawn("streak calendar", async move {
        api.streak_calendar(DEFAULT_CALENDAR_DAYS).await
    });
    let api = client.clone();
    let mut achievements =
        ViewTask::spawn("achievements", async move { api.achievement_overview().await });
    let api = client.clone();
    let mut leaders = ViewTask::spawn("leaderboard", async move {
        api.leaderboard(LeaderboardKind::Global, TOP_PLAYERS, 0).await
    });

    let (profile, progress, streak, calendar, achievements, leaders) = futures::join!(
        settle(&mut profile),
        settle(&mut progress),
        settle(&mut streak),
        settle(&mut calendar),
        settle(&mut achievements),
        settle(&mut leaders),
    );

    if let Some(profile) = profile {
        println!("Welcome back, {}! ({} XP)\n", profile.username, profile.total_xp);
    }
    if let Some(progress) = progress {
        print_progress(&progress);
        println!();
    }
    if let Some(streak) = streak {
        print_streak(&streak);
    }
    if let Some(calendar) = calendar {
        print_calendar(&calendar.calendar_data);
        println!();
    }
    if let Some(achievements) = achievements {
        print_achievements(&achievements);
    }
    if let Some(leaders) = leaders {
        println!("Top players");
        for entry in leaders {
            println!("  {}. {} ({} XP)", entry.rank, entry.username, entry.total_xp);
        }
    }
    Ok(())
}
