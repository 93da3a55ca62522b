use anyhow::Result;

use structures_client::api::forums::{SortOrder, ThreadQuery, ThreadSort};
use structures_client::api::leaderboards::{medal, LeaderboardKind};
use structures_client::api::ApiClient;
use structures_client::services::level::LevelStyle;

use super::{load, render};

const THREADS_PER_PAGE: u32 = 20;

fn rank_cell(rank: u32) -> String {
    match medal(rank) {
        Some(icon) => format!("{icon} {rank}"),
        None => rank.to_string(),
    }
}

pub async fn leaderboard_command(
    client: &ApiClient,
    kind: LeaderboardKind,
    limit: u32,
    offset: u32,
) -> Result<()> {
    let board_api = client.clone();
    let stats_api = client.clone();
    let (entries, stats) = tokio::join!(
        load("leaderboard", async move { board_api.leaderboard(kind, limit, offset).await }),
        load("leaderboard stats", async move { stats_api.leaderboard_stats().await }),
    );
    let Some(entries) = entries else {
        return Ok(());
    };

    let snapshot = stats.and_then(|s| match kind {
        LeaderboardKind::Global => Some(s.global),
        LeaderboardKind::Weekly => Some(s.weekly),
        LeaderboardKind::Monthly => Some(s.monthly),
        LeaderboardKind::Friends => None,
    });
    match snapshot {
        Some(snapshot) => println!(
            "{} leaderboard ({} players, updated {})\n",
            kind,
            snapshot.count,
            snapshot.last_updated.as_deref().unwrap_or("never")
        ),
        None => println!("{} leaderboard\n", kind),
    }
    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }

    let me = client.session().read().username.clone();
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            let style = LevelStyle::for_level(e.level);
            let you = if me.as_deref() == Some(e.username.as_str()) { " (you)" } else { "" };
            vec![
                rank_cell(e.rank),
                format!("{}{you}", e.username),
                format!("{} {}", style.icon, e.title),
                e.total_xp.to_string(),
                e.problems_solved.to_string(),
            ]
        })
        .collect();
    print!("{}", render::table(&["Rank", "User", "Level", "XP", "Solved"], &rows));
    Ok(())
}

pub async fn streak_leaderboard_command(client: &ApiClient, limit: u32) -> Result<()> {
    let api = client.clone();
    let Some(board) =
        load("streak leaderboard", async move { api.streak_leaderboard(limit).await }).await
    else {
        return Ok(());
    };

    let rows: Vec<Vec<String>> = board
        .leaderboard
        .iter()
        .map(|e| {
            vec![
                rank_cell(e.rank),
                e.username.clone(),
                e.current_streak.to_string(),
                e.longest_streak.to_string(),
            ]
        })
        .collect();
    print!("{}", render::table(&["Rank", "User", "Current", "Longest"], &rows));
    println!("\n{} users with a streak", board.total_users);
    Ok(())
}

pub async fn forums_command(
    client: &ApiClient,
    category: Option<i64>,
    page: u32,
    sort: ThreadSort,
    order: SortOrder,
) -> Result<()> {
    let Some(category_id) = category else {
        let api = client.clone();
        let Some(categories) = load("forum categories", async move { api.forum_categories().await }).await
        else {
            return Ok(());
        };

        for c in &categories {
            println!("[{}] {} ({} threads)", c.id, c.name, c.thread_count);
            if let Some(description) = &c.description {
                println!("    {description}");
            }
            if let Some(latest) = &c.latest_thread {
                println!("    latest: {} by {}", latest.title, latest.author);
            }
        }
        return Ok(());
    };

    let query = ThreadQuery {
        page,
        limit: THREADS_PER_PAGE,
        sort,
        order,
    };
    let api = client.clone();
    let Some(listing) = load("forum threads", async move {
        api.category_threads(category_id, &query).await
    })
    .await
    else {
        return Ok(());
    };

    println!("{}\n", listing.category.name);
    let rows: Vec<Vec<String>> = listing
        .threads
        .iter()
        .map(|t| {
            let mut flags = String::new();
            if t.is_pinned {
                flags.push('📌');
            }
            if t.is_locked {
                flags.push('🔒');
            }
            vec![
                t.id.to_string(),
                format!("{flags}{}", t.title),
                t.author.username.clone(),
                t.reply_count.to_string(),
                t.view_count.to_string(),
            ]
        })
        .collect();
    print!("{}", render::table(&["ID", "Title", "Author", "Replies", "Views"], &rows));

    let p = listing.pagination;
    println!("\nPage {} of {} ({} threads)", p.page, p.pages.max(1), p.total);
    if p.has_next() {
        println!("Next: --category {category_id} --page {}", p.page + 1);
    }
    Ok(())
}
