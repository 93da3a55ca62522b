use anyhow::{Context, Result};

use structures_client::api::profile::latest_first;
use structures_client::api::ApiClient;
use structures_client::services::level::LevelStyle;

use super::{load, render};

pub async fn health_command(client: &ApiClient) -> Result<()> {
    let status = client
        .health()
        .await
        .with_context(|| format!("backend at {} is unreachable", client.base_url()))?;
    println!("{} ({})", status.status, client.base_url());
    Ok(())
}

pub async fn login_command(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    client.login(username, password).await.context("Login failed")?;
    println!("Logged in as {username}.");
    Ok(())
}

pub async fn register_command(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    let user = client
        .register(username, password)
        .await
        .context("Registration failed")?;
    println!("Registered {} (id {}). Run `structures login {}` next.", user.username, user.id, user.username);
    Ok(())
}

pub fn logout_command(client: &ApiClient) {
    client.logout();
    println!("Logged out.");
}

pub async fn whoami_command(client: &ApiClient) -> Result<()> {
    if !client.session().read().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    let profile_client = client.clone();
    let Some(profile) = load("profile", async move { profile_client.profile().await }).await else {
        return Ok(());
    };

    println!("{} (id {})", profile.username, profile.id);
    println!("Total XP: {}", profile.total_xp);

    let stats_client = client.clone();
    let progress_client = client.clone();
    let (stats, progress) = tokio::join!(
        load("profile stats", async move { stats_client.profile_stats().await }),
        load("level progress", async move { progress_client.level_progress().await }),
    );

    if let Some(progress) = progress {
        let style = LevelStyle::for_level(progress.level);
        println!("Level {} {} {}", progress.level, style.icon, progress.title);
    }

    if let Some(stats) = stats {
        println!(
            "Solved {} of {} submissions (easy {}, medium {}, hard {})",
            stats.problems_solved,
            stats.total_submissions,
            stats.easy_solved,
            stats.medium_solved,
            stats.hard_solved
        );
    }

    Ok(())
}

pub async fn submissions_command(client: &ApiClient, limit: usize) -> Result<()> {
    if !client.session().read().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    let api = client.clone();
    let Some(mut submissions) = load("submissions", async move { api.submissions().await }).await
    else {
        return Ok(());
    };

    if submissions.is_empty() {
        println!("No submissions yet.");
        return Ok(());
    }

    latest_first(&mut submissions);
    let rows: Vec<Vec<String>> = submissions
        .iter()
        .take(limit)
        .map(|s| {
            vec![
                s.submission_time
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                s.problem_title.clone(),
                s.language.clone(),
                if s.passed() { "pass".to_string() } else { "fail".to_string() },
                s.runtime.clone().unwrap_or_else(|| "-".to_string()),
                format!("+{}", s.xp_awarded),
            ]
        })
        .collect();
    print!("{}", render::table(&["When", "Problem", "Language", "Result", "Runtime", "XP"], &rows));

    if submissions.len() > limit {
        println!("({} older submissions not shown)", submissions.len() - limit);
    }
    Ok(())
}

pub async fn rename_command(client: &ApiClient, new_username: &str) -> Result<()> {
    let profile = client.rename(new_username).await.context("Rename failed")?;
    println!("Username changed to {}.", profile.username);
    Ok(())
}
