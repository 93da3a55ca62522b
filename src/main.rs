use anyhow::Result;
use clap::{Parser, Subcommand};

use structures_client::api::forums::{SortOrder, ThreadSort};
use structures_client::api::leaderboards::LeaderboardKind;
use structures_client::api::streaks::DEFAULT_CALENDAR_DAYS;
use structures_client::api::ApiClient;
use structures_client::config::Config;
use structures_client::logging::{self, LogSettings};
use structures_client::session::{Session, SessionStore};

mod cli;

#[derive(Parser)]
#[command(name = "structures")]
#[command(about = "Terminal client for the Structures coding-practice platform")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides STRUCTURES_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,

    /// Log in and store the session token
    Login {
        username: String,
        /// Read from STRUCTURES_PASSWORD when omitted
        #[arg(long, env = "STRUCTURES_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        username: String,
        #[arg(long, env = "STRUCTURES_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in profile and solve statistics
    Whoami,

    /// Show recent submissions, newest first
    Submissions {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Change the username
    Rename { new_username: String },

    /// List problems
    Problems {
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one problem
    Problem { id: i64 },

    /// Show achievements grouped by category
    Achievements {
        /// Ask the backend to award anything newly earned first
        #[arg(long)]
        check: bool,
    },

    /// Show the level table and current progress
    Levels,

    /// Show the current streak and the solve calendar
    Streak {
        #[arg(long, default_value_t = DEFAULT_CALENDAR_DAYS)]
        days: u32,
    },

    /// Show the longest-running streaks
    StreakLeaderboard {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show an XP leaderboard
    Leaderboard {
        #[arg(long, default_value = "global")]
        kind: LeaderboardKind,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show revealed hints for a problem
    Hints {
        problem_id: i64,
        /// Reveal the next hint (costs XP)
        #[arg(long)]
        reveal: bool,
    },

    /// Browse public code templates
    Templates {
        #[arg(long)]
        language: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Print a template's code and record its use
    UseTemplate { id: i64 },

    /// Show the most used template languages
    Languages {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Browse forum categories, or one category's threads
    Forums {
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "updated")]
        sort: ThreadSort,
        #[arg(long, default_value = "desc")]
        order: SortOrder,
    },

    /// Profile, level, streak and achievements at a glance
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_base_url(url)?;
    }

    let log_level = if cli.verbose { "debug".to_string() } else { config.log_level.clone() };
    let _log_guard = logging::init_tracing(&LogSettings::from_env(&log_level));

    let store = SessionStore::new(&config.session_path);
    let stored = store.load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, path = %store.path().display(), "ignoring unreadable session file");
        Session::default()
    });
    let session = stored.clone().into_shared();
    let client = ApiClient::new(&config, session.clone())?;

    let explicit_logout = matches!(cli.command, Commands::Logout);
    let outcome = run(cli.command, &client).await;

    let current = session.read().clone();
    if current != stored {
        store.persist(&current)?;
        if !explicit_logout && stored.bearer_token().is_some() && current.bearer_token().is_none() {
            eprintln!("Session expired. Please log in again.");
        }
    }

    outcome
}

async fn run(command: Commands, client: &ApiClient) -> Result<()> {
    match command {
        Commands::Health => cli::account::health_command(client).await,
        Commands::Login { username, password } => {
            cli::account::login_command(client, &username, &password).await
        }
        Commands::Register { username, password } => {
            cli::account::register_command(client, &username, &password).await
        }
        Commands::Logout => {
            cli::account::logout_command(client);
            Ok(())
        }
        Commands::Whoami => cli::account::whoami_command(client).await,
        Commands::Submissions { limit } => cli::account::submissions_command(client, limit).await,
        Commands::Rename { new_username } => cli::account::rename_command(client, &new_username).await,
        Commands::Problems { difficulty, search } => {
            cli::practice::problems_command(client, difficulty, search).await
        }
        Commands::Problem { id } => cli::practice::problem_command(client, id).await,
        Commands::Hints { problem_id, reveal } => {
            cli::practice::hints_command(client, problem_id, reveal).await
        }
        Commands::Achievements { check } => cli::progress::achievements_command(client, check).await,
        Commands::Levels => cli::progress::levels_command(client).await,
        Commands::Streak { days } => cli::progress::streak_command(client, days).await,
        Commands::StreakLeaderboard { limit } => {
            cli::community::streak_leaderboard_command(client, limit).await
        }
        Commands::Leaderboard { kind, limit, offset } => {
            cli::community::leaderboard_command(client, kind, limit, offset).await
        }
        Commands::Templates { language, limit } => {
            cli::templates::templates_command(client, language, limit).await
        }
        Commands::UseTemplate { id } => cli::templates::use_template_command(client, id).await,
        Commands::Languages { limit } => cli::templates::languages_command(client, limit).await,
        Commands::Forums { category, page, sort, order } => {
            cli::community::forums_command(client, category, page, sort, order).await
        }
        Commands::Dashboard => cli::dashboard::dashboard_command(client).await,
    }
}
