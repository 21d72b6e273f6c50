//! reeltrack CLI
//!
//! Terminal front end for the Reels session tracker:
//! - Start and end sessions
//! - Watch the live estimate
//! - Adjust the seconds-per-reel rate
//! - Review the dashboard

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use reeltrack::client::ReelsClient;
use reeltrack::config::{generate_default_config, Config};
use reeltrack::estimate::{format_elapsed, Estimate, SecondsPerReel};
use reeltrack::model::{Mood, Session};
use reeltrack::prefs::{load_rate, save_rate, FileStore};
use reeltrack::stats::{self, DashboardData, DashboardStats};
use reeltrack::tracker::{messages, StartOutcome, Tracker, TrackerState};

#[derive(Parser)]
#[command(name = "reeltrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track Reels sessions and review your usage")]
#[command(long_about = "Start a session, watch Reels, come back and end it.\nReels watched are estimated from session duration - no counting.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and REELTRACK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./reeltrack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a session and open Reels
    Start,

    /// End the running session with the current estimate
    End {
        /// How you felt (Bored, Stressed, Relaxed, Happy)
        #[arg(short, long)]
        mood: Option<Mood>,
    },

    /// Show the running session and its estimate
    Status {
        /// Refresh the estimate every second until Ctrl-C
        #[arg(short, long)]
        watch: bool,
    },

    /// Show or set average seconds per reel
    Rate {
        /// New rate in seconds (3-30)
        #[arg(value_parser = clap::value_parser!(u32).range(3..=30))]
        seconds: Option<u32>,
    },

    /// Show daily/weekly/monthly totals and streaks
    Dashboard,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    reeltrack::logging::init(&config.logging);
    if let Some(e) = config_error {
        tracing::warn!("{}; using defaults", e);
    }
    tracing::debug!(api = %config.api.base_url, "reeltrack v{}", env!("CARGO_PKG_VERSION"));

    let mut store = FileStore::new(config.preferences.resolved_path());

    match cli.command {
        Commands::Start => {
            let mut tracker = connect(&config, &store).await?;

            match tracker.start().await {
                Ok(StartOutcome::AlreadyActive(session)) => {
                    println!("{} (started {})", messages::ALREADY_RUNNING, start_clock(&session));
                    println!("End it with: reeltrack end");
                }
                Ok(StartOutcome::Started(_)) => {
                    println!("{}", messages::SESSION_STARTED);
                    println!("{}", config.tracker.content_url);
                    if config.tracker.open_browser {
                        if let Err(e) = open_in_browser(&config.tracker.content_url) {
                            tracing::warn!("Could not open browser: {}", e);
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!("start failed: {:?}", e);
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::End { mood } => {
            let mut tracker = connect(&config, &store).await?;

            if !tracker.begin_end() {
                eprintln!("{}", messages::NO_ACTIVE_SESSION);
                std::process::exit(1);
            }

            let now = Utc::now();
            if let Some(estimate) = tracker.state().estimate(now, tracker.rate()) {
                println!("{}", estimate.summary());
            }

            match tracker.end(mood, now).await {
                Ok(session) => match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
                    OutputFormat::Table => println!("{}", messages::SESSION_SAVED),
                },
                Err(e) => {
                    tracing::debug!("end failed: {:?}", e);
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Status { watch } => {
            let tracker = connect(&config, &store).await?;
            let rate = tracker.rate();

            match (tracker.state(), cli.format) {
                (state, OutputFormat::Json) => {
                    let body = serde_json::json!({
                        "active": !state.is_idle(),
                        "session": state.session(),
                        "estimate": state.estimate(Utc::now(), rate),
                        "seconds_per_reel": rate.get(),
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                (TrackerState::Idle, OutputFormat::Table) => {
                    println!("{}", messages::NO_ACTIVE_SESSION);
                }
                (state, OutputFormat::Table) => {
                    if let Some(session) = state.session() {
                        println!("Active • Started {}", start_clock(session));
                    }
                    if watch {
                        watch_estimate(state, rate).await;
                    } else if let Some(estimate) = state.estimate(Utc::now(), rate) {
                        println!("{}", status_line(&estimate));
                    }
                }
            }
        }

        Commands::Rate { seconds } => match seconds {
            Some(seconds) => {
                let rate = SecondsPerReel::new(seconds);
                save_rate(&mut store, rate)
                    .with_context(|| format!("saving rate to {:?}", store.path()))?;
                println!("Avg seconds per reel: {}", rate);
            }
            None => {
                let rate = load_rate(&store);
                match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::json!({ "seconds_per_reel": rate.get() })),
                    OutputFormat::Table => {
                        println!("Avg seconds per reel: {}", rate);
                        println!("Tip: set this once to match your scrolling speed.");
                    }
                }
            }
        },

        Commands::Dashboard => {
            let client = ReelsClient::new(config.api.client_config())?;
            let (data, stats) = reeltrack::dashboard::load_or_empty(&client).await;

            match cli.format {
                OutputFormat::Json => {
                    let body = serde_json::json!({ "stats": stats, "data": data });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Table => print_dashboard(&data, &stats),
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Build a tracker and adopt any session already running on the backend
async fn connect(config: &Config, store: &FileStore) -> anyhow::Result<Tracker<ReelsClient>> {
    let client = ReelsClient::new(config.api.client_config())?;
    let mut tracker = Tracker::new(client, load_rate(store));
    tracker.restore().await;
    tracing::debug!(
        base_url = tracker.backend().base_url(),
        idle = tracker.state().is_idle(),
        "tracker ready"
    );
    Ok(tracker)
}

fn start_clock(session: &Session) -> String {
    session
        .start_time
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

fn status_line(estimate: &Estimate) -> String {
    format!(
        "Est. {} reels so far ({})",
        estimate.estimated_reels,
        format_elapsed(estimate.duration_seconds)
    )
}

/// Redraw the estimate once a second until interrupted
async fn watch_estimate(state: &TrackerState, rate: SecondsPerReel) {
    use std::io::Write;

    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(estimate) = state.estimate(Utc::now(), rate) {
                    print!("\r{}   ", status_line(&estimate));
                    let _ = std::io::stdout().flush();
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }
}

fn print_dashboard(data: &DashboardData, stats: &DashboardStats) {
    let today_sub = if stats.tracked_today {
        "Tracked for today"
    } else {
        "No data for today yet"
    };

    println!("{:<34} {}", "Today's reels", stats.today_reels);
    println!("{:<34} {}", "", today_sub);
    println!("{:<34} {}", "Weekly average reels / day", stats.weekly_average_reels);
    println!(
        "{:<34} {} min",
        "Approx. longest daily time", stats.longest_daily_minutes
    );
    println!("{:<34} {}", "", "Upper bound based on daily totals");
    println!("{:<34} {}", "Avg. reels per session", stats.reels_per_session);

    println!();
    println!("Streaks");
    println!("{}", "-".repeat(40));
    println!("  {:<20} {}", "Current streak", stats::format_days(stats.current_streak));
    println!("  {:<20} {}", "Longest streak", stats::format_days(stats.longest_streak));

    println!();
    println!("Reels watched per day (last 30 days)");
    println!("{}", "-".repeat(40));
    if data.daily.is_empty() {
        println!("  No daily data yet.");
    } else {
        let max = data.daily.iter().map(|d| d.total_reels).max().unwrap_or(0).max(1);
        for day in &data.daily {
            let width = (day.total_reels as usize * 30) / max as usize;
            println!(
                "  {} {:>5} reels {:>4} min  {}",
                stats::day_axis_label(day.date),
                day.total_reels,
                day.total_minutes,
                "█".repeat(width)
            );
        }
    }

    println!();
    println!("Recent weeks");
    println!("{}", "-".repeat(40));
    if data.weekly.is_empty() {
        println!("  No weekly data yet.");
    }
    for week in stats::recent(&data.weekly) {
        println!(
            "  {:<16} {}",
            stats::week_label(week),
            stats::totals_label(week.total_reels, week.total_minutes)
        );
    }

    println!();
    println!("Recent months");
    println!("{}", "-".repeat(40));
    if data.monthly.is_empty() {
        println!("  No monthly data yet.");
    }
    for month in stats::recent(&data.monthly) {
        println!(
            "  {:<16} {}",
            stats::month_label(month),
            stats::totals_label(month.total_reels, month.total_minutes)
        );
    }
}

/// Hand the URL to the platform's default handler
fn open_in_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        std::process::Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map(|_| ())
}
