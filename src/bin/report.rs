//! Console engagement report for one screen name
//!
//! Usage: `report <screen_name> [--pages N]`
//!
//! Loads the profile through the retrieval coordinator, optionally extends
//! the timeline by N further pages, and prints the engagement report plus
//! the current quota line.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tweetpulse::{
    EngineConfig, FetchError, HttpSocialGraphClient, Profile, RateLimitMonitor,
    RetrievalCoordinator, RosterKind,
};

/// Parse `--pages N` from the argument list, default 0 (no extension).
fn parse_pages_from_args(args: &[String]) -> u32 {
    if let Some(idx) = args.iter().position(|a| a == "--pages") {
        if let Some(value) = args.get(idx + 1).and_then(|s| s.parse().ok()) {
            return value;
        }
        log::warn!("Ignoring unparseable --pages value, defaulting to 0");
    }
    0
}

fn print_report(profile: &Profile) {
    let user = &profile.user;
    let timeline = &profile.timeline;
    let followers = &profile.followers;

    println!();
    println!("Report for @{}", user.screen_name);
    println!("=====================================");
    println!("Tweets:               {}", user.statuses_count);
    println!("Followers:            {}", user.followers_count);
    println!("Friends:              {}", user.friends_count);
    println!();
    println!("Analyzed tweets:      {}", timeline.activity_count());
    println!("Active days:          {}", timeline.days.len());
    println!("Avg tweets per day:   {}", timeline.average_activities_per_day);
    println!("Avg tweet length:     {}", timeline.average_text_length);

    let current_velocity = timeline
        .days
        .first()
        .and_then(|day| day.velocity)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    println!("Current velocity:     {}", current_velocity);

    println!();
    println!("Analyzed followers:   {}", followers.entry_count());
    println!("Reach potential:      {}", followers.total_reach_potential);
    println!("Avg reach potential:  {}", followers.average_reach_potential);
}

async fn run(screen_name: &str, extra_pages: u32) -> Result<(), FetchError> {
    let config = EngineConfig::from_env();

    log::info!("🚀 Starting report");
    log::info!("   API base: {}", config.api_base);
    log::info!("   Page size: {}", config.page_size);

    let client = Arc::new(HttpSocialGraphClient::new(
        &config.api_base,
        Duration::from_secs(config.http_timeout_secs),
    )?);
    let coordinator = RetrievalCoordinator::new(client.clone(), config.page_size);

    let mut profile = coordinator.load_initial(screen_name).await?;

    if extra_pages > 0 {
        log::info!("Fetching up to {} more timeline pages...", extra_pages);
        let changed = coordinator.extend_timeline(&mut profile, extra_pages).await?;
        if changed {
            coordinator
                .extend_roster(&mut profile, RosterKind::Followers)
                .await?;
        }
    }

    print_report(&profile);

    // One quota line so the operator knows how much headroom is left
    let monitor = RateLimitMonitor::new(client);
    match monitor.poll_once().await {
        Ok(status) => {
            println!();
            println!(
                "Rate limit: {} calls remaining ({}), resets at {}",
                status.remaining,
                status.severity.as_str(),
                status.reset_at.format("%H:%M")
            );
        }
        Err(e) => {
            log::warn!("⚠️  Could not fetch quota status: {}", e);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let screen_name = match args.get(1) {
        Some(name) if !name.starts_with("--") => name.clone(),
        _ => {
            eprintln!("Usage: report <screen_name> [--pages N]");
            return ExitCode::FAILURE;
        }
    };
    let extra_pages = parse_pages_from_args(&args);

    match run(&screen_name, extra_pages).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(FetchError::InvalidIdentity(name)) => {
            eprintln!("Screen names may only contain letters and digits: {:?}", name);
            ExitCode::FAILURE
        }
        Err(FetchError::NotFound(name)) => {
            eprintln!("No such user: {}", name);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("❌ Report failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
