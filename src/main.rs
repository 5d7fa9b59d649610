use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coach_diff::analysis::{BenchmarkTable, MetricGap, MetricsCalculator, ProfileMetrics, RankComparator};
use coach_diff::api::RiotApiClient;
use coach_diff::cache::MatchCache;
use coach_diff::config::Config;
use coach_diff::display::output::{
    display_error, display_gaps, display_profile, display_rank, Console,
};
use coach_diff::domain::{Match, RankEntry, Tier};
use coach_diff::error::AppError;

const MAX_MATCHES: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "Coach Diff")]
#[command(about = "Compare your ranked performance against your tier's benchmarks", long_about = None)]
struct Args {
    /// Riot Game Name
    game_name: String,

    /// Riot Tag (tag line)
    tag_line: String,

    /// Platform (default: RIOT_REGION or euw1)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of recent ranked matches to analyze (max: 100)
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Benchmark tier to compare against (default: current solo queue tier)
    #[arg(short, long)]
    tier: Option<Tier>,

    /// Benchmark table JSON file (default: COACHDIFF_BENCHMARKS or bundled table)
    #[arg(long)]
    benchmarks: Option<PathBuf>,

    /// Ignore cached matches and fetch everything again
    #[arg(long)]
    refresh: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Serialize)]
struct Report<'a> {
    player: String,
    rank: Option<&'a RankEntry>,
    benchmark_tier: Tier,
    next_tier: Tier,
    profile: &'a ProfileMetrics,
    gaps: &'a [MetricGap],
}

fn main() {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn load_benchmarks(path: Option<PathBuf>) -> Result<BenchmarkTable> {
    match path {
        Some(path) => BenchmarkTable::load(&path)
            .with_context(|| format!("loading benchmarks from {}", path.display())),
        None => BenchmarkTable::bundled().context("loading bundled benchmarks"),
    }
}

fn run(args: Args) -> Result<()> {
    // stdout carries only the report under --json
    let console = Console::new(args.json);

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(region) = args.region {
        config.region = region.to_ascii_lowercase();
    }

    let benchmarks = load_benchmarks(args.benchmarks.or_else(|| config.benchmarks_path.clone()))?;
    tracing::debug!(tiers = benchmarks.len(), "benchmarks loaded");

    let client = RiotApiClient::new(config.clone())?;
    let riot_id = format!("{}#{}", args.game_name, args.tag_line);
    console.info(&format!("Fetching data for {} in region {}", riot_id, config.region));

    // Step 1: account and summoner
    console.info("Step 1: Getting account info...");
    let account = client
        .get_account(&args.game_name, &args.tag_line)
        .with_context(|| format!("looking up {}", riot_id))?;
    let summoner = client.get_summoner(account.puuid())?;
    console.success(&format!(
        "Found {} (level {})",
        account.riot_id(),
        summoner.level()
    ));

    // Step 2: rank
    console.info("Step 2: Getting rank info...");
    let solo_entry = client
        .get_league_entries(account.puuid())?
        .into_iter()
        .find(RankEntry::is_solo_queue);
    let tier = args
        .tier
        .or_else(|| solo_entry.as_ref().map(RankEntry::tier))
        .ok_or_else(|| AppError::Unranked(account.riot_id()))?;

    // Step 3: matches, cached ones are reused
    console.info("Step 3: Fetching ranked match history...");
    let count = args.matches.clamp(1, MAX_MATCHES);
    let match_ids = client.get_match_ids(account.puuid(), count)?;
    if match_ids.is_empty() {
        console.warning("No ranked matches found in this queue");
    }

    let cache_dir = config.cache_dir.clone().unwrap_or_else(MatchCache::default_dir);
    let mut cache = if args.refresh {
        MatchCache::new(&account.riot_id(), &config.region)
    } else {
        MatchCache::load(&cache_dir, &account.riot_id(), &config.region).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable match cache");
            MatchCache::new(&account.riot_id(), &config.region)
        })
    };

    let missing: Vec<&String> = match_ids.iter().filter(|id| !cache.contains(id)).collect();
    tracing::info!(
        cached = match_ids.len() - missing.len(),
        to_fetch = missing.len(),
        "match cache lookup"
    );

    let mut fetched: Vec<Match> = Vec::new();
    if !missing.is_empty() {
        let pb = if console.is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(missing.len() as u64)
        };
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Fetching match details");

        for match_id in &missing {
            if let Some(game) = client.get_match(match_id)? {
                fetched.push(game);
            }
            pb.inc(1);
        }
        pb.finish_with_message("✓ Match data fetched");
    } else if !match_ids.is_empty() {
        console.success("⚡ Cache is up-to-date (no new matches)");
    }

    cache.add_matches(fetched);
    if let Err(e) = cache.save(&cache_dir) {
        tracing::warn!(error = %e, "could not save match cache");
    }

    let matches: Vec<Match> = match_ids
        .iter()
        .filter_map(|id| cache.get(id).cloned())
        .collect();

    // Step 4: profile and comparison
    let profile = MetricsCalculator::calculate(&matches, account.puuid());
    tracing::info!(
        eligible = profile.sample_size,
        skipped = matches.len() - profile.sample_size,
        "profile computed"
    );

    let (current, next) = benchmarks.pair_for(tier)?;
    let gaps = if profile.has_data() {
        RankComparator::compare(&profile, current, next)?
    } else {
        Vec::new()
    };

    if args.json {
        let report = Report {
            player: account.riot_id(),
            rank: solo_entry.as_ref(),
            benchmark_tier: current.tier(),
            next_tier: next.tier(),
            profile: &profile,
            gaps: &gaps,
        };
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
        return Ok(());
    }

    println!();
    display_rank(solo_entry.as_ref(), current.tier().as_str());
    display_profile(&profile);
    if profile.has_data() {
        display_gaps(&gaps, current.tier().as_str(), next.tier().as_str());
    }

    Ok(())
}
