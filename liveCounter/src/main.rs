use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use co2saved::analysis::reporting::{format_schedule, TerminalDisplay};
use co2saved::analysis::snapshot::DashboardSnapshot;
use co2saved::cli::cli::Args;
use co2saved::config::const_funcs::parse_reference_time;
use co2saved::models::time_offset::{TimeOffset, Timeframe};
use co2saved::share::share_actions::{perform_share, ShareAction, ShareOutcome, TerminalShareEnvironment};
use co2saved::utils::csv_export;
use co2saved::utils::logging::{self, FileIOType, OperationCategory};
use co2saved::utils::traits::{Clock, OffsetClock, SystemClock};
use co2saved::{EquivalenceConverter, LiveCounter, SavingsEstimator, TrackerConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .context("Failed to initialise logging")?;

    let mut config = load_config(args.config())?;
    if let Some(page_url) = args.page_url() {
        config.page_url = page_url.to_string();
    }

    let estimator = SavingsEstimator::new(&config);
    let mut converter = EquivalenceConverter::from_config(&config);
    converter.select(args.equivalent());
    let timeframe = Timeframe::from_selection(args.timeframe());

    match args.at() {
        Some(at) => {
            let origin = parse_reference_time(at)
                .with_context(|| format!("Invalid --at timestamp: {}", at))?;
            run(&args, &config, estimator, converter, timeframe, OffsetClock::starting_at(origin))?
        }
        None => run(&args, &config, estimator, converter, timeframe, SystemClock)?,
    }

    logging::print_timing_report();
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<TrackerConfig> {
    let _timing = logging::start_timing("load_config",
        OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

    match path {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path)),
        None => TrackerConfig::compiled().context("Compiled-in configuration is invalid"),
    }
}

fn run<C: Clock>(
    args: &Args,
    config: &TrackerConfig,
    estimator: SavingsEstimator,
    converter: EquivalenceConverter,
    timeframe: Timeframe,
    clock: C,
) -> Result<()> {
    let share_action = args
        .share()
        .map(str::parse::<ShareAction>)
        .transpose()
        .map_err(|e| anyhow!(e))?;

    if args.json() {
        let snapshot = DashboardSnapshot::build(
            &estimator,
            &converter,
            clock.now(),
            TimeOffset::from_selection(args.offset()),
            timeframe,
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return export_csv(args.csv_dir(), &snapshot);
    }

    println!("{}", format_schedule(&estimator, &clock.now()));

    let mut counter = LiveCounter::new(config, estimator, converter, clock, TerminalDisplay::new())
        .with_animation(!args.no_animation())
        .with_timeframe(timeframe);
    counter.set_time_offset(args.offset());

    if let Some(action) = share_action {
        let snapshot = counter.tick().clone();
        let mut env = TerminalShareEnvironment::new(std::io::stdout());
        match perform_share(action, &mut env, &snapshot.share_savings, &config.page_url) {
            ShareOutcome::OpenUrl(url) => counter.notify(&format!("Open to share: {}", url)),
            ShareOutcome::Shared => counter.notify("Shared"),
            outcome => {
                if let Some(notice) = outcome.notice() {
                    counter.notify(notice);
                }
            }
        }
        counter.finish();
        return export_csv(args.csv_dir(), &snapshot);
    }

    let ticks = counter.run(args.ticks());
    info!(ticks, "counter finished");

    match counter.last_snapshot() {
        Some(snapshot) => export_csv(args.csv_dir(), snapshot),
        None => Ok(()),
    }
}

fn export_csv(dir: Option<&str>, snapshot: &DashboardSnapshot) -> Result<()> {
    let Some(dir) = dir else {
        return Ok(());
    };
    let dir = Path::new(dir);

    let breakdown = csv_export::export_period_breakdown(dir, &snapshot.future.breakdown, &snapshot.generated_at)
        .map_err(|e| anyhow!("Failed to export period breakdown: {}", e))?;
    let equivalents = csv_export::export_equivalents(dir, &snapshot.equivalents, &snapshot.generated_at)
        .map_err(|e| anyhow!("Failed to export equivalents: {}", e))?;

    println!("CSV export written to {} and {}", breakdown.display(), equivalents.display());
    Ok(())
}
