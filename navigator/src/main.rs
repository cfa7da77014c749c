mod cli;
mod logging;

use std::time::Duration;

use clap::Parser;
use eyre::Result;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use cli::{Args, Command, PolicyKind};
use logging::Logger;
use navigator::{
    maze::{Maze, ParsedMaze},
    policies::{Homing, HomingConfig, NavigationPolicy, RandomWalk, RandomWalkConfig, RunSummary},
    random::StdRandom,
    sim::SimulatedAgent,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    let seed = args.seed.unwrap_or_else(rand::random);
    debug!("seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    info!("no map, only walls and a hunch.");

    match &args.command {
        Command::Random { replan_one_in } => {
            let config = RandomWalkConfig {
                replan_one_in: *replan_one_in,
            };
            let policy = RandomWalk::with_random(config, StdRandom::seeded(seed))?;
            let parsed = load_maze(&args, &mut rng)?;
            run_single(policy, PolicyKind::RandomWalk, parsed, &args).await?;
        }
        Command::Homing { no_fallback } => {
            let config = HomingConfig {
                fallback_to_any: !no_fallback,
            };
            let policy = Homing::with_random(config, StdRandom::seeded(seed));
            let parsed = load_maze(&args, &mut rng)?;
            run_single(policy, PolicyKind::Homing, parsed, &args).await?;
        }
        Command::Benchmark { trials } => {
            run_benchmark(&args, *trials, &mut rng).await?;
        }
    }

    Ok(())
}

fn load_maze(args: &Args, rng: &mut StdRng) -> Result<ParsedMaze> {
    match &args.map {
        Some(path) => {
            info!("loading map: {}", path.display());
            Maze::load(path)
        }
        None => {
            debug!("generating {}x{} maze", args.width, args.height);
            Maze::generate(args.width, args.height, rng)
        }
    }
}

// ========== Runs ==========

/// runs `policy` on a blocking thread; ctrl-c cancels it through its handle
async fn run_policy<P>(
    mut policy: P,
    parsed: ParsedMaze,
    delay: i64,
    move_limit: usize,
) -> Result<RunSummary>
where
    P: NavigationPolicy + Send + 'static,
{
    policy.set_delay(delay)?;

    let handle = policy.cancel_handle();
    let mut agent = SimulatedAgent::from_parsed(parsed)?;
    if move_limit > 0 {
        agent = agent.with_move_limit(move_limit, handle.clone());
    }

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling run");
            handle.reset();
        }
    });

    let result = tokio::task::spawn_blocking(move || policy.start(&mut agent)).await?;
    interrupt.abort();

    Ok(result?)
}

async fn run_single<P>(policy: P, kind: PolicyKind, parsed: ParsedMaze, args: &Args) -> Result<()>
where
    P: NavigationPolicy + Send + 'static,
{
    info!("navigating with {}", kind.name());
    debug!("{}", policy.describe());
    if args.delay > 0 {
        debug!("delay: {}ms", args.delay);
    }

    if let (Some(start), Some(target)) = (parsed.start, parsed.target) {
        debug!(
            "{}x{} maze: {} -> {}",
            parsed.maze.width(),
            parsed.maze.height(),
            start,
            target
        );
    }

    let summary = run_policy(policy, parsed, args.delay, args.move_limit).await?;
    print_result(&summary);
    Ok(())
}

async fn run_benchmark(args: &Args, trials: usize, rng: &mut StdRng) -> Result<()> {
    info!("benchmarking navigation policies over {} mazes", trials);

    let mut completed: Vec<(&str, RunSummary)> = Vec::new();

    for trial in 0..trials {
        let parsed = load_maze(args, rng)?;

        for kind in PolicyKind::all() {
            debug!("trial {}: {}", trial + 1, kind.name());
            let random = StdRandom::seeded(rng.gen_range(0..u64::MAX));

            let result = match kind {
                PolicyKind::RandomWalk => {
                    let policy = RandomWalk::with_random(RandomWalkConfig::default(), random)?;
                    run_policy(policy, parsed.clone(), args.delay, args.move_limit).await
                }
                PolicyKind::Homing => {
                    let policy = Homing::with_random(HomingConfig::default(), random);
                    run_policy(policy, parsed.clone(), args.delay, args.move_limit).await
                }
            };

            match result {
                Ok(summary) => completed.push((kind.name(), summary)),
                Err(e) => log::error!("{} failed: {}", kind.name(), e),
            }
        }
    }

    print_benchmark_summary(&completed);
    Ok(())
}

// ========== Utilities ==========

fn print_result(summary: &RunSummary) {
    if summary.reached() {
        info!("reached target in {} steps ({:?})", summary.steps, summary.elapsed);
    } else {
        info!("cancelled after {} steps ({:?})", summary.steps, summary.elapsed);
    }
    debug!(
        "moves: {} ahead, {} left, {} right, {} behind",
        summary.moves.ahead, summary.moves.left, summary.moves.right, summary.moves.behind
    );
    if summary.dead_ends > 0 {
        debug!("dead ends: {}", summary.dead_ends);
    }
}

fn print_benchmark_summary(results: &[(&str, RunSummary)]) {
    info!("\nbenchmark results:");
    info!(
        "{:<14} {:>8}  {:>10}  {:>12}  {:>12}",
        "policy", "reached", "avg steps", "avg time", "best"
    );
    info!("{:-<64}", "");

    for kind in PolicyKind::all() {
        let runs: Vec<&RunSummary> = results
            .iter()
            .filter(|(name, _)| *name == kind.name())
            .map(|(_, summary)| summary)
            .collect();
        if runs.is_empty() {
            continue;
        }

        let reached = runs.iter().filter(|summary| summary.reached()).count();
        let avg_steps = runs.iter().map(|summary| summary.steps).sum::<usize>() / runs.len();
        let avg_time = runs.iter().map(|summary| summary.elapsed).sum::<Duration>() / runs.len() as u32;
        let best = runs
            .iter()
            .filter(|summary| summary.reached())
            .map(|summary| summary.steps)
            .min();

        info!(
            "{:<14} {:>8}  {:>10}  {:>12?}  {:>12}",
            kind.name(),
            format!("{}/{}", reached, runs.len()),
            avg_steps,
            avg_time,
            best.map_or_else(|| "-".to_string(), |steps| steps.to_string())
        );
    }

    if let Some((name, summary)) = results
        .iter()
        .filter(|(_, summary)| summary.reached())
        .min_by_key(|(_, summary)| summary.steps)
    {
        info!("\nshortest run: {} ({} steps)", name, summary.steps);
    }
}
