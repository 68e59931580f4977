use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

use monty_sim::logging::setup_logging;
use monty_sim::{run, Outcome, SimConfig, Strategy};

#[derive(Parser)]
#[command(name = "monty_sim")]
#[command(about = "Monty Hall stay-vs-switch simulation", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value = "10000", value_parser = clap::value_parser!(u64).range(1..))]
    games: u64,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Spread games across all cores
    #[arg(short, long)]
    parallel: bool,

    /// Output JSON file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug logging, including a few sample games
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> monty_sim::Result<()> {
    let args = Args::parse();
    let _logger = setup_logging(if args.verbose { "debug" } else { "info" })?;

    let config = SimConfig {
        games: args.games as usize,
        seed: args.seed,
        parallel: args.parallel,
    };

    let start = std::time::Instant::now();
    let results = run(&config)?;
    info!("completed in {:.2}s", start.elapsed().as_secs_f64());

    for game in results.games.iter().take(5) {
        debug!(
            "prize={} pick={} opened={} stay={:?} switch={:?}",
            game.prize, game.pick, game.opened, game.stay.outcome, game.switch.outcome
        );
    }

    let stats = results.stats();
    println!("{}", stats);
    for strategy in Strategy::ALL {
        println!(
            "{} won {} of {} games",
            strategy.name(),
            stats.count(strategy, Outcome::Win),
            stats.trials(strategy)
        );
    }

    if let Some(output_path) = args.output {
        results.save_json(&output_path)?;
        info!("wrote {}", output_path.display());
    }

    Ok(())
}
