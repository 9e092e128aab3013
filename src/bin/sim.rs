use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use clap::Parser;
use star_of_africa_rs::board::Node;
use star_of_africa_rs::cli::{
    PlayerInstance, StatisticsAccumulator, print_player_help, resolve_lineup,
};
use star_of_africa_rs::engine::Oracle;
use star_of_africa_rs::game::{Game, GameConfig, PlayerSpec};

#[derive(Debug, Parser, Clone)]
#[command(name = "soa-sim")]
#[command(about = "Star of Africa simulator - play many games between computer players")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1000)]
    num: u32,

    /// Comma-separated seats, CODE[:HOME[:NAME]] (e.g. T:Cai,T:Tan,C:Cai,G:Tan).
    /// Defaults to the config file's players, or the standard four
    #[arg(long)]
    players: Option<String>,

    /// Seed of the first game; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Keep everybody in the game after the last horseshoe is found
    #[arg(long)]
    no_elimination: bool,

    /// Keep the listed seating order instead of shuffling it every game
    #[arg(long)]
    fixed_order: bool,

    /// Give up on a game after this many rounds
    #[arg(long)]
    turn_limit: Option<u32>,

    /// JSON game config; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Silence per-game output
    #[arg(long)]
    quiet: bool,

    /// Number of worker threads for parallel execution
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if args.help_players {
        print_player_help();
        return;
    }

    let base = base_config(&args);
    let seats = match resolve_lineup(args.players.as_deref(), &base) {
        Ok(seats) => seats,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    if seats.iter().any(|(_, player)| player.is_human()) {
        eprintln!("Error: the simulator only seats computer players, use soa-play to join in");
        std::process::exit(1);
    }
    let (specs, controllers): (Vec<PlayerSpec>, Vec<PlayerInstance>) = seats.into_iter().unzip();
    let base = GameConfig {
        players: specs,
        ..base
    };
    if let Err(err) = base.validate() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    let start = Instant::now();
    let stats = if args.workers > 1 {
        run_parallel_simulations(&args, &base, &controllers)
    } else {
        run_sequential_simulations(&args, &base, &controllers, 0..args.num)
    };
    log::info!("{} games in {:?}", stats.stats.games, start.elapsed());

    if args.json {
        match serde_json::to_string_pretty(&stats.stats) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
    } else if !args.quiet {
        print_summary(&stats, &base.players);
    }
}

fn base_config(args: &Args) -> GameConfig {
    let mut config = match &args.config {
        Some(path) => {
            let loaded: Result<GameConfig, String> = std::fs::read_to_string(path)
                .map_err(|err| err.to_string())
                .and_then(|raw| serde_json::from_str(&raw).map_err(|err| err.to_string()));
            match loaded {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("Error: cannot load {}: {err}", path.display());
                    std::process::exit(1);
                }
            }
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(turn_limit) = args.turn_limit {
        config.turn_limit = turn_limit;
    }
    config.elimination &= !args.no_elimination;
    config.shuffle_order &= !args.fixed_order;
    config
}

fn run_game(
    base: &GameConfig,
    seats: &[PlayerInstance],
    oracle: &mut Oracle,
    game_idx: u32,
) -> Option<(star_of_africa_rs::game::GameOutcome, std::time::Duration)> {
    let seed = base.seed.wrapping_add(u64::from(game_idx));
    let config = GameConfig {
        seed,
        ..base.clone()
    };
    // Fresh controllers so random seats do not replay the same dice.
    let mut controllers: Vec<_> = seats
        .iter()
        .enumerate()
        .map(|(seat, player)| player.reseeded(seed.wrapping_add(seat as u64)))
        .collect();

    let start = Instant::now();
    let outcome = Game::new(config)
        .and_then(|mut game| game.play(oracle, &mut controllers));
    match outcome {
        Ok(outcome) => Some((outcome, start.elapsed())),
        Err(err) => {
            log::error!("game {} (seed {seed}) failed: {err}", game_idx + 1);
            None
        }
    }
}

fn run_sequential_simulations(
    args: &Args,
    base: &GameConfig,
    seats: &[PlayerInstance],
    games: std::ops::Range<u32>,
) -> StatisticsAccumulator {
    let mut stats = StatisticsAccumulator::new();
    let mut oracle = Oracle::new();
    let show_progress = !args.quiet && !args.json && args.workers <= 1;

    for game_idx in games {
        let played = run_game(base, seats, &mut oracle, game_idx);
        oracle.forget_layouts();
        let Some((outcome, duration)) = played else {
            continue;
        };
        stats.after(&outcome, duration);

        if show_progress {
            let last_n = 10;
            if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
                let star = outcome
                    .star_location
                    .map_or("?", Node::full_name);
                println!(
                    "Game {:>5}: Winner={:>8}, Turns={:>4}, Star={:<16} Horseshoe={:<5} Duration={:?}",
                    game_idx + 1,
                    outcome.winner_name.as_deref().unwrap_or("None"),
                    outcome.turns,
                    star,
                    outcome.horseshoe_win,
                    duration
                );
            } else if (game_idx + 1) % 100 == 0 {
                print!(".");
                let _ = std::io::stdout().flush();
            }
        }
    }
    stats
}

fn run_parallel_simulations(
    args: &Args,
    base: &GameConfig,
    seats: &[PlayerInstance],
) -> StatisticsAccumulator {
    let games_per_worker = args.num / args.workers as u32;
    let remainder = args.num % args.workers as u32;

    let mut stats = StatisticsAccumulator::new();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..args.workers as u32)
            .map(|worker_id| {
                let start_idx = worker_id * games_per_worker + worker_id.min(remainder);
                let count = games_per_worker + u32::from(worker_id < remainder);
                scope.spawn(move || {
                    run_sequential_simulations(args, base, seats, start_idx..start_idx + count)
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(worker) => stats.stats.merge(worker.stats),
                Err(_) => log::error!("a simulation worker panicked"),
            }
        }
    });
    stats
}

fn print_summary(stats: &StatisticsAccumulator, players: &[PlayerSpec]) {
    let stats = &stats.stats;
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nPlayer Summary:");
    println!("{:<12} {:<14} {:<6} {:<10} {:<10}", "Player", "Type", "Home", "Wins", "Win Rate");
    println!("{}", "-".repeat(56));
    for player in players {
        println!(
            "{:<12} {:<14} {:<6} {:<10} {:.2}%",
            player.name,
            player.archetype.to_string(),
            player.home.to_string(),
            stats.wins.get(&player.name).copied().unwrap_or(0),
            stats.win_rate(&player.name) * 100.0
        );
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.games);
    if stats.unfinished > 0 {
        println!("  Unfinished: {}", stats.unfinished);
    }
    println!("  Won by a horseshoe: {:.2}%", stats.horseshoe_rate() * 100.0);
    println!(
        "  Turns: mean {:.3}, standard deviation {:.3}",
        stats.turns.mean,
        stats.turns.std_dev()
    );
    println!("  Avg Duration: {:.2?}", stats.get_avg_duration());

    if stats.by_star_location.is_empty() {
        return;
    }
    println!("\nBy location of the Star:");
    println!(
        "{:<16} {:>6} {:>10} {:>8} {:>11}  Wins",
        "Location", "Games", "Avg turns", "Std", "Horseshoe%"
    );
    println!("{}", "-".repeat(80));
    for (node, location) in &stats.by_star_location {
        let wins: Vec<String> = location
            .wins
            .iter()
            .map(|(name, wins)| format!("{name} {wins}"))
            .collect();
        let horseshoe = if location.turns.count == 0 {
            0.0
        } else {
            f64::from(location.horseshoe_wins) / location.turns.count as f64 * 100.0
        };
        println!(
            "{:<16} {:>6} {:>10.2} {:>8.2} {:>10.2}%  {}",
            node.full_name(),
            location.turns.count,
            location.turns.mean,
            location.turns.std_dev(),
            horseshoe,
            wins.join(", ")
        );
    }
}
