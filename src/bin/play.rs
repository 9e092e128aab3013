use clap::Parser;
use star_of_africa_rs::cli::{parse_lineup, print_player_help};
use star_of_africa_rs::engine::Oracle;
use star_of_africa_rs::game::{Game, GameConfig};

#[derive(Debug, Parser, Clone)]
#[command(name = "soa-play")]
#[command(about = "Play Star of Africa against the computer")]
struct Args {
    /// Comma-separated seats, CODE[:HOME[:NAME]]; H marks a human seat
    #[arg(long, default_value = "H:Cai:You,T:Tan,C:Cai,G:Tan")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Keep everybody in the game after the last horseshoe is found
    #[arg(long)]
    no_elimination: bool,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if args.help_players {
        print_player_help();
        return;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let seats = parse_lineup(&args.players, seed).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    let (specs, mut controllers): (Vec<_>, Vec<_>) = seats.into_iter().unzip();
    let config = GameConfig {
        seed,
        elimination: !args.no_elimination,
        players: specs,
        ..GameConfig::default()
    };

    let mut game = Game::new(config).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    let order: Vec<&str> = game.state.players.iter().map(|p| p.name.as_str()).collect();
    println!("Starting game {} (seed {seed})", game.id);
    println!("Playing order: {}", order.join(", "));
    println!("{}", "=".repeat(80));

    let mut oracle = Oracle::new();
    while !game.state.is_finished() {
        if game.state.turn_no >= game.state.config.turn_limit {
            println!("\nGame reached turn limit. No winner declared.");
            break;
        }
        let report = match game.play_tick(&mut oracle, &mut controllers) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        };

        println!("\nTurn {} - {}", report.turn_no, report.player);
        for event in &report.events {
            println!("  {event}");
        }
        println!("  Now in {} with {} pounds.", report.description, report.money);
        for controller in &mut controllers {
            controller.observe(&report);
        }
    }

    println!("\n{}", "=".repeat(80));
    if let Some(winner) = game.winner() {
        println!("Player {} won the game!", winner.name);
    }
    println!("The game lasted {} turns.", game.state.turn_no);
    if let Some(star) = game.state.tokens.star_location() {
        println!("The Star of Africa was hidden in {}.", star.full_name());
    }
}
