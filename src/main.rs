//! Connect Four on the command line.
//!
//! ## Usage
//!
//! - `connect-four` - Play against the Monte Carlo mover
//! - `connect-four play --red random --yellow monte-carlo` - Watch a game
//! - `connect-four match --games 20` - Play a series and print the tally
//!
//! Set `RUST_LOG=debug` to see candidate scores and game results.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use connect_four::console::ConsoleMover;
use connect_four::constants::{DEFAULT_GAMES, DEFAULT_LEVEL};
use connect_four::game::{self, GameError};
use connect_four::montecarlo::MonteCarloMover;
use connect_four::mover::{Mover, RandomMover};
use connect_four::state::{GameState, Player};

/// Connect Four with random and Monte Carlo players
#[derive(Parser)]
#[command(name = "connect-four")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game, showing the board as it goes
    Play(PlayArgs),
    /// Play a series of games between computer movers and print the tally
    Match(MatchArgs),
}

/// Kind of mover for one side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Human,
    Random,
    MonteCarlo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    Red,
    Yellow,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Player::Red,
            Side::Yellow => Player::Yellow,
        }
    }
}

#[derive(Args)]
struct EngineArgs {
    /// Playouts per candidate move for the Monte Carlo mover
    #[arg(short, long, default_value_t = DEFAULT_LEVEL)]
    level: usize,
    /// Seed for the random generators (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct PlayArgs {
    #[arg(long, value_enum, default_value_t = Kind::Human)]
    red: Kind,
    #[arg(long, value_enum, default_value_t = Kind::MonteCarlo)]
    yellow: Kind,
    /// Side that moves first
    #[arg(long, value_enum, default_value_t = Side::Red)]
    first: Side,
    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args)]
struct MatchArgs {
    #[arg(long, value_enum, default_value_t = Kind::Random)]
    red: Kind,
    #[arg(long, value_enum, default_value_t = Kind::MonteCarlo)]
    yellow: Kind,
    /// Number of games; the first player alternates
    #[arg(short, long, default_value_t = DEFAULT_GAMES)]
    games: usize,
    #[command(flatten)]
    engine: EngineArgs,
}

/// Prints the board and the chosen column around a computer mover.
struct Announced(Box<dyn Mover>);

impl Mover for Announced {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn next_move(&mut self, state: &GameState) -> Result<usize, GameError> {
        println!("{state}");
        let col = self.0.next_move(state)?;
        println!("{} plays column {}\n", self.0.name(), col + 1);
        Ok(col)
    }
}

fn make_mover(kind: Kind, side: Side, level: usize) -> Box<dyn Mover> {
    match kind {
        Kind::Human => {
            let name = match side {
                Side::Red => "Red player",
                Side::Yellow => "Yellow player",
            };
            Box::new(ConsoleMover::stdio(name))
        }
        Kind::Random => Box::new(RandomMover::new()),
        Kind::MonteCarlo => Box::new(MonteCarloMover::new(level)),
    }
}

fn seed(engine: &EngineArgs) {
    if let Some(seed) = engine.seed {
        fastrand::seed(seed);
    }
}

fn play(args: PlayArgs) -> Result<()> {
    seed(&args.engine);
    let wrap = |kind, side| {
        let mover = make_mover(kind, side, args.engine.level);
        if kind == Kind::Human {
            mover
        } else {
            Box::new(Announced(mover)) as Box<dyn Mover>
        }
    };
    let mut red = wrap(args.red, Side::Red);
    let mut yellow = wrap(args.yellow, Side::Yellow);

    println!("Connect Four: {} (o) vs {} (x)\n", red.name(), yellow.name());
    let end = game::run(&mut *red, &mut *yellow, GameState::new(args.first.into()))
        .context("game aborted")?;

    println!("{end}");
    match end.winner() {
        Some(Player::Red) => println!("{} (Red) wins!", red.name()),
        Some(Player::Yellow) => println!("{} (Yellow) wins!", yellow.name()),
        None => println!("Draw."),
    }
    Ok(())
}

fn play_match(args: MatchArgs) -> Result<()> {
    if args.red == Kind::Human || args.yellow == Kind::Human {
        bail!("match only supports computer movers; use `play` for human games");
    }
    seed(&args.engine);
    let mut red = make_mover(args.red, Side::Red, args.engine.level);
    let mut yellow = make_mover(args.yellow, Side::Yellow, args.engine.level);

    let tally = game::play_series(&mut *red, &mut *yellow, args.games, None)
        .context("match aborted")?;

    println!("{} games", tally.games());
    println!("  {} (Red): {} wins", red.name(), tally.red);
    println!("  {} (Yellow): {} wins", yellow.name(), tally.yellow);
    println!("  draws: {}", tally.draws);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Match(args)) => play_match(args),
        None => play(PlayArgs {
            red: Kind::Human,
            yellow: Kind::MonteCarlo,
            first: Side::Red,
            engine: EngineArgs {
                level: DEFAULT_LEVEL,
                seed: None,
            },
        }),
    }
}
