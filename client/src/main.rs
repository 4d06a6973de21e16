use anyhow::{ensure, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use skillrank_core::{message::PlayerRecord, rating::Glicko2};
use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::PathBuf,
    process::exit,
};
use tracing_subscriber::EnvFilter;

mod simulate;

use simulate::Simulation;

/// Skillrank -- Glicko-2 ratings from simulated head-to-head matches.
#[derive(Parser)]
struct Options {
    /// Seed for the random number generator.
    ///
    /// If not given, a random seed is chosen and logged, so that the run can be reproduced.
    #[clap(short, long, env = "SKILLRANK_SEED", global = true)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a list of players with random skill, as JSON.
    Players {
        /// Number of players to generate.
        #[clap(short = 'n', long, env = "SKILLRANK_PLAYERS", default_value = "100")]
        count: usize,
    },

    /// Rate a list of players by pitting random pairs against each other.
    ///
    /// Each match is scored by scaling both players' skill by a random factor between 0.5 and 2;
    /// the higher score wins. Prints the final standings, weakest first.
    Simulate {
        /// JSON list of players (`[{"id": ..., "skill": ...}]`). Reads stdin if not given.
        #[clap(short, long, env = "SKILLRANK_INPUT")]
        input: Option<PathBuf>,

        /// Number of pairings to attempt.
        #[clap(short, long, env = "SKILLRANK_MATCHES", default_value = "1000000")]
        matches: u64,

        /// The Glicko-2 system constant.
        #[clap(short, long, env = "SKILLRANK_TAU", default_value = "0.5")]
        tau: f64,

        /// Output format for the standings.
        #[clap(short, long, value_enum, default_value = "csv")]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl Command {
    fn run(&self, rng: &mut StdRng, mut out: impl Write) -> anyhow::Result<()> {
        match self {
            Self::Players { count } => {
                let players = simulate::random_players(rng, *count);
                serde_json::to_writer_pretty(&mut out, &players)?;
                writeln!(out)?;
            }
            Self::Simulate {
                input,
                matches,
                tau,
                format,
            } => {
                let records = read_players(input.as_ref())?;
                let mut sim = Simulation::new(Glicko2::new(*tau), records);
                ensure!(sim.len() >= 2, "at least two players are needed");

                sim.run(rng, *matches);
                let standings = sim.standings();
                match format {
                    Format::Csv => simulate::write_csv(out, &standings)?,
                    Format::Json => {
                        serde_json::to_writer_pretty(&mut out, &standings)?;
                        writeln!(out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn read_players(input: Option<&PathBuf>) -> anyhow::Result<Vec<PlayerRecord>> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).context(format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    serde_json::from_reader(reader).context("malformed player list")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(true)
        .init();
    let opt = Options::parse();

    let seed = opt.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "seeding random number generator");
    let mut rng = StdRng::seed_from_u64(seed);

    if let Err(err) = opt.command.run(&mut rng, io::stdout().lock()) {
        eprintln!("{err:#}");
        exit(1);
    }
}
