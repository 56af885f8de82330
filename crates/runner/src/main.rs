//! Derby CLI - run horse races in the terminal and bet on them

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use rust_decimal::Decimal;
use std::path::PathBuf;

use derby_betting::FileBalanceStore;
use derby_core::RaceSnapshot;
use derby_core::catalog::{BREEDS, COAT_COLOURS, EQUIPMENT};
use derby_runner::{RaceConfig, RaceOutcome, RaceSession, render_track, render_winner};

#[derive(Parser)]
#[command(name = "derby")]
#[command(author, version, about = "Terminal horse racing with betting", long_about = None)]
struct Cli {
    /// Load race configuration from a JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of horses (2-10); extra horses get default names
    #[arg(long)]
    horses: Option<usize>,

    /// Track length (10-100)
    #[arg(short, long)]
    length: Option<u32>,

    /// Name of the horse to bet on before each race
    #[arg(short, long, requires = "stake")]
    bet_on: Option<String>,

    /// Amount to stake on each race
    #[arg(short, long, requires = "bet_on")]
    stake: Option<Decimal>,

    /// File holding the saved balance
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Do not pause or draw between ticks, print only the final board
    #[arg(long)]
    headless: bool,

    /// Number of races to run
    #[arg(short, long, default_value = "1")]
    races: u32,

    /// Reset the saved balance to the starting amount
    #[arg(long)]
    new_game: bool,

    /// List the breeds, coat colours and equipment horses can have
    #[arg(long)]
    list_options: bool,
}

fn print_options() {
    println!("Breeds:       {}", BREEDS.join(", "));
    println!("Coat colours: {}", COAT_COLOURS.join(", "));
    println!("Equipment:    {}", EQUIPMENT.join(", "));
}

fn load_config(cli: &Cli) -> Result<RaceConfig> {
    let mut config = match &cli.config {
        Some(path) => RaceConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RaceConfig::default(),
    };

    if let Some(count) = cli.horses {
        config = config.with_horse_count(count);
    }
    if let Some(length) = cli.length {
        config.race_length = length;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(path) = &cli.save_file {
        config.save_file = path.clone();
    }
    if cli.headless {
        config.tick_interval_ms = 0;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list_options {
        print_options();
        return Ok(());
    }

    let config = load_config(&cli)?;
    let race_length = config.race_length;
    let store = FileBalanceStore::new(&config.save_file);
    let mut session = RaceSession::new(config, store)?;

    if cli.new_game {
        let balance = session.new_game()?;
        println!("New game started with {}", balance);
    }
    println!("Balance: {}", session.balance());

    for race in 1..=cli.races {
        if let (Some(name), Some(stake)) = (&cli.bet_on, cli.stake) {
            match session.place_bet(name, stake) {
                Ok(bet) => println!("Bet {} on {}", bet.stake, bet.horse_name),
                Err(e) => println!("{}", e),
            }
        }

        let mut last: Option<RaceSnapshot> = None;
        let outcome = session
            .run_race(|snapshot| {
                if !cli.headless {
                    println!("{}\n", render_track(snapshot, race_length));
                }
                last = Some(snapshot.clone());
            })
            .await?;

        if cli.headless {
            if let Some(snapshot) = &last {
                println!("{}", render_track(snapshot, race_length));
            }
        }

        match &outcome {
            RaceOutcome::Finished { result, settlement } => {
                println!("Race {}: {}", race, render_winner(result));
                if let Some(settlement) = settlement {
                    if settlement.won {
                        println!("You won {}!", settlement.payout);
                    } else {
                        println!("Your horse lost.");
                    }
                }
            }
            RaceOutcome::Abandoned { ticks, refunded } => {
                println!("Race {}: no horse could finish after {} ticks, race abandoned", race, ticks);
                if let Some(stake) = refunded {
                    println!("Your stake of {} was returned.", stake);
                }
            }
        }

        for horse in session.horses() {
            println!("  {} confidence {:.1}", horse.name(), horse.confidence());
        }
        println!("Balance: {}", session.balance());

        if let Err(e) = session.save() {
            log::error!("Could not save balance: {}", e);
        }
    }

    Ok(())
}
