//! Race session - one player, one stable of horses, many races
//!
//! Ties together:
//! - Roster built from [`RaceConfig`]
//! - A fresh [`RaceEngine`] per race, sharing one random source
//! - The player's [`Wallet`] and its [`BalanceStore`]

use crate::config::{ConfigError, RaceConfig};
use derby_betting::{BalanceStore, Bet, BetError, Settlement, StoreError, Wallet};
use derby_core::{Horse, LaneNumber, RaceResult, RaceSnapshot};
use derby_engine::{RaceEngine, RaceError, RaceEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Race(#[from] RaceError),

    #[error("Invalid bet: {0}")]
    Bet(#[from] BetError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a race ended for the session
#[derive(Debug, Clone, PartialEq)]
pub enum RaceOutcome {
    /// Someone crossed the line; any bet has been settled
    Finished {
        result: RaceResult,
        settlement: Option<Settlement>,
    },
    /// No standing horse could move before anyone finished; any stake was refunded
    Abandoned { ticks: u64, refunded: Option<Decimal> },
}

pub struct RaceSession<S> {
    config: RaceConfig,
    horses: Vec<Horse>,
    wallet: Wallet,
    store: S,
    pending_bet: Option<Bet>,
    rng: StdRng,
    races_run: u64,
}

impl<S: BalanceStore> RaceSession<S> {
    /// Validate the configuration, build the roster and load the balance
    pub fn new(config: RaceConfig, store: S) -> Result<Self, SessionError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let horses = config.build_horses();
        let wallet = Wallet::new(store.load());

        log::info!(
            "Session ready: {} horses, race length {}, balance {}",
            horses.len(),
            config.race_length,
            wallet.balance()
        );

        Ok(Self {
            config,
            horses,
            wallet,
            store,
            pending_bet: None,
            rng,
            races_run: 0,
        })
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Roster in lane order
    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    /// Horse in a 1-based lane, for customisation between races
    pub fn horse_mut(&mut self, lane: LaneNumber) -> Option<&mut Horse> {
        lane.checked_sub(1).and_then(|idx| self.horses.get_mut(idx))
    }

    pub fn balance(&self) -> Decimal {
        self.wallet.balance()
    }

    pub fn pending_bet(&self) -> Option<&Bet> {
        self.pending_bet.as_ref()
    }

    pub fn races_run(&self) -> u64 {
        self.races_run
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Bet on a horse for the next race
    ///
    /// A bet already pending is refunded and replaced.
    pub fn place_bet(&mut self, horse_name: &str, stake: Decimal) -> Result<&Bet, SessionError> {
        let mut wallet = self.wallet;
        if let Some(previous) = self.pending_bet.take() {
            log::info!("Replacing bet on {}", previous.horse_name);
            wallet = wallet.refund(&previous);
        }

        match wallet.place_bet(&self.horses, horse_name, stake) {
            Ok((wallet, bet)) => {
                self.wallet = wallet;
                Ok(self.pending_bet.insert(bet))
            }
            Err(e) => {
                // Keep the refund so a rejected replacement does not eat the old stake
                self.wallet = wallet;
                Err(e.into())
            }
        }
    }

    /// Run one race, reporting every tick to `on_tick`
    ///
    /// Settles the pending bet when someone wins. If every horse is down or
    /// stuck at zero confidence the race can never finish, so it is abandoned
    /// and the stake returned.
    pub async fn run_race<F>(&mut self, mut on_tick: F) -> Result<RaceOutcome, SessionError>
    where
        F: FnMut(&RaceSnapshot),
    {
        let race_length = self.config.race_length;
        let mut engine = RaceEngine::with_rng(
            self.horses.len(),
            race_length,
            self.config.engine_config(),
            &mut self.rng,
        )?;
        for (idx, horse) in self.horses.iter_mut().enumerate() {
            engine.assign_lane(horse, idx + 1)?;
        }

        let mut run = engine.run()?;
        let mut result = None;

        while let Some(event) = run.next_event().await {
            match event {
                RaceEvent::Tick(snapshot) => {
                    on_tick(&snapshot);
                    if snapshot.is_stalled() && snapshot.leading_distance() < race_length {
                        log::warn!("No standing horse can move, abandoning race");
                        break;
                    }
                }
                RaceEvent::Finished(finished) => {
                    result = Some(finished);
                    break;
                }
            }
        }
        let ticks = run.ticks();
        self.races_run += 1;

        let bet = self.pending_bet.take();
        let outcome = match result {
            Some(result) => {
                let settlement = bet.map(|bet| {
                    let (wallet, settlement) = self.wallet.settle(&bet, &result);
                    self.wallet = wallet;
                    settlement
                });
                RaceOutcome::Finished { result, settlement }
            }
            None => {
                let refunded = bet.map(|bet| {
                    self.wallet = self.wallet.refund(&bet);
                    bet.stake
                });
                RaceOutcome::Abandoned { ticks, refunded }
            }
        };

        Ok(outcome)
    }

    /// Persist the current balance
    pub fn save(&mut self) -> Result<(), SessionError> {
        self.store.save(self.wallet.balance())?;
        Ok(())
    }

    /// Reload the balance from the store, dropping any pending bet
    pub fn load(&mut self) -> Decimal {
        self.pending_bet = None;
        self.wallet = Wallet::new(self.store.load());
        self.wallet.balance()
    }

    /// Start over with the starting balance, saving it immediately
    pub fn new_game(&mut self) -> Result<Decimal, SessionError> {
        self.pending_bet = None;
        let balance = self.store.reset()?;
        self.wallet = Wallet::new(balance);
        Ok(balance)
    }
}
