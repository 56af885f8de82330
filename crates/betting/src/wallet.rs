use derby_core::{Horse, RaceResult};
use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{BetError, BetResult};
use crate::lookup::find_horse;

/// Balance a new game starts with
pub const STARTING_BALANCE: Decimal = dec!(1000);

/// A winning bet returns this multiple of the stake
pub const PAYOUT_MULTIPLIER: Decimal = dec!(2);

/// A stake on one horse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bet {
    /// Name as registered on the horse, not as typed by the player
    pub horse_name: String,
    pub stake: Decimal,
}

/// Outcome of settling a bet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub won: bool,
    /// Amount credited back, zero on a loss
    pub payout: Decimal,
}

/// The player's money
///
/// A plain value: operations take the wallet and return the updated one,
/// so callers decide where the balance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    balance: Decimal,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Wallet {
    pub fn new(balance: Decimal) -> Self {
        Self { balance }
    }

    /// Fresh wallet holding the starting balance
    pub fn new_game() -> Self {
        Self::new(STARTING_BALANCE)
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Place a bet, debiting the stake immediately
    ///
    /// The horse is matched by name ignoring case; the first match wins.
    pub fn place_bet<'a, I>(self, horses: I, horse_name: &str, stake: Decimal) -> BetResult<(Self, Bet)>
    where
        I: IntoIterator<Item = &'a Horse>,
    {
        let horse = find_horse(horses, horse_name)
            .ok_or_else(|| BetError::HorseNotFound(horse_name.to_string()))?;

        if stake <= Decimal::ZERO {
            return Err(BetError::NonPositiveStake(stake));
        }
        if stake > self.balance {
            return Err(BetError::InsufficientFunds {
                stake,
                balance: self.balance,
            });
        }

        let bet = Bet {
            horse_name: horse.name().to_string(),
            stake,
        };
        let wallet = Self::new(self.balance - stake);

        info!("Bet placed on {} for ${}", bet.horse_name, stake);
        Ok((wallet, bet))
    }

    /// Settle a bet against a finished race, crediting any payout
    pub fn settle(self, bet: &Bet, result: &RaceResult) -> (Self, Settlement) {
        let won = result.is_won_by(&bet.horse_name);
        let payout = if won {
            bet.stake * PAYOUT_MULTIPLIER
        } else {
            Decimal::ZERO
        };

        debug!(
            "Settled bet on {} (winner {}): payout {}",
            bet.horse_name, result.winner_name, payout
        );

        (Self::new(self.balance + payout), Settlement { won, payout })
    }

    /// Return a stake untouched, for races abandoned without a winner
    pub fn refund(self, bet: &Bet) -> Self {
        Self::new(self.balance + bet.stake)
    }
}
