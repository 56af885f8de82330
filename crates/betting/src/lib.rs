//! Derby Betting
//!
//! The player's money, kept as an explicit value rather than global state:
//!
//! - **Wallet**: place a bet (debit) and settle it against a race result
//! - **Lookup**: find a horse by name, ignoring case, first match wins
//! - **Store**: load and save the balance as plain text

pub mod error;
pub mod lookup;
pub mod store;
pub mod wallet;

pub use error::{BetError, BetResult, StoreError};
pub use lookup::find_horse;
pub use store::{BalanceStore, FileBalanceStore, MemoryBalanceStore};
pub use wallet::{Bet, PAYOUT_MULTIPLIER, STARTING_BALANCE, Settlement, Wallet};
