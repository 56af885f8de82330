use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a bet is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("Stake must be positive, got {0}")]
    NonPositiveStake(Decimal),

    #[error("Insufficient funds: stake {stake} exceeds balance {balance}")]
    InsufficientFunds { stake: Decimal, balance: Decimal },

    #[error("Horse not found: {0}")]
    HorseNotFound(String),
}

/// Failure writing a balance
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to save balance to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type BetResult<T> = std::result::Result<T, BetError>;
