//! Balance persistence
//!
//! The balance is a single decimal stored as plain text. A missing or
//! unreadable file is not an error: the player simply starts over with
//! [`STARTING_BALANCE`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::wallet::STARTING_BALANCE;

/// Where the player's balance lives between sessions
pub trait BalanceStore {
    /// Saved balance, or the starting balance if none can be read
    fn load(&self) -> Decimal;

    /// Persist a balance
    fn save(&mut self, balance: Decimal) -> Result<(), StoreError>;

    /// Start a new game: reset to the starting balance and save it
    fn reset(&mut self) -> Result<Decimal, StoreError> {
        self.save(STARTING_BALANCE)?;
        Ok(STARTING_BALANCE)
    }
}

/// Parse a saved balance, tolerating surrounding whitespace
fn parse_balance(text: &str) -> Option<Decimal> {
    let line = text.lines().next()?.trim();
    Decimal::from_str(line)
        .or_else(|_| Decimal::from_scientific(line))
        .ok()
}

/// Plain-text file holding one number
#[derive(Debug, Clone)]
pub struct FileBalanceStore {
    path: PathBuf,
}

impl FileBalanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BalanceStore for FileBalanceStore {
    fn load(&self) -> Decimal {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "No saved balance at {} ({}), starting with {}",
                    self.path.display(),
                    e,
                    STARTING_BALANCE
                );
                return STARTING_BALANCE;
            }
        };

        match parse_balance(&content) {
            Some(balance) => {
                info!("Loaded balance {} from {}", balance, self.path.display());
                balance
            }
            None => {
                warn!(
                    "Saved balance at {} is unreadable, starting with {}",
                    self.path.display(),
                    STARTING_BALANCE
                );
                STARTING_BALANCE
            }
        }
    }

    fn save(&mut self, balance: Decimal) -> Result<(), StoreError> {
        std::fs::write(&self.path, format!("{}\n", balance)).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        info!("Saved balance {} to {}", balance, self.path.display());
        Ok(())
    }
}

/// In-process store, for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryBalanceStore {
    saved: Option<Decimal>,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: Decimal) -> Self {
        Self {
            saved: Some(balance),
        }
    }
}

impl BalanceStore for MemoryBalanceStore {
    fn load(&self) -> Decimal {
        self.saved.unwrap_or(STARTING_BALANCE)
    }

    fn save(&mut self, balance: Decimal) -> Result<(), StoreError> {
        self.saved = Some(balance);
        Ok(())
    }
}
