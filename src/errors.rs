//! Error types for the parlor engine
//!
//! Every rejection leaves state unchanged and is reported back to the
//! caller; nothing here is fatal to the process.

use thiserror::Error;

/// Root error type for all parlor operations
#[derive(Debug, Clone, Error)]
pub enum ParlorError {
    /// Stake exceeds the available balance. No round is started and no
    /// log entry is written.
    #[error("insufficient funds: stake {stake} exceeds balance {balance}")]
    InsufficientFunds { stake: f64, balance: f64 },

    /// A player-chosen parameter or action is invalid for the current
    /// game state (bad threshold, empty keno picks, acting out of turn).
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// A collaborator outside the game core (chat/vision) failed.
    /// Never affects the ledger.
    #[error("external service unavailable: {0}")]
    ExternalService(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ParlorError {
    /// Shorthand for the most common rejection.
    pub fn selection(msg: impl Into<String>) -> Self {
        ParlorError::InvalidSelection(msg.into())
    }
}

/// Convenience type alias for Results
pub type ParlorResult<T> = Result<T, ParlorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParlorError::InsufficientFunds {
            stake: 500.0,
            balance: 100.0,
        };
        assert!(err.to_string().contains("stake 500"));
        assert!(err.to_string().contains("balance 100"));
    }

    #[test]
    fn test_selection_shorthand() {
        let err = ParlorError::selection("no numbers picked");
        match err {
            ParlorError::InvalidSelection(msg) => assert_eq!(msg, "no numbers picked"),
            _ => panic!("expected invalid selection"),
        }
    }
}
