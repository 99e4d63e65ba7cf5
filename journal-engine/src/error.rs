//! Engine error type.

use thiserror::Error;

use crate::models::AccountRole;

/// Errors raised by the engine.
///
/// Parsing and tax detection never fail; generation fails only when the
/// narration carries no amount or the supplied chart of accounts is missing a
/// required account role (a configuration defect, not a user-input defect).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Amount not found in narration")]
    AmountNotFound,

    #[error("No {role} account found in the chart of accounts")]
    MissingAccount { role: AccountRole },
}

impl EngineError {
    pub fn missing(role: AccountRole) -> Self {
        EngineError::MissingAccount { role }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
