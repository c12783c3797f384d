use thiserror::Error;

use crate::session::SessionId;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Unit price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
}
