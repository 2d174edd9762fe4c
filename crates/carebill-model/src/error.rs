use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid month '{0}': expected YYYY-MM or an era label like R8.1")]
    InvalidMonth(String),
    #[error("ledger sheet '{label}' not found (available: {available:?})")]
    MissingLedgerSheet {
        label: String,
        available: Vec<String>,
    },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, BillingError>;
