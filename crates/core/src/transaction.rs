use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("Invalid transaction date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// One alert as handed to the engine: the title text, the detail text and the
/// calendar date it was received on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub header: String,
    pub body: String,
    pub date: NaiveDate,
}

impl RawTransaction {
    pub fn new(
        header: impl Into<String>,
        body: impl Into<String>,
        date: &str,
    ) -> Result<Self, TransactionError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| TransactionError::InvalidDate(date.to_string()))?;
        Ok(Self::on(header, body, date))
    }

    pub fn on(header: impl Into<String>, body: impl Into<String>, date: NaiveDate) -> Self {
        RawTransaction {
            header: header.into(),
            body: body.into(),
            date,
        }
    }
}
