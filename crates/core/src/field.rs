use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An attribute the extractors pull out of alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Amount,
    Network,
    PhoneNumber,
    Receiver,
    Description,
    Sender,
}

impl Field {
    /// Column name used by the export layer.
    pub fn column(self) -> &'static str {
        match self {
            Field::Amount => "AMOUNT",
            Field::Network => "NETWORK",
            Field::PhoneNumber => "PHONE NUMBER",
            Field::Receiver => "RECEIVER",
            Field::Description => "DESCRIPTION",
            Field::Sender => "SENDER",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A field that could not be extracted from a transaction that matched its category.
///
/// None of these abort a batch: the aggregator records them on the transaction and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractError {
    #[error("{field}: anchor {anchor:?} not found")]
    AnchorNotFound { field: Field, anchor: String },
    #[error("{field}: slice {start}..{end} is outside the text")]
    OutOfRange { field: Field, start: usize, end: usize },
    #[error("AMOUNT: no currency amount found")]
    AmountNotFound,
    #[error("AMOUNT: malformed amount {raw:?}")]
    MalformedAmount { raw: String },
    #[error("{field}: extracted value is empty")]
    Empty { field: Field },
}

impl ExtractError {
    pub fn anchor(field: Field, anchor: impl Into<String>) -> Self {
        ExtractError::AnchorNotFound { field, anchor: anchor.into() }
    }

    pub fn field(&self) -> Field {
        match self {
            ExtractError::AnchorNotFound { field, .. }
            | ExtractError::OutOfRange { field, .. }
            | ExtractError::Empty { field } => *field,
            ExtractError::AmountNotFound | ExtractError::MalformedAmount { .. } => Field::Amount,
        }
    }
}
