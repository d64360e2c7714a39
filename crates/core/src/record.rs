use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::{ExtractError, Field};
use crate::money::Amount;

pub const DATE_COLUMN: &str = "DATE";
/// Set when either card category fires.
pub const CARD_COLUMN: &str = "CARD";

// ── Categories ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebitCategory {
    AirtimeRecharge,
    Transfer,
    CardPos,
    CardOnline,
    SpendAndSave,
}

impl DebitCategory {
    /// Pipeline evaluation order.
    pub const ALL: [DebitCategory; 5] = [
        DebitCategory::AirtimeRecharge,
        DebitCategory::Transfer,
        DebitCategory::CardPos,
        DebitCategory::CardOnline,
        DebitCategory::SpendAndSave,
    ];

    pub fn flag_column(self) -> &'static str {
        match self {
            DebitCategory::AirtimeRecharge => "AIRTIME RECHARGE",
            DebitCategory::Transfer => "TRANSFER",
            DebitCategory::CardPos => "CARD POS WITHDRAWAL",
            DebitCategory::CardOnline => "CARD ONLINE",
            DebitCategory::SpendAndSave => "SPEND AND SAVE",
        }
    }
}

impl fmt::Display for DebitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebitCategory::AirtimeRecharge => write!(f, "airtime recharge"),
            DebitCategory::Transfer => write!(f, "transfer"),
            DebitCategory::CardPos => write!(f, "card pos"),
            DebitCategory::CardOnline => write!(f, "card online"),
            DebitCategory::SpendAndSave => write!(f, "spend and save"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditCategory {
    Alert,
    Reversal,
}

impl CreditCategory {
    /// Pipeline evaluation order.
    pub const ALL: [CreditCategory; 2] = [CreditCategory::Alert, CreditCategory::Reversal];

    pub fn flag_column(self) -> &'static str {
        match self {
            CreditCategory::Alert => "CREDIT BY ALERT",
            CreditCategory::Reversal => "CREDIT BY REVERSAL",
        }
    }
}

impl fmt::Display for CreditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditCategory::Alert => write!(f, "credit by alert"),
            CreditCategory::Reversal => write!(f, "credit by reversal"),
        }
    }
}

// ── Matches ──────────────────────────────────────────────────────────────────

/// A category that fired, with whatever fields its extractor managed to pull out.
pub trait CategoryMatch {
    type Category: Copy + Eq + fmt::Display;

    fn category(&self) -> Self::Category;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum DebitMatch {
    AirtimeRecharge {
        network: Option<String>,
        phone_number: Option<String>,
    },
    Transfer {
        receiver: Option<String>,
        description: Option<String>,
    },
    CardPos,
    CardOnline,
    SpendAndSave,
}

impl CategoryMatch for DebitMatch {
    type Category = DebitCategory;

    fn category(&self) -> DebitCategory {
        match self {
            DebitMatch::AirtimeRecharge { .. } => DebitCategory::AirtimeRecharge,
            DebitMatch::Transfer { .. } => DebitCategory::Transfer,
            DebitMatch::CardPos => DebitCategory::CardPos,
            DebitMatch::CardOnline => DebitCategory::CardOnline,
            DebitMatch::SpendAndSave => DebitCategory::SpendAndSave,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CreditMatch {
    Alert {
        sender: Option<String>,
        /// The alert template carries no free text, so this is always empty.
        description: String,
    },
    Reversal,
}

impl CategoryMatch for CreditMatch {
    type Category = CreditCategory;

    fn category(&self) -> CreditCategory {
        match self {
            CreditMatch::Alert { .. } => CreditCategory::Alert,
            CreditMatch::Reversal => CreditCategory::Reversal,
        }
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

/// The classified form of one alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord<M> {
    pub date: NaiveDate,
    /// Amount of the last amount-bearing category that fired.
    pub amount: Option<Amount>,
    /// Categories that fired, in pipeline order.
    pub matches: Vec<M>,
    pub failures: Vec<ExtractError>,
}

pub type DebitRecord = TransactionRecord<DebitMatch>;
pub type CreditRecord = TransactionRecord<CreditMatch>;

impl<M> TransactionRecord<M> {
    pub fn new(date: NaiveDate) -> Self {
        TransactionRecord {
            date,
            amount: None,
            matches: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_matched(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.failures.iter().map(ExtractError::field)
    }
}

impl<M: CategoryMatch> TransactionRecord<M> {
    pub fn is_flagged(&self, category: M::Category) -> bool {
        self.matches.iter().any(|m| m.category() == category)
    }

    pub fn get(&self, category: M::Category) -> Option<&M> {
        self.matches.iter().find(|m| m.category() == category)
    }
}

// ── Field/value view for export ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Date(NaiveDate),
    Text(String),
    Amount(Amount),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Amount(a) => write!(f, "{a}"),
            // Downstream sheets expect the literal strings, not booleans.
            FieldValue::Flag(true) => f.write_str("True"),
            FieldValue::Flag(false) => f.write_str("False"),
        }
    }
}

/// A record as the flat column/value mapping the export layer consumes.
pub trait RecordFields {
    /// Every column this record type can produce, in export order.
    const COLUMNS: &'static [&'static str];

    fn date(&self) -> NaiveDate;

    /// Present fields only: `DATE` and every flag always, detail columns and
    /// `AMOUNT` only when extracted.
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;

    /// One cell per entry of `COLUMNS`; absent fields become empty cells.
    fn row(&self) -> Vec<String> {
        let fields = self.fields();
        Self::COLUMNS
            .iter()
            .map(|col| {
                fields
                    .iter()
                    .find(|(name, _)| name == col)
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn push_text(out: &mut Vec<(&'static str, FieldValue)>, field: Field, value: &Option<String>) {
    if let Some(v) = value {
        out.push((field.column(), FieldValue::Text(v.clone())));
    }
}

impl RecordFields for DebitRecord {
    const COLUMNS: &'static [&'static str] = &[
        DATE_COLUMN,
        "AIRTIME RECHARGE",
        "NETWORK",
        "PHONE NUMBER",
        "TRANSFER",
        "RECEIVER",
        "DESCRIPTION",
        CARD_COLUMN,
        "CARD POS WITHDRAWAL",
        "CARD ONLINE",
        "SPEND AND SAVE",
        "AMOUNT",
    ];

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut out = vec![(DATE_COLUMN, FieldValue::Date(self.date))];

        for category in DebitCategory::ALL {
            if category == DebitCategory::CardPos {
                let card = self.is_flagged(DebitCategory::CardPos)
                    || self.is_flagged(DebitCategory::CardOnline);
                out.push((CARD_COLUMN, FieldValue::Flag(card)));
            }

            let found = self.get(category);
            out.push((category.flag_column(), FieldValue::Flag(found.is_some())));

            match found {
                Some(DebitMatch::AirtimeRecharge { network, phone_number }) => {
                    push_text(&mut out, Field::Network, network);
                    push_text(&mut out, Field::PhoneNumber, phone_number);
                }
                Some(DebitMatch::Transfer { receiver, description }) => {
                    push_text(&mut out, Field::Receiver, receiver);
                    push_text(&mut out, Field::Description, description);
                }
                _ => {}
            }
        }

        if let Some(amount) = self.amount {
            out.push((Field::Amount.column(), FieldValue::Amount(amount)));
        }
        out
    }
}

impl RecordFields for CreditRecord {
    const COLUMNS: &'static [&'static str] = &[
        DATE_COLUMN,
        "CREDIT BY ALERT",
        "SENDER",
        "DESCRIPTION",
        "CREDIT BY REVERSAL",
        "AMOUNT",
    ];

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut out = vec![(DATE_COLUMN, FieldValue::Date(self.date))];

        for category in CreditCategory::ALL {
            let found = self.get(category);
            out.push((category.flag_column(), FieldValue::Flag(found.is_some())));

            if let Some(CreditMatch::Alert { sender, description }) = found {
                push_text(&mut out, Field::Sender, sender);
                out.push((Field::Description.column(), FieldValue::Text(description.clone())));
            }
        }

        if let Some(amount) = self.amount {
            out.push((Field::Amount.column(), FieldValue::Amount(amount)));
        }
        out
    }
}
