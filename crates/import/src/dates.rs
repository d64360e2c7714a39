use chrono::{DateTime, NaiveDate};
use thiserror::Error;

re!(re_zone_comment, r"\s*\([^()]*\)\s*$");
re!(re_iso_date, r"\d{4}-\d{2}-\d{2}");

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Unparseable email date {0:?}")]
    Unparseable(String),
}

/// Calendar date of an email `Date:` header, in the sender's own offset.
///
/// Accepts `Mon, 20 Nov 2023 10:15:30 +0100 (WAT)` with or without the
/// trailing zone comment.
pub fn normalize_email_date(raw: &str) -> Result<NaiveDate, DateError> {
    let trimmed = re_zone_comment().replace(raw.trim(), "");
    DateTime::parse_from_rfc2822(&trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| DateError::Unparseable(raw.to_string()))
}

/// The first `YYYY-MM-DD` in a saved alert's file name, e.g.
/// `transaction_on_2023-11-20_10-15.html`.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let m = re_iso_date().find(name)?;
    NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok()
}
