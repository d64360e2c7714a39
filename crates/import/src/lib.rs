//! Classification and field extraction for bank alert notifications.
//!
//! Matchers decide which debit/credit category an alert belongs to; extractors
//! slice typed fields out of alerts already known to match; the aggregators run
//! a batch through every matcher and fold the results into records.

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod aggregate;
pub mod amount;
pub mod anchors;
pub mod credit;
pub mod dates;
pub mod debit;
pub mod html;
pub mod observer;

pub use aggregate::{
    classify_credit, classify_debit, process_credit, process_debit, Aggregator, Classification,
};
pub use amount::{extract_amount, parse_amount_in};
pub use dates::{date_from_file_name, normalize_email_date, DateError};
pub use html::{parse_alert_html, AlertHtmlError, AlertText};
pub use observer::{AnyCategory, Diagnostic, NoopObserver, Observer, Pipeline, TracingObserver};
