use chrono::NaiveDate;
use kobo_core::RawTransaction;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

re!(re_whitespace, r"\s+");

fn h1_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("h1").expect("invalid h1 selector"))
}

fn span_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("span").expect("invalid span selector"))
}

/// Either element missing means the message is not a transactional alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertHtmlError {
    #[error("not a transactional email: no <h1> header")]
    MissingHeader,
    #[error("not a transactional email: no <span> body")]
    MissingBody,
}

/// The two strings the engine classifies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertText {
    pub header: String,
    pub body: String,
}

impl AlertText {
    pub fn into_transaction(self, date: NaiveDate) -> RawTransaction {
        RawTransaction::on(self.header, self.body, date)
    }
}

/// Text of the first `<h1>` and first `<span>` in an alert email, whitespace collapsed.
pub fn parse_alert_html(html: &str) -> Result<AlertText, AlertHtmlError> {
    let doc = Html::parse_document(html);
    let header = doc
        .select(h1_selector())
        .next()
        .map(element_text)
        .ok_or(AlertHtmlError::MissingHeader)?;
    let body = doc
        .select(span_selector())
        .next()
        .map(element_text)
        .ok_or(AlertHtmlError::MissingBody)?;
    Ok(AlertText { header, body })
}

fn element_text(el: ElementRef<'_>) -> String {
    let raw = el.text().collect::<String>();
    re_whitespace().replace_all(&raw, " ").trim().to_string()
}
