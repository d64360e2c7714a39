use kobo_core::{ExtractError, Field};

use crate::anchors::{CREDIT_ALERT_PHRASE, REVERSAL_HEADER, SENDER_ANCHOR};

pub fn is_credit_by_alert(body: &str) -> bool {
    body.contains(CREDIT_ALERT_PHRASE)
}

pub fn is_credit_by_reversal(header: &str) -> bool {
    header == REVERSAL_HEADER
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditAlertInfo {
    pub sender: Result<String, ExtractError>,
    /// Always empty: the alert template has no free-text description.
    pub description: String,
}

pub fn get_credit_by_alert_info(body: &str) -> CreditAlertInfo {
    CreditAlertInfo {
        sender: extract_sender(body),
        description: String::new(),
    }
}

/// Everything before the alert phrase, minus the separating space.
pub fn extract_sender(body: &str) -> Result<String, ExtractError> {
    let at = body
        .find(SENDER_ANCHOR)
        .ok_or_else(|| ExtractError::anchor(Field::Sender, SENDER_ANCHOR))?;
    let sender = body[..at].trim();
    if sender.is_empty() {
        return Err(ExtractError::Empty { field: Field::Sender });
    }
    Ok(sender.to_string())
}
