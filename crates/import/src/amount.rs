use kobo_core::{Amount, ExtractError};

use crate::anchors::CURRENCY_SYMBOL;

re!(re_currency_amount, &format!(r"{CURRENCY_SYMBOL}(\d+(?:,\d+)*(?:\.\d{{2}})?)"));

/// Find the first naira amount in `text` and return its numeric part with the
/// currency symbol stripped, separators intact: `"...₦6,000.00"` gives `"6,000.00"`.
///
/// `None` means the text carries no amount; callers treat that as unknown, not fatal.
pub fn extract_amount(text: &str) -> Option<&str> {
    re_currency_amount()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// [`extract_amount`] followed by conversion, with both failure modes as errors.
pub fn parse_amount_in(text: &str) -> Result<Amount, ExtractError> {
    let raw = extract_amount(text).ok_or(ExtractError::AmountNotFound)?;
    Amount::parse(raw)
}
