use kobo_core::{ExtractError, Field};

use crate::anchors::{
    AIRTIME_PHRASE, CARD_ONLINE_HEADER, CARD_POS_HEADER, COUNTRY_CODE, DASH, LOCAL_PREFIX,
    NETWORK_LEN, NETWORK_OFFSET, PHONE_END_BEFORE_DASH, PHONE_START_BEFORE_DASH, RECEIVER_SPLIT,
    SIGN_OFF, SPEND_AND_SAVE_HEADER, TRANSFER_PHRASE,
};

re!(re_receiver_split, &format!(r"\s{RECEIVER_SPLIT}\s"));

// ── Matchers ─────────────────────────────────────────────────────────────────

pub fn is_debit_by_airtime_recharge(body: &str) -> bool {
    body.contains(AIRTIME_PHRASE)
}

pub fn is_debit_by_transfer(body: &str) -> bool {
    body.contains(TRANSFER_PHRASE)
}

pub fn is_debit_by_card_online(header: &str) -> bool {
    header == CARD_ONLINE_HEADER
}

pub fn is_debit_by_card_pos(header: &str) -> bool {
    header == CARD_POS_HEADER
}

pub fn is_debit_by_spend_and_save(header: &str) -> bool {
    header == SPEND_AND_SAVE_HEADER
}

// ── Airtime ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirtimeInfo {
    pub network: Result<String, ExtractError>,
    pub phone_number: Result<String, ExtractError>,
}

pub fn get_debit_by_airtime_info(body: &str) -> AirtimeInfo {
    AirtimeInfo {
        network: extract_network(body),
        phone_number: extract_phone_number(body),
    }
}

/// The three-letter network code right after the recharge phrase.
pub fn extract_network(body: &str) -> Result<String, ExtractError> {
    let at = body
        .find(AIRTIME_PHRASE)
        .ok_or_else(|| ExtractError::anchor(Field::Network, AIRTIME_PHRASE))?;
    let start = at + AIRTIME_PHRASE.len() + NETWORK_OFFSET;
    let network = slice(body, Field::Network, start, start + NETWORK_LEN)?;
    non_empty(Field::Network, network.trim())
}

/// The recharged number, rewritten from `234…` to local `0…` form.
pub fn extract_phone_number(body: &str) -> Result<String, ExtractError> {
    let from = body.find(AIRTIME_PHRASE).unwrap_or(0);
    let dash = body[from..]
        .find(DASH)
        .map(|i| from + i)
        .ok_or_else(|| ExtractError::anchor(Field::PhoneNumber, DASH.to_string()))?;

    let end = dash.saturating_sub(PHONE_END_BEFORE_DASH);
    let start = dash
        .checked_sub(PHONE_START_BEFORE_DASH)
        .ok_or(ExtractError::OutOfRange { field: Field::PhoneNumber, start: 0, end })?;

    let raw = slice(body, Field::PhoneNumber, start, end)?.trim();
    let local = match raw.strip_prefix(COUNTRY_CODE) {
        Some(rest) => format!("{LOCAL_PREFIX}{rest}"),
        None => raw.to_string(),
    };
    non_empty(Field::PhoneNumber, &local)
}

// ── Transfer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInfo {
    pub receiver: Result<String, ExtractError>,
    pub description: Result<String, ExtractError>,
}

pub fn get_debit_by_transfer_info(body: &str) -> TransferInfo {
    TransferInfo {
        receiver: process_receiver(body),
        description: extract_transfer_description(body),
    }
}

/// The receiver: text between the last `to` before the dash and the dash itself.
///
/// A receiver whose own name contains the word `to` is cut at that word.
pub fn process_receiver(body: &str) -> Result<String, ExtractError> {
    let dash = body
        .find(DASH)
        .ok_or_else(|| ExtractError::anchor(Field::Receiver, DASH.to_string()))?;
    let head = &body[..dash];
    let split = re_receiver_split()
        .find_iter(head)
        .last()
        .ok_or_else(|| ExtractError::anchor(Field::Receiver, RECEIVER_SPLIT))?;
    non_empty(Field::Receiver, head[split.end()..].trim())
}

/// The free text after the dash, without the sign-off and trailing full stop.
/// An empty description is a valid value.
pub fn extract_transfer_description(body: &str) -> Result<String, ExtractError> {
    let info = body.replace(SIGN_OFF, "");
    let dash = info
        .find(DASH)
        .ok_or_else(|| ExtractError::anchor(Field::Description, DASH.to_string()))?;
    let description = info[dash + DASH.len_utf8()..]
        .trim()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    Ok(description.to_string())
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn slice(text: &str, field: Field, start: usize, end: usize) -> Result<&str, ExtractError> {
    text.get(start..end)
        .ok_or(ExtractError::OutOfRange { field, start, end })
}

fn non_empty(field: Field, value: &str) -> Result<String, ExtractError> {
    if value.is_empty() {
        Err(ExtractError::Empty { field })
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_DEBIT: &str = "You just sent ₦800.00 to Jack - Gum.";
    const TRANSFER_DEBIT_SIGNED: &str =
        "You just sent ₦800.00 to  Jack - Gum. Love, The Kuda Team.";
    const AIRTIME_DEBIT: &str =
        "You just recharged MTN NG VTU 2348102462547 - Airtime with ₦6,000.00";

    // ── Matchers ──────────────────────────────────────────────────────────────

    #[test]
    fn airtime_matcher() {
        assert!(is_debit_by_airtime_recharge(AIRTIME_DEBIT));
        assert!(!is_debit_by_airtime_recharge(TRANSFER_DEBIT));
    }

    #[test]
    fn transfer_matcher() {
        assert!(is_debit_by_transfer(TRANSFER_DEBIT));
        assert!(is_debit_by_transfer("prefix You just sent suffix"));
        assert!(!is_debit_by_transfer(AIRTIME_DEBIT));
        assert!(!is_debit_by_transfer("you just sent ₦800.00 to Jack - Gum."));
    }

    #[test]
    fn header_matchers_are_exact() {
        assert!(is_debit_by_card_online("You Used Your Kuda Card Online"));
        assert!(is_debit_by_card_pos("You Used Your Kuda Card On A POS"));
        assert!(is_debit_by_spend_and_save("You Saved Some Money"));

        assert!(!is_debit_by_card_online("You Used Your Kuda Card Online "));
        assert!(!is_debit_by_card_pos("you used your kuda card on a pos"));
        assert!(!is_debit_by_spend_and_save("You Saved Some Money!"));
        assert!(!is_debit_by_card_online(CARD_POS_HEADER));
    }

    // ── Airtime ───────────────────────────────────────────────────────────────

    #[test]
    fn airtime_golden_sample() {
        let info = get_debit_by_airtime_info(AIRTIME_DEBIT);
        assert_eq!(info.network.as_deref(), Ok("MTN"));
        assert_eq!(info.phone_number.as_deref(), Ok("08102462547"));
    }

    #[test]
    fn airtime_offsets_line_up_with_template() {
        let at = AIRTIME_DEBIT.find(AIRTIME_PHRASE).unwrap();
        let start = at + AIRTIME_PHRASE.len() + NETWORK_OFFSET;
        assert_eq!(&AIRTIME_DEBIT[start..start + NETWORK_LEN], "MTN");

        let dash = AIRTIME_DEBIT.find(DASH).unwrap();
        assert_eq!(
            &AIRTIME_DEBIT[dash - PHONE_START_BEFORE_DASH..dash - PHONE_END_BEFORE_DASH],
            "2348102462547"
        );
    }

    #[test]
    fn phone_only_rewrites_leading_country_code() {
        let body = "You just recharged GLO NG VTU 2348023422347 - Airtime with ₦100.00";
        assert_eq!(extract_phone_number(body).as_deref(), Ok("08023422347"));
    }

    #[test]
    fn phone_without_country_code_kept() {
        let body = "You just recharged GLO NG VTU 0008023412345 - Airtime with ₦100.00";
        assert_eq!(extract_phone_number(body).as_deref(), Ok("0008023412345"));
    }

    #[test]
    fn airtime_missing_dash_fails_phone_only() {
        let info = get_debit_by_airtime_info("You just recharged MTN NG VTU 2348102462547");
        assert_eq!(info.network.as_deref(), Ok("MTN"));
        assert_eq!(
            info.phone_number,
            Err(ExtractError::anchor(Field::PhoneNumber, "-"))
        );
    }

    #[test]
    fn airtime_truncated_text_is_out_of_range() {
        assert_eq!(
            extract_network("You just recharged M"),
            Err(ExtractError::OutOfRange { field: Field::Network, start: 19, end: 22 })
        );
        assert!(matches!(
            extract_phone_number("MTN - x"),
            Err(ExtractError::OutOfRange { field: Field::PhoneNumber, .. })
        ));
    }

    #[test]
    fn airtime_slice_through_multibyte_char_fails_cleanly() {
        // The phone window would start inside the naira sign.
        let body = "You just recharged ₦123456789012 - x";
        assert!(extract_phone_number(body).is_err());
    }

    #[test]
    fn network_requires_phrase() {
        assert_eq!(
            extract_network("no phrase here"),
            Err(ExtractError::anchor(Field::Network, AIRTIME_PHRASE))
        );
    }

    // ── Transfer ──────────────────────────────────────────────────────────────

    #[test]
    fn transfer_golden_sample() {
        let info = get_debit_by_transfer_info(TRANSFER_DEBIT);
        assert_eq!(info.receiver.as_deref(), Ok("Jack"));
        assert_eq!(info.description.as_deref(), Ok("Gum"));
    }

    #[test]
    fn transfer_with_double_space_and_sign_off() {
        let info = get_debit_by_transfer_info(TRANSFER_DEBIT_SIGNED);
        assert_eq!(info.receiver.as_deref(), Ok("Jack"));
        assert_eq!(info.description.as_deref(), Ok("Gum"));
    }

    #[test]
    fn receiver_containing_to_letters() {
        let body = "You just sent ₦5,000.00 to Victor Tolu - Lunch.";
        assert_eq!(process_receiver(body).as_deref(), Ok("Victor Tolu"));
    }

    #[test]
    fn receiver_with_word_to_is_cut_at_last_split() {
        let body = "You just sent ₦5,000.00 to Back to School Ltd - Fees.";
        assert_eq!(process_receiver(body).as_deref(), Ok("School Ltd"));
    }

    #[test]
    fn description_may_contain_to() {
        let body = "You just sent ₦5,000.00 to Ada - money to buy food.";
        let info = get_debit_by_transfer_info(body);
        assert_eq!(info.receiver.as_deref(), Ok("Ada"));
        assert_eq!(info.description.as_deref(), Ok("money to buy food"));
    }

    #[test]
    fn empty_description_is_ok() {
        let body = "You just sent ₦800.00 to Jack - .";
        assert_eq!(extract_transfer_description(body).as_deref(), Ok(""));
    }

    #[test]
    fn transfer_without_dash_fails_both_fields() {
        let info = get_debit_by_transfer_info("You just sent ₦800.00 to Jack");
        assert_eq!(info.receiver, Err(ExtractError::anchor(Field::Receiver, "-")));
        assert_eq!(info.description, Err(ExtractError::anchor(Field::Description, "-")));
    }

    #[test]
    fn transfer_without_to_fails_receiver() {
        assert_eq!(
            process_receiver("You just sent ₦800.00 - Gum."),
            Err(ExtractError::anchor(Field::Receiver, RECEIVER_SPLIT))
        );
    }

    #[test]
    fn blank_receiver_is_empty_error() {
        assert_eq!(
            process_receiver("You just sent ₦800.00 to  - Gum."),
            Err(ExtractError::Empty { field: Field::Receiver })
        );
    }
}
