//! Fixed template text the matchers and extractors key on.
//!
//! Offsets are measured in bytes against the canonical alert wording, e.g.
//! `You just recharged MTN NG VTU 2348102462547 - Airtime with ₦6,000.00`.

// ── Debit ────────────────────────────────────────────────────────────────────

pub const AIRTIME_PHRASE: &str = "You just recharged";
pub const TRANSFER_PHRASE: &str = "You just sent";
pub const CARD_ONLINE_HEADER: &str = "You Used Your Kuda Card Online";
pub const CARD_POS_HEADER: &str = "You Used Your Kuda Card On A POS";
pub const SPEND_AND_SAVE_HEADER: &str = "You Saved Some Money";

// ── Credit ───────────────────────────────────────────────────────────────────

pub const CREDIT_ALERT_PHRASE: &str = "just sent you";
pub const REVERSAL_HEADER: &str = "We Reversed Some Money Into Your Account";

// ── Delimiters ───────────────────────────────────────────────────────────────

pub const CURRENCY_SYMBOL: char = '₦';
/// Separates the receiver (or phone number) from what follows it.
pub const DASH: char = '-';
/// The word introducing a transfer's receiver.
pub const RECEIVER_SPLIT: &str = "to";
/// Sign-off appended to transfer alerts.
pub const SIGN_OFF: &str = "Love, The Kuda Team.";

// ── Airtime slices ───────────────────────────────────────────────────────────

/// Network code starts this many bytes after the end of [`AIRTIME_PHRASE`].
pub const NETWORK_OFFSET: usize = 1;
pub const NETWORK_LEN: usize = 3;
/// Phone token spans `dash - PHONE_START_BEFORE_DASH .. dash - PHONE_END_BEFORE_DASH`.
pub const PHONE_START_BEFORE_DASH: usize = 14;
pub const PHONE_END_BEFORE_DASH: usize = 1;
pub const COUNTRY_CODE: &str = "234";
pub const LOCAL_PREFIX: &str = "0";

// ── Credit slices ────────────────────────────────────────────────────────────

/// The sender is everything before this phrase.
pub const SENDER_ANCHOR: &str = CREDIT_ALERT_PHRASE;
