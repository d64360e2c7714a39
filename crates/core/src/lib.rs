pub mod batch;
pub mod field;
pub mod money;
pub mod period;
pub mod record;
pub mod transaction;

pub use batch::ReportBatch;
pub use field::{ExtractError, Field};
pub use money::Amount;
pub use period::{ReportWindow, DEFAULT_WINDOW_DAYS};
pub use record::{
    CategoryMatch, CreditCategory, CreditMatch, CreditRecord, DebitCategory, DebitMatch,
    DebitRecord, FieldValue, RecordFields, TransactionRecord,
};
pub use transaction::{RawTransaction, TransactionError};
