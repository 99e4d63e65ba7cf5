//! Domain models for the journal entry engine.

mod account;
mod entry;
mod gst;
mod narration;

pub use account::{AccountCategory, AccountRole, Chart, ChartOfAccount};
pub use entry::{
    AccountEntry, Direction, EntryMetadata, JournalEntry, VoucherType, BALANCE_EPSILON,
};
pub use gst::{round_money, GstBreakup, GstDetails, GstRegime};
pub use narration::{ParsedNarration, PaymentMode, TransactionType};
