//! Pipeline services: parser -> gst -> matcher -> generator -> orchestrator.

pub mod generator;
pub mod gst;
pub mod matcher;
pub mod orchestrator;
pub mod parser;

pub use generator::{apply_gst_to_entry, generate_entries};
pub use gst::detect_gst;
pub use matcher::{match_accounts, MatchedAccount};
pub use orchestrator::{
    suggest_voucher, EntryEdits, JournalEngine, LineEdit, ParsingResult, ValidationReport,
};
pub use parser::parse_narration;
