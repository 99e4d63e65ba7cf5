//! Smart journal entry engine.
//!
//! Converts a free-form transaction narration (e.g. "Paid electricity bill
//! Rs 1800 in cash") into a validated, balanced, GST-aware double-entry
//! record. The pipeline is parser -> GST detector -> account matcher ->
//! entry generator, composed by [`services::JournalEngine`].
//!
//! The engine is a pure, stateless transformation: the chart of accounts and
//! tax configuration are supplied by the caller, nothing is persisted, and
//! invocations may run fully in parallel.

pub mod config;
pub mod defaults;
pub mod error;
pub mod models;
pub mod party;
pub mod services;

pub use config::TaxConfig;
pub use error::{EngineError, Result};
pub use services::JournalEngine;
