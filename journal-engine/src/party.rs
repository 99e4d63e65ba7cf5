//! Party resolver: the external collaborator that turns a detected
//! counterparty name into a ledger account code.
//!
//! The engine itself never calls this; callers resolve parties before or
//! after processing a narration and feed the resulting code into their chart
//! of accounts. Resolution touches shared storage, so the trait is async.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Whether the party owes us (customer) or we owe them (vendor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Customer,
    Vendor,
}

/// A resolved party ledger account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyAccount {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartyResolveError {
    #[error("No ledger account for party '{0}'")]
    NotFound(String),

    #[error("Party '{0}' already has a ledger account")]
    AlreadyExists(String),

    #[error("Party store error: {0}")]
    Backend(String),
}

/// Resolves (or creates) a ledger account for a counterparty name.
///
/// Implementations that create accounts on miss must guard against the
/// read-then-create race: two concurrent narrations naming the same new
/// party must not produce duplicate ledger accounts. A uniqueness constraint
/// or transactional insert on the backing store satisfies this.
#[async_trait]
pub trait PartyResolver: Send + Sync {
    async fn resolve(
        &self,
        name: &str,
        role: PartyRole,
    ) -> Result<PartyAccount, PartyResolveError>;
}

/// In-memory resolver over a fixed party list, for tests and tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticPartyResolver {
    customers: HashMap<String, PartyAccount>,
    vendors: HashMap<String, PartyAccount>,
}

impl StaticPartyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_party(mut self, name: &str, role: PartyRole, code: &str) -> Self {
        let account = PartyAccount {
            code: code.to_string(),
            name: name.to_string(),
        };
        match role {
            PartyRole::Customer => self.customers.insert(name.to_lowercase(), account),
            PartyRole::Vendor => self.vendors.insert(name.to_lowercase(), account),
        };
        self
    }
}

#[async_trait]
impl PartyResolver for StaticPartyResolver {
    async fn resolve(
        &self,
        name: &str,
        role: PartyRole,
    ) -> Result<PartyAccount, PartyResolveError> {
        let map = match role {
            PartyRole::Customer => &self.customers,
            PartyRole::Vendor => &self.vendors,
        };
        map.get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| PartyResolveError::NotFound(name.to_string()))
    }
}
