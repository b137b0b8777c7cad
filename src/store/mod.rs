//! Read-side contracts for the FAQ and company settings data the search
//! pipeline consumes.
//!
//! The pipeline never mutates either store. [`JsonStore`] is the bundled
//! implementation: snapshots loaded from the data directory and served from
//! memory.

mod json;

pub use json::JsonStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CompanySettings, Faq};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached. Distinct from a query that
    /// ran and matched nothing.
    #[error("FAQ store unavailable: {0}")]
    Unavailable(String),
    #[error("FAQ store data is corrupt: {0}")]
    Corrupt(String),
}

/// Which tenants a lookup may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    Company(i64),
    AllTenants,
}

/// A single FAQ lookup.
///
/// Only active FAQs in `scope` are returned. With non-empty `terms`, a FAQ
/// matches when its question or answer contains any term, case-insensitively.
/// With empty `terms` there is no text filter. Results are ordered by
/// helpful count desc, then views desc, and capped at `limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqQuery {
    pub scope: TenantScope,
    pub terms: Vec<String>,
    pub limit: usize,
}

#[async_trait]
pub trait FaqStore: Send + Sync {
    async fn search(&self, query: &FaqQuery) -> Result<Vec<Faq>, StoreError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn company_settings(&self, company_id: i64)
        -> Result<Option<CompanySettings>, StoreError>;
}

/// Case-insensitive "contains any term" check shared by store implementations.
pub fn faq_matches_any(faq: &Faq, terms: &[String]) -> bool {
    if terms.is_empty() {
        return true;
    }
    let question = faq.question.to_lowercase();
    let answer = faq.answer.to_lowercase();
    terms.iter().any(|t| {
        let t = t.to_lowercase();
        question.contains(&t) || answer.contains(&t)
    })
}
