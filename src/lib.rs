//! # support-search
//!
//! FAQ answer resolution for the embeddable support chat widget. Given a
//! free-text question and a company, it finds the company's relevant FAQs
//! and answers from them, through an LLM when one is available and from the
//! top FAQ when it is not.
//!
//! ## Pipeline
//!
//! ```text
//!                 ┌──────────────────────┐
//!                 │  Query + companyId   │
//!                 └──────────┬───────────┘
//!                            │ AI enabled for company?  no → 400
//!                            ▼
//!                 ┌──────────────────────┐
//!                 │  Keyword extraction  │
//!                 └──────────┬───────────┘
//!                            ▼
//!                 ┌──────────────────────┐
//!                 │  Tiered FAQ match    │
//!                 │  1. keywords         │
//!                 │  2. broad words      │
//!                 │  3. company top N    │
//!                 │  4. all tenants      │
//!                 └──────────┬───────────┘
//!                            │ ranked by helpful count, views
//!              ┌─────────────┴─────────────┐
//!              ▼                           ▼
//!     ┌─────────────────┐        ┌──────────────────┐
//!     │ LLM answer      │ error  │ Fallback answer  │
//!     │ confidence from ├───────►│ top FAQ, 0.5     │
//!     │ keyword overlap │        │ (none matched: 0)│
//!     └────────┬────────┘        └────────┬─────────┘
//!              └─────────────┬────────────┘
//!                            ▼
//!                 ┌──────────────────────┐
//!                 │ answer, source,      │
//!                 │ confidence,          │
//!                 │ relatedFAQs          │
//!                 └──────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, data dir, and LLM settings
//! - [`models`] - FAQ and company settings records, request params, response envelopes
//! - [`store`] - FAQ and settings read contracts plus the JSON-file-backed store
//! - [`search::keywords`] - Query normalization and stop-word filtering
//! - [`search::matcher`] - Four-tier FAQ lookup
//! - [`search::confidence`] - Keyword coverage score
//! - [`llm`] - Answer generators: chat-completion LLM and deterministic fallback
//! - [`answer`] - Composes the answer and assembles the response payload
//! - [`api`] - Axum router and handlers
//! - [`error`] - HTTP error taxonomy
//! - [`state`] - Shared application state

pub mod answer;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod search;
pub mod state;
pub mod store;
