//! ClubHub Core - Shared record types.
//!
//! This crate provides the record shapes used across ClubHub components:
//! - `api` - HTTP API hosting the chatbot gateway
//! - `integration-tests` - Router-level tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. The records mirror the documents stored in the managed
//! document database. They are shape-only: nothing here enforces ID
//! uniqueness, references between records, or status transitions.
//!
//! # Modules
//!
//! - [`types`] - String-backed IDs, campus/category/status enums, and records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
