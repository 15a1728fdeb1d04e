//! SEA-APD Core - Shared domain types.
//!
//! This crate provides the types used across all SEA-APD components:
//! - `api` - The HTTP backend (users, products, transactions)
//! - `cli` - Command-line tools for migrations and bootstrap tasks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP. Database encoding lives behind the optional `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and emails, plus the role and
//!   transaction status value sets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
