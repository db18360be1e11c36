//! CYNA Core - Shared types library.
//!
//! This crate provides common types used across all CYNA components:
//! - `server` - JSON API backend (storefront + back-office)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, statuses,
//!   and the role/permission model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
