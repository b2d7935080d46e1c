//! Restwell Core - Shared types library.
//!
//! This crate provides common types used across all Restwell components:
//! - `storefront` - Public catalog API and interaction tracking
//! - `admin` - Admin API with the insights report
//! - `cli` - Command-line tools for migrations, seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, roles, products and interaction events

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
