//! Restwell Storefront library.
//!
//! Public catalog API and interaction tracking, exposed as a library so the
//! router can be tested and the repositories reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
