//! Restwell Admin library.
//!
//! Serves the internal dashboard API: admin login and the product insights
//! report computed from the storefront's catalog and interaction log.
//!
//! # Security
//!
//! Every insights route requires an admin session. Bind to a private
//! interface; the default host is loopback.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
