//! Core types for Restwell.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod interaction;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use interaction::{InteractionEvent, InteractionKind, ParseInteractionKindError};
pub use product::Product;
pub use status::*;
