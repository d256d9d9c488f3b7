//! AEROMERGE Core - Shared types library.
//!
//! This crate provides common types used across all AEROMERGE components:
//! - `storefront` - Headless storefront core (catalog, cart, checkout)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no session state.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and sizes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
