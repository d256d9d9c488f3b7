//! Core types for AEROMERGE.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod size;

pub use id::*;
pub use price::{Currency, Price, format_amount};
pub use size::Size;
