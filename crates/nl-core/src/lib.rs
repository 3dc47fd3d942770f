//! # nl-core
//!
//! Core types, error definitions, and input parsers for nongli-rs.
//!
//! This crate provides the building blocks shared across the other crates in
//! the workspace – primitive type aliases, the error hierarchy with its
//! `ensure!` / `fail!` macros, and the text parsers used to read dates from
//! user input.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Miscellaneous utilities (text parsers).
pub mod utilities;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// A calendar year (Gregorian or lunar), e.g. `2024`.
pub type Year = i32;

/// Day serial number (days since the library epoch, see `nl-time`).
pub type Serial = i32;

/// Milliseconds since the Unix epoch, as used by the solar-term formula.
pub type Millis = f64;

/// Offset in minutes.
pub type Minutes = i64;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
