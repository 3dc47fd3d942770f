//! # nl-time
//!
//! Gregorian date and weekday types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// Day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use weekday::Weekday;
