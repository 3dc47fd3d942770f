//! Error types for nongli-rs.
//!
//! Every fallible operation in the library crates returns the single
//! `thiserror`-derived [`Error`] enum defined here.  Preconditions are checked
//! with the [`ensure!`](crate::ensure) macro and hard failures raised with
//! [`fail!`](crate::fail).

use thiserror::Error;

/// The top-level error type used throughout nongli-rs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A numeric argument fell outside the supported range, e.g. a year
    /// outside the 1900–2100 lunar table.
    #[error("{what} {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// What was being checked (`"year"`, `"month"`, …).
        what: &'static str,
        /// The offending value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// Input text could not be interpreted (not a date, unknown label, …).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Invalid civil date or date arithmetic overflow.
    #[error("date error: {0}")]
    Date(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A record addressed by id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading or writing persisted data failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Encoding or decoding persisted data failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Build an [`Error::OutOfRange`].
    pub fn out_of_range(what: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        Error::OutOfRange {
            what,
            value: value.into(),
            min,
            max,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

/// Shorthand `Result` type used throughout nongli-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use nl_core::{ensure, errors::Error};
/// fn positive(x: i32) -> nl_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use nl_core::{fail, errors::Error};
/// fn always_err() -> nl_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
