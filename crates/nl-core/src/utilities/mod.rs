//! Utilities sub-module: text parsers.

pub mod data_parsers;
