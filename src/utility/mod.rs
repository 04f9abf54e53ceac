//! Utilities that are used across the crate.
pub mod datetime;
