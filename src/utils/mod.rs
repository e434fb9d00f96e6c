//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `weathersync` crate.
//!
//! It centralizes the error types shared by the codec, store, source and
//! transport layers, and the logging bootstrap used by the binary.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests;
