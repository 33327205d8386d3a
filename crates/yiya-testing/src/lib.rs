//! Test utilities for YiYa services.
//!
//! Provides `MockAuth` for minting real tokens and a JSON body reader.
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod auth;
pub mod body;
