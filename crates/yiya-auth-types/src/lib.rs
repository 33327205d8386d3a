//! Auth types shared across YiYa services.
//!
//! Provides JWT issuing and validation, password hashing, and the `BearerToken` extractor.

pub mod bearer;
pub mod password;
pub mod token;
