//! Domain types shared across YiYa services.
//!
//! Plain data with no web or database dependencies: paging, the 0/1 status
//! flag and the permission catalog.

pub mod pagination;
pub mod permission;
pub mod status;
