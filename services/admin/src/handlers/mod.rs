pub mod auth;
pub mod current_user;
pub mod guard;
pub mod health;
pub mod menu;
pub mod permission;
pub mod role;
pub mod user;
