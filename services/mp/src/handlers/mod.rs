pub mod auth;
pub mod current_user;
pub mod health;
pub mod user;
