pub mod access;
pub mod menu_tree;
pub mod repository;
pub mod types;
