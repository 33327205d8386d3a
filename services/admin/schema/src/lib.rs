pub mod admin_menu;
pub mod admin_permission;
pub mod admin_role;
pub mod admin_role_menu;
pub mod admin_role_permission;
pub mod admin_user;
pub mod admin_user_role;
