mod auth_test;
mod helpers;
mod menu_test;
