mod auth_test;
mod helpers;
mod router_test;
