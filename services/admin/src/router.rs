use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use yiya_core::health::healthz;
use yiya_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, logout, me, refresh},
    health::readyz,
    menu::{
        create_menu, delete_menu, get_menu_tree, get_my_menus, update_menu, update_menu_sort,
    },
    permission::{
        create_permission, delete_permission, get_permission, list_permissions,
        permission_options, update_permission,
    },
    role::{
        assign_menus, assign_permissions, create_role, delete_role, get_role, get_role_menus,
        get_role_permissions, list_roles, update_role,
    },
    user::{
        assign_roles, create_user, delete_user, get_user, list_users, reset_password,
        update_user,
    },
};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1/admin";

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/reset-password", post(reset_password))
        .route("/users/{id}/roles", post(assign_roles))
        // Roles
        .route("/roles", get(list_roles).post(create_role))
        .route(
            "/roles/{id}",
            get(get_role).put(update_role).delete(delete_role),
        )
        .route(
            "/roles/{id}/permissions",
            get(get_role_permissions).post(assign_permissions),
        )
        .route("/roles/{id}/menus", get(get_role_menus).post(assign_menus))
        // Permissions
        .route(
            "/permissions",
            get(list_permissions).post(create_permission),
        )
        .route("/permissions/tree", get(permission_options))
        .route(
            "/permissions/{id}",
            get(get_permission)
                .put(update_permission)
                .delete(delete_permission),
        )
        // Menus
        .route("/menus", post(create_menu))
        .route("/menus/tree", get(get_menu_tree))
        .route("/menus/my", get(get_my_menus))
        .route("/menus/{id}", put(update_menu).delete(delete_menu))
        .route("/menus/{id}/sort", put(update_menu_sort));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
