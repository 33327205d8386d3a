use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use yiya_auth_types::token::TokenIssuer;

use crate::domain::access::AccessEvaluator;
use crate::infra::cache::RedisTokenStore;
use crate::infra::db::{
    DbMenuRepository, DbPermissionRepository, DbRoleRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub issuer: TokenIssuer,
    pub evaluator: AccessEvaluator,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn permission_repo(&self) -> DbPermissionRepository {
        DbPermissionRepository {
            db: self.db.clone(),
        }
    }

    pub fn menu_repo(&self) -> DbMenuRepository {
        DbMenuRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_store(&self) -> RedisTokenStore {
        RedisTokenStore {
            pool: self.redis.clone(),
        }
    }
}
