use sea_orm::DatabaseConnection;

use yiya_auth_types::token::TokenIssuer;

use crate::infra::db::DbMpUserRepository;
use crate::infra::wechat::WeChatClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub issuer: TokenIssuer,
    pub wechat: WeChatClient,
}

impl AppState {
    pub fn user_repo(&self) -> DbMpUserRepository {
        DbMpUserRepository {
            db: self.db.clone(),
        }
    }
}
