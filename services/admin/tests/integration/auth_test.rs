use yiya_admin::error::AdminServiceError;
use yiya_admin::usecase::auth::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, ResolveUserUseCase,
};
use yiya_auth_types::token::{ACCESS_TOKEN_EXP, TokenType};
use yiya_domain::status::Status;
use yiya_testing::auth::MockAuth;

use crate::helpers::{
    MemoryDb, MockTokenStore, TEST_PASSWORD, test_issuer, test_permission, test_role, test_user,
};

fn login_input(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
        ip: Some("203.0.113.7".to_owned()),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_and_store_refresh_token() {
    let db = MemoryDb::new();
    db.insert_user(test_user(1, "admin"));
    let tokens = MockTokenStore::empty();
    let refresh_handle = tokens.share();

    let usecase = LoginUseCase {
        users: db.users(),
        tokens,
        issuer: test_issuer(),
    };
    let output = usecase
        .execute(login_input("admin", TEST_PASSWORD))
        .await
        .unwrap();

    assert_eq!(output.expires_in, ACCESS_TOKEN_EXP);
    let claims = test_issuer()
        .validate(&output.access_token, TokenType::Access)
        .unwrap();
    assert_eq!(claims.sub, "1");
    assert_eq!(claims.username, "admin");

    assert!(
        refresh_handle
            .refresh
            .lock()
            .unwrap()
            .contains(&(1, output.refresh_token.clone()))
    );

    let tables = db.tables.lock().unwrap();
    let (user, _) = &tables.users[0];
    assert!(user.last_login_at.is_some());
    assert_eq!(user.last_login_ip.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_alike() {
    let db = MemoryDb::new();
    db.insert_user(test_user(1, "admin"));
    let usecase = LoginUseCase {
        users: db.users(),
        tokens: MockTokenStore::empty(),
        issuer: test_issuer(),
    };

    let wrong = usecase.execute(login_input("admin", "nope-nope")).await;
    assert!(matches!(wrong, Err(AdminServiceError::InvalidCredentials)));

    let unknown = usecase.execute(login_input("ghost", TEST_PASSWORD)).await;
    assert!(matches!(unknown, Err(AdminServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_disabled_user_login() {
    let db = MemoryDb::new();
    let mut user = test_user(1, "admin");
    user.status = Status::Disabled;
    db.insert_user(user);

    let usecase = LoginUseCase {
        users: db.users(),
        tokens: MockTokenStore::empty(),
        issuer: test_issuer(),
    };
    let result = usecase.execute(login_input("admin", TEST_PASSWORD)).await;
    assert!(matches!(result, Err(AdminServiceError::UserDisabled)));
}

// ── Refresh / Logout ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refresh_until_logged_out() {
    let db = MemoryDb::new();
    db.insert_user(test_user(1, "admin"));
    let tokens = MockTokenStore::empty();

    let login = LoginUseCase {
        users: db.users(),
        tokens: tokens.share(),
        issuer: test_issuer(),
    }
    .execute(login_input("admin", TEST_PASSWORD))
    .await
    .unwrap();

    let refresh = RefreshUseCase {
        tokens: tokens.share(),
        issuer: test_issuer(),
    };
    let refreshed = refresh.execute(&login.refresh_token).await.unwrap();
    let claims = test_issuer()
        .validate(&refreshed.access_token, TokenType::Access)
        .unwrap();
    assert_eq!(claims.sub, "1");

    LogoutUseCase {
        tokens: tokens.share(),
        issuer: test_issuer(),
    }
    .execute(1, &login.refresh_token)
    .await
    .unwrap();

    assert!(tokens.blacklist.lock().unwrap().contains(&login.refresh_token));
    let result = refresh.execute(&login.refresh_token).await;
    assert!(matches!(result, Err(AdminServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_reject_refresh_token_not_in_store() {
    let refresh_token = MockAuth::admin(1, "admin").refresh_token().token;
    let usecase = RefreshUseCase {
        tokens: MockTokenStore::empty(),
        issuer: test_issuer(),
    };
    let result = usecase.execute(&refresh_token).await;
    assert!(matches!(result, Err(AdminServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_reject_access_token_as_refresh_token() {
    let access_token = MockAuth::admin(1, "admin").access_token().token;
    let usecase = RefreshUseCase {
        tokens: MockTokenStore::empty(),
        issuer: test_issuer(),
    };
    let result = usecase.execute(&access_token).await;
    assert!(matches!(result, Err(AdminServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_treat_garbage_logout_token_as_logged_out() {
    let tokens = MockTokenStore::empty();
    let usecase = LogoutUseCase {
        tokens: tokens.share(),
        issuer: test_issuer(),
    };
    usecase.execute(1, "not-a-jwt").await.unwrap();
    assert!(tokens.blacklist.lock().unwrap().is_empty());
}

// ── ResolveUser ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_roles_with_live_permissions_only() {
    let db = MemoryDb::new();
    db.insert_user(test_user(1, "editor"));
    db.insert_role(test_role(10, "EDITOR"));
    db.insert_permission(test_permission(100, "sys:user:list"));
    db.insert_permission(test_permission(101, "sys:user:delete"));
    db.link_user_role(1, 10);
    db.link_role_permission(10, 100);
    db.link_role_permission(10, 101);
    db.link_role_menu(10, 5);
    db.tables.lock().unwrap().permissions[1].1 = true;

    let usecase = ResolveUserUseCase {
        users: db.users(),
        issuer: test_issuer(),
    };
    let token = MockAuth::admin(1, "editor").access_token().token;
    let user = usecase.execute(&token).await.unwrap();

    assert_eq!(user.roles.len(), 1);
    assert_eq!(user.roles[0].code, "EDITOR");
    assert_eq!(user.roles[0].permissions, vec!["sys:user:list".to_owned()]);
    assert_eq!(user.menu_ids(), vec![5]);
}

#[tokio::test]
async fn should_reject_refresh_token_for_resolution() {
    let db = MemoryDb::new();
    db.insert_user(test_user(1, "admin"));
    let usecase = ResolveUserUseCase {
        users: db.users(),
        issuer: test_issuer(),
    };
    let token = MockAuth::admin(1, "admin").refresh_token().token;
    let result = usecase.execute(&token).await;
    assert!(matches!(result, Err(AdminServiceError::InvalidToken)));
}

#[tokio::test]
async fn should_reject_deleted_or_disabled_user_resolution() {
    let db = MemoryDb::new();
    let mut disabled = test_user(2, "disabled");
    disabled.status = Status::Disabled;
    db.insert_user(disabled);
    let usecase = ResolveUserUseCase {
        users: db.users(),
        issuer: test_issuer(),
    };

    let missing = usecase
        .execute(&MockAuth::admin(1, "gone").access_token().token)
        .await;
    assert!(matches!(missing, Err(AdminServiceError::InvalidToken)));

    let disabled = usecase
        .execute(&MockAuth::admin(2, "disabled").access_token().token)
        .await;
    assert!(matches!(disabled, Err(AdminServiceError::UserDisabled)));
}
