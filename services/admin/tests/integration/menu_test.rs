use yiya_admin::domain::access::AccessEvaluator;
use yiya_admin::domain::types::{ResolvedRole, ResolvedUser};
use yiya_admin::error::AdminServiceError;
use yiya_admin::usecase::menu::{
    CreateMenuInput, CreateMenuUseCase, DeleteMenuUseCase, GetMenuTreeUseCase,
    GetMyMenuTreeUseCase, UpdateMenuInput, UpdateMenuSortUseCase, UpdateMenuUseCase,
};
use yiya_domain::status::Status;

use crate::helpers::{MemoryDb, test_menu};

/// 1 ─ 2 ─ 3
///   └ 4
/// 5
fn seeded() -> MemoryDb {
    let db = MemoryDb::new();
    db.insert_menu(test_menu(1, 0, 1));
    db.insert_menu(test_menu(2, 1, 1));
    db.insert_menu(test_menu(3, 2, 1));
    db.insert_menu(test_menu(4, 1, 2));
    db.insert_menu(test_menu(5, 0, 2));
    db
}

fn user_with_menus(code: &str, menu_ids: Vec<i64>) -> ResolvedUser {
    ResolvedUser {
        id: 1,
        username: "alice".into(),
        status: Status::Enabled,
        roles: vec![ResolvedRole {
            id: 10,
            code: code.into(),
            status: Status::Enabled,
            permissions: vec![],
            menu_ids,
        }],
    }
}

fn create_input(parent_id: i64, name: &str) -> CreateMenuInput {
    CreateMenuInput {
        parent_id,
        title: "New".into(),
        name: name.into(),
        path: None,
        component: None,
        icon: None,
        sort: 0,
        hidden: 0,
        keep_alive: 0,
        status: 1,
    }
}

// ── Tree ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_build_forest_from_live_menus() {
    let db = seeded();
    let tree = GetMenuTreeUseCase { repo: db.menus() }
        .execute(false)
        .await
        .unwrap();

    let roots: Vec<i64> = tree.iter().map(|n| n.id).collect();
    assert_eq!(roots, vec![1, 5]);
    let children: Vec<i64> = tree[0].children.iter().map(|n| n.id).collect();
    assert_eq!(children, vec![2, 4]);
    assert_eq!(tree[0].children[0].children[0].id, 3);
}

#[tokio::test]
async fn should_only_include_disabled_menus_when_asked() {
    let db = seeded();
    db.tables.lock().unwrap().menus[4].0.status = Status::Disabled;
    let usecase = GetMenuTreeUseCase { repo: db.menus() };

    assert_eq!(usecase.execute(false).await.unwrap().len(), 1);
    assert_eq!(usecase.execute(true).await.unwrap().len(), 2);
}

// ── Cascade delete ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_cascade_delete_whole_subtree() {
    let db = seeded();
    let mut deleted = DeleteMenuUseCase { repo: db.menus() }
        .execute(1)
        .await
        .unwrap();
    deleted.sort_unstable();

    assert_eq!(deleted, vec![1, 2, 3, 4]);
    assert_eq!(db.deleted_menu_ids(), vec![1, 2, 3, 4]);

    let tree = GetMenuTreeUseCase { repo: db.menus() }
        .execute(true)
        .await
        .unwrap();
    let roots: Vec<i64> = tree.iter().map(|n| n.id).collect();
    assert_eq!(roots, vec![5]);
}

#[tokio::test]
async fn should_not_find_already_deleted_menu() {
    let db = seeded();
    let usecase = DeleteMenuUseCase { repo: db.menus() };
    usecase.execute(2).await.unwrap();

    let again = usecase.execute(3).await;
    assert!(matches!(again, Err(AdminServiceError::MenuNotFound)));
}

// ── Create / update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_unknown_parent_on_create() {
    let db = seeded();
    let result = CreateMenuUseCase { repo: db.menus() }
        .execute(create_input(99, "orphan"))
        .await;
    assert!(matches!(result, Err(AdminServiceError::InvalidParent)));
}

#[tokio::test]
async fn should_reject_name_held_by_deleted_menu() {
    let db = seeded();
    DeleteMenuUseCase { repo: db.menus() }
        .execute(5)
        .await
        .unwrap();

    let result = CreateMenuUseCase { repo: db.menus() }
        .execute(create_input(0, "menu_5"))
        .await;
    assert!(matches!(result, Err(AdminServiceError::MenuNameExists)));
}

#[tokio::test]
async fn should_create_child_menu() {
    let db = seeded();
    let menu = CreateMenuUseCase { repo: db.menus() }
        .execute(create_input(5, "reports"))
        .await
        .unwrap();
    assert_eq!(menu.parent_id, 5);
    assert_eq!(menu.status, Status::Enabled);
}

#[tokio::test]
async fn should_reject_reparenting_under_self_or_descendant() {
    let db = seeded();
    let usecase = UpdateMenuUseCase { repo: db.menus() };

    for parent in [1, 3] {
        let result = usecase
            .execute(
                1,
                UpdateMenuInput {
                    parent_id: Some(parent),
                    ..Default::default()
                },
            )
            .await;
        assert!(
            matches!(result, Err(AdminServiceError::InvalidParent)),
            "parent {parent}: {result:?}"
        );
    }
}

#[tokio::test]
async fn should_move_subtree_under_sibling_root() {
    let db = seeded();
    let menu = UpdateMenuUseCase { repo: db.menus() }
        .execute(
            2,
            UpdateMenuInput {
                parent_id: Some(5),
                title: Some("Moved".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(menu.parent_id, 5);
    assert_eq!(menu.title, "Moved");
    assert_eq!(menu.name, "menu_2");
}

#[tokio::test]
async fn should_reject_rename_to_taken_name() {
    let db = seeded();
    let result = UpdateMenuUseCase { repo: db.menus() }
        .execute(
            2,
            UpdateMenuInput {
                name: Some("menu_3".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AdminServiceError::MenuNameExists)));
}

#[tokio::test]
async fn should_reject_negative_sort() {
    let db = seeded();
    let usecase = UpdateMenuSortUseCase { repo: db.menus() };
    assert!(matches!(
        usecase.execute(1, -1).await,
        Err(AdminServiceError::InvalidInput(_))
    ));
    assert_eq!(usecase.execute(1, 9).await.unwrap().sort, 9);
}

// ── My menus ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_give_super_admin_every_enabled_menu() {
    let db = seeded();
    db.tables.lock().unwrap().menus[4].0.status = Status::Disabled;
    let usecase = GetMyMenuTreeUseCase {
        repo: db.menus(),
        evaluator: AccessEvaluator::default(),
    };

    let routes = usecase
        .execute(&user_with_menus("SUPER_ADMIN", vec![]))
        .await
        .unwrap();
    let roots: Vec<i64> = routes.iter().map(|r| r.id).collect();
    assert_eq!(roots, vec![1]);
    assert_eq!(routes[0].children.len(), 2);
}

#[tokio::test]
async fn should_limit_routes_to_granted_menus() {
    let db = seeded();
    let usecase = GetMyMenuTreeUseCase {
        repo: db.menus(),
        evaluator: AccessEvaluator::default(),
    };

    let routes = usecase
        .execute(&user_with_menus("EDITOR", vec![1, 4]))
        .await
        .unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].id, 1);
    let children: Vec<i64> = routes[0].children.iter().map(|r| r.id).collect();
    assert_eq!(children, vec![4]);

    let none = usecase
        .execute(&user_with_menus("EDITOR", vec![]))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn should_drop_hidden_subtree_from_routes() {
    let db = seeded();
    db.tables.lock().unwrap().menus[1].0.hidden = 1;
    let usecase = GetMyMenuTreeUseCase {
        repo: db.menus(),
        evaluator: AccessEvaluator::default(),
    };

    let routes = usecase
        .execute(&user_with_menus("SUPER_ADMIN", vec![]))
        .await
        .unwrap();
    let children: Vec<i64> = routes[0].children.iter().map(|r| r.id).collect();
    assert_eq!(children, vec![4]);
    assert_eq!(routes[0].meta.title, "Menu 1");
    assert_eq!(routes[0].path, "/menu/1");
    assert_eq!(routes[0].component, "");
}
