use sea_orm_migration::prelude::*;

mod m20260301_000001_create_admin_user;
mod m20260301_000002_create_admin_role;
mod m20260301_000003_create_admin_permission;
mod m20260301_000004_create_admin_menu;
mod m20260301_000005_create_associations;
mod m20260301_000006_seed_rbac;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_admin_user::Migration),
            Box::new(m20260301_000002_create_admin_role::Migration),
            Box::new(m20260301_000003_create_admin_permission::Migration),
            Box::new(m20260301_000004_create_admin_menu::Migration),
            Box::new(m20260301_000005_create_associations::Migration),
            Box::new(m20260301_000006_seed_rbac::Migration),
        ]
    }
}
