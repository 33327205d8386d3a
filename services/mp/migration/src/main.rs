use sea_orm_migration::prelude::*;

use yiya_mp_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
