//! Persistence layer for the task board: SeaORM entities and migrations.
//!
//! Projects, tasks, and team members are independent aggregates. Tasks
//! reference their project (and assignee) by *name string*, not by foreign
//! key; referential integrity is maintained only by the cascade-on-delete
//! logic in the service layer.

pub mod entities;
pub mod migrator;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Connect to the database at the given URL (SQLite or Postgres).
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", redact_url(url));
    Database::connect(url).await
}

/// Apply all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrator::Migrator::up(db, None).await
}

/// Strip credentials from a connection URL before logging it.
fn redact_url(url: &str) -> String {
    match url.find("://").map(|i| i + 3) {
        Some(start) => match url[start..].find('@') {
            Some(at) => format!("{}***@{}", &url[..start], &url[start + at + 1..]),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_credentials() {
        assert_eq!(
            redact_url("postgres://user:pw@db.example.com/board"),
            "postgres://***@db.example.com/board"
        );
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }
}
