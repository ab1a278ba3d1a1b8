use std::path::PathBuf;

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use tokio::fs;
use tracing::debug;

const MIGRATIONS_DIR: &str = "migrations";

pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url)
        .await
        .context("failed to connect to postgres")
}

/// Applies the `.sql` files in `migrations/` in filename order.
///
/// Files are split on `;` because a postgres prepared statement holds a
/// single command, so migration SQL must not embed semicolons inside a
/// statement body (no functions or triggers).
pub async fn apply_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut entries = fs::read_dir(MIGRATIONS_DIR).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        debug!(file = %file.display(), "applying migration");
        let sql = fs::read_to_string(&file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        for stmt in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            conn.execute(Statement::from_string(backend, format!("{stmt};")))
                .await
                .with_context(|| format!("applying {}", file.display()))?;
        }
    }

    Ok(())
}
