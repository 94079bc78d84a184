use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the SQLite database and make sure the minimal schema exists.
///
/// Pass `":memory:"` for an in-process database (tests); anything else is
/// treated as a file path, created on demand.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/remitos.db");

    let db_url = if db_file == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        if let Some(parent) = std::path::Path::new(db_file).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let absolute_path = if std::path::Path::new(db_file).is_absolute() {
            std::path::PathBuf::from(db_file)
        } else {
            std::env::current_dir()?.join(db_file)
        };
        // Normalize separators and keep a proper URL form on Windows.
        let normalized = absolute_path.to_string_lossy().replace('\\', "/");
        let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
        let prefix = if needs_leading_slash { "/" } else { "" };
        format!("sqlite://{}{}?mode=rwc", prefix, normalized)
    };

    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    if DB_CONN.set(conn).is_err() {
        tracing::warn!("database connection was already initialized");
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("database not initialized; call initialize_database first")
}

/// Minimal schema bootstrap: the remitos table read by the dynamic query and
/// the key/value store holding the table configuration documents.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let create_remitos = r#"
        CREATE TABLE IF NOT EXISTS remitos_firma (
            SDHNUM_0 TEXT PRIMARY KEY NOT NULL,
            DLVDAT_0 TEXT NOT NULL,
            CPY_0 TEXT NOT NULL,
            STOFCY_0 TEXT NOT NULL,
            CFMFLG_0 TEXT NOT NULL DEFAULT '1',
            XX6FLSIGN_0 TEXT NOT NULL DEFAULT '1',
            BPCNAM_0 TEXT NOT NULL DEFAULT '',
            XX6URLFIRM_0 TEXT
        );
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_remitos.to_string(),
    ))
    .await?;

    let create_config = r#"
        CREATE TABLE IF NOT EXISTS table_config_documents (
            key TEXT PRIMARY KEY NOT NULL,
            document TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_config.to_string(),
    ))
    .await?;

    Ok(())
}
