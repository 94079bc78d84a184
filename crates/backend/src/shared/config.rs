use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub report: ReportServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// Where the external report generator lives and which report it renders.
#[derive(Debug, Deserialize, Clone)]
pub struct ReportServiceConfig {
    pub base_url: String,
    pub report_name: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/remitos.db"

[report]
base_url = "http://localhost:8100/reports"
report_name = "ZREMITOFIRMA"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(db_path.to_path_buf())
}
