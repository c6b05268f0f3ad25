use std::path::Path;

use anyhow::Context;
use leaf_config::LeafConfig;
use leaf_db::service::LeafService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: LeafService,
    pub config: LeafConfig,
}

impl AppContext {
    /// Open the configured database, creating its directory if needed.
    pub async fn init(config: LeafConfig) -> anyhow::Result<Self> {
        let db_path = config.database.path.clone();
        if !config.database.is_in_memory() {
            ensure_parent_dir(Path::new(&db_path))?;
        }

        let service = LeafService::new_local(&db_path, config.media.url.clone())
            .await
            .with_context(|| format!("failed to open database at {db_path}"))?;

        Ok(Self { service, config })
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
            tracing::debug!(dir = %parent.display(), "created database directory");
            Ok(())
        }
        _ => Ok(()),
    }
}
