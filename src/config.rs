//! Deployment configuration from the environment.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub bind_addr: String,
    resources: HashMap<String, String>,
}

impl ServiceConfig {
    /// Reads `DATABASE_URL`, `BIND_ADDR` and per-resource base paths
    /// (`SONGBOOK_SONG_PATH` for the song module).
    pub fn from_env() -> Self {
        let mut resources = HashMap::new();
        if let Ok(path) = std::env::var("SONGBOOK_SONG_PATH") {
            resources.insert("song".to_string(), path);
        }
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/songbook".into()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            resources,
        }
    }

    /// Base path for a resource, defaulting to `/<name>`.
    pub fn resource_path(&self, name: &str) -> String {
        self.resources
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("/{name}"))
    }
}
