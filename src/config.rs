use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub storage: StorageKind,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let data_dir = lookup("LIFESWITCH_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let catalog_path = lookup("LIFESWITCH_CATALOG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let storage = match lookup("LIFESWITCH_STORAGE")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            None | Some("") | Some("file") => StorageKind::File,
            Some("memory") => StorageKind::Memory,
            Some(other) => {
                anyhow::bail!("LIFESWITCH_STORAGE must be 'file' or 'memory', got '{}'", other)
            }
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| {
            let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
            format!("0.0.0.0:{}", port)
        });

        Ok(Self {
            data_dir,
            catalog_path,
            storage,
            bind_addr,
        })
    }
}
