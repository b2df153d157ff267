use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cost_core::seed::{default_catalog, next_id_after_seed};
use cost_core::{Item, ItemCandidate, ItemId, RepositoryError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// On-disk layout: `{ "nextId": n, "items": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub next_id: ItemId,
    pub items: Vec<Item>,
}

impl CatalogFile {
    pub fn seeded() -> Self {
        Self {
            next_id: next_id_after_seed(),
            items: default_catalog(),
        }
    }

    /// Read and check the file at `path`. `Ok(None)` means it does not exist.
    pub async fn load(path: &Path) -> Result<Option<Self>, RepositoryError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RepositoryError::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let mut file: Self = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::Storage(format!("{} is not a valid catalog: {}", path.display(), e))
        })?;
        file.check(path)?;
        Ok(Some(file))
    }

    /// Reject items that break field constraints or share an id, and move a
    /// stale `nextId` past the largest id in use.
    fn check(
        &mut self,
        path: &Path,
    ) -> Result<(), RepositoryError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if let Err(e) = ItemCandidate::from(item).validate() {
                return Err(RepositoryError::Storage(format!(
                    "{}: item {} is invalid: {}",
                    path.display(),
                    item.id,
                    e
                )));
            }
            if !seen.insert(item.id) {
                return Err(RepositoryError::Storage(format!(
                    "{}: duplicate item id {}",
                    path.display(),
                    item.id
                )));
            }
        }

        let max_id = self.items.iter().map(|item| item.id).max().unwrap_or(0);
        if self.next_id <= max_id {
            warn!(
                path = %path.display(),
                next_id = self.next_id,
                max_id,
                "nextId behind existing ids, repairing"
            );
            self.next_id = max_id + 1;
        }
        Ok(())
    }

    /// Replace the file at `path` with this catalog.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// target, so readers see either the old or the new catalog.
    pub async fn write(
        &self,
        path: &Path,
    ) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| RepositoryError::Storage(format!("failed to encode catalog: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_io("create", parent, e))?;
        }

        let tmp = temp_path(path);
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| storage_io("write", &tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(storage_io("replace", path, e));
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn storage_io(
    action: &str,
    path: &Path,
    e: std::io::Error,
) -> RepositoryError {
    RepositoryError::Storage(format!("failed to {} {}: {}", action, path.display(), e))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();

        let loaded = CatalogFile::load(&dir.path().join("data.json")).await;

        assert_eq!(loaded, Ok(None));
    }

    #[tokio::test]
    async fn write_then_load_returns_same_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        CatalogFile::seeded().write(&path).await.unwrap();
        let loaded = CatalogFile::load(&path).await.unwrap();

        assert_eq!(loaded, Some(CatalogFile::seeded()));
        assert!(!temp_path(&path).exists(), "temp file should be renamed away");
    }

    #[tokio::test]
    async fn write_uses_camel_case_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        CatalogFile::seeded().write(&path).await.unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(text.contains("\"nextId\": 40"), "unexpected layout:\n{text}");
        assert!(text.contains("\"preco_por_quantidade\": 17.9"));
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        CatalogFile::seeded().write(&path).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn load_reads_integer_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{
  "nextId": 3,
  "items": [
    {
      "id": 2,
      "nome": "Farinha de trigo",
      "categoria": "ingrediente",
      "quantidade_base": 1000,
      "tipo_quantidade": "g",
      "preco_por_quantidade": 4
    }
  ]
}"#,
        )
        .unwrap();

        let loaded = CatalogFile::load(&path).await.unwrap().unwrap();

        assert_eq!(loaded.next_id, 3);
        assert_eq!(loaded.items[0].nome, "Farinha de trigo");
    }

    #[tokio::test]
    async fn load_repairs_stale_next_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut file = CatalogFile::seeded();
        file.next_id = 5;
        std::fs::write(&path, serde_json::to_vec(&file).unwrap()).unwrap();

        let loaded = CatalogFile::load(&path).await.unwrap().unwrap();

        assert_eq!(loaded.next_id, 40);
    }

    #[tokio::test]
    async fn load_rejects_invalid_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut file = CatalogFile::seeded();
        file.items[0].nome = "  ".to_string();
        std::fs::write(&path, serde_json::to_vec(&file).unwrap()).unwrap();

        let loaded = CatalogFile::load(&path).await;

        assert!(
            matches!(
                &loaded,
                Err(RepositoryError::Storage(msg)) if msg.contains("item 1 is invalid")
            ),
            "got {loaded:?}"
        );
    }

    #[tokio::test]
    async fn load_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut file = CatalogFile::seeded();
        file.items[1].id = 1;
        std::fs::write(&path, serde_json::to_vec(&file).unwrap()).unwrap();

        assert!(matches!(
            CatalogFile::load(&path).await,
            Err(RepositoryError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ \"nextId\": ").unwrap();

        assert!(matches!(
            CatalogFile::load(&path).await,
            Err(RepositoryError::Storage(_))
        ));
    }
}
