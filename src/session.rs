//! Sesión de la unidad
//!
//! El identificador de la unidad activa se guarda en un archivo local. Sin
//! archivo (o vacío) no hay sesión y se debe pasar por el login; un 401 de
//! la API o un `logout` explícito lo borran.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::utils::errors::{bad_request_error, AppError, AppResult};

/// Sesión activa: se crea en el login y vive hasta un 401 o un logout
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub unit_id: String,
    pub started_at: DateTime<Local>,
}

impl SessionContext {
    pub fn new(unit_id: String) -> Self {
        Self {
            unit_id,
            started_at: Local::now(),
        }
    }
}

/// Almacenamiento persistente del identificador de unidad
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Leer el identificador guardado, si existe
    pub async fn load(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let unit_id = content.trim();
                if unit_id.is_empty() {
                    debug!("🔍 Archivo de sesión vacío: {}", self.path.display());
                    Ok(None)
                } else {
                    Ok(Some(unit_id.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::SessionStore(format!(
                "no se pudo leer {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Guardar el identificador de la unidad
    pub async fn save(&self, unit_id: &str) -> AppResult<()> {
        let unit_id = unit_id.trim();
        if unit_id.is_empty() {
            return Err(bad_request_error("El identificador de la unidad es requerido"));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, format!("{}\n", unit_id))
            .await
            .map_err(|e| {
                AppError::SessionStore(format!("no se pudo escribir {}: {}", self.path.display(), e))
            })?;

        info!("💾 Sesión guardada para la unidad {}", unit_id);
        Ok(())
    }

    /// Borrar la sesión; no falla si ya no existía
    pub async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("🗑️ Sesión eliminada");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::SessionStore(format!(
                "no se pudo borrar {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Resolver la sesión al arrancar: `None` obliga a pasar por el login
    pub async fn resolve(&self) -> AppResult<Option<SessionContext>> {
        Ok(self.load().await?.map(SessionContext::new))
    }

    /// Iniciar sesión con una unidad
    pub async fn login(&self, unit_id: &str) -> AppResult<SessionContext> {
        self.save(unit_id).await?;
        Ok(SessionContext::new(unit_id.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("nested").join("session"))
    }

    #[tokio::test]
    async fn test_missing_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().await.unwrap(), None);
        assert!(store.resolve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_then_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let session = store.login("  42 ").await.unwrap();
        assert_eq!(session.unit_id, "42");
        assert_eq!(store.load().await.unwrap().as_deref(), Some("42"));

        let resolved = store.resolve().await.unwrap().unwrap();
        assert_eq!(resolved.unit_id, "42");
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save("42").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_unit_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.save("   ").await.is_err());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_file_means_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        tokio::fs::write(&path, "\n").await.unwrap();
        assert_eq!(SessionStore::new(path).load().await.unwrap(), None);
    }
}
