//! Estado compartido del tablero
//!
//! Contenedor del último despacho normalizado y del aviso vigente. Cada
//! cambio se publica por un canal `watch`, así la vista se vuelve a dibujar
//! sin que el controlador la conozca.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::watch;

use crate::models::DispatchModel;

/// Tipo de aviso mostrado bajo el tablero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    SessionError,
    RefreshError,
    Info,
}

/// Aviso transitorio (el equivalente a un toast)
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
    pub raised_at: DateTime<Local>,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            raised_at: Local::now(),
        }
    }

    pub fn session_error(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::SessionError, "Error de Sesión", description)
    }

    pub fn refresh_error(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::RefreshError, "Error de Actualización", description)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::SessionError | NoticeKind::RefreshError)
    }
}

/// Foto del estado en un instante
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub model: Option<Arc<DispatchModel>>,
    pub notice: Option<Notice>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Local>>,
    /// Aumenta con cada despacho nuevo aplicado
    pub revision: u64,
}

#[derive(Clone)]
pub struct DashboardState {
    tx: Arc<watch::Sender<DashboardSnapshot>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DashboardSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.tx.borrow().clone()
    }

    pub fn has_data(&self) -> bool {
        self.tx.borrow().model.is_some()
    }

    pub fn current_model(&self) -> Option<Arc<DispatchModel>> {
        self.tx.borrow().model.clone()
    }

    /// Reemplazar el despacho completo tras una consulta exitosa
    pub fn replace_model(&self, model: DispatchModel) {
        self.tx.send_modify(|snapshot| {
            snapshot.model = Some(Arc::new(model));
            snapshot.notice = None;
            snapshot.last_updated = Some(Local::now());
            snapshot.revision += 1;
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.tx.send_if_modified(|snapshot| {
            if snapshot.loading == loading {
                return false;
            }
            snapshot.loading = loading;
            true
        });
    }

    pub fn notify(&self, notice: Notice) {
        self.tx.send_modify(|snapshot| snapshot.notice = Some(notice));
    }

    /// Olvidar el despacho (fin de sesión), conservando solo el aviso indicado
    pub fn reset(&self, notice: Option<Notice>) {
        self.tx.send_modify(|snapshot| {
            let revision = snapshot.revision;
            *snapshot = DashboardSnapshot {
                notice,
                revision,
                ..DashboardSnapshot::default()
            };
        });
    }
}
