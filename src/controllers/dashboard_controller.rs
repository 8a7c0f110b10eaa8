use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::models::DispatchModel;
use crate::services::chime_service::{Chime, SilentChime};
use crate::session::{SessionContext, SessionStore};
use crate::state::{DashboardState, Notice};
use crate::ui::hooks::CurrentPointTracker;
use crate::utils::errors::{AppResult, DispatchError};

const INITIAL_LOAD_FAILED: &str =
    "No se pudo cargar la información inicial. Por favor, inicie sesión de nuevo.";

/// Número de orden de una consulta de despacho
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Resultado de aplicar una respuesta al tablero
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Despacho nuevo en pantalla
    Updated,
    /// Falló un refresco; se conserva el último despacho válido
    Retained,
    /// Sesión terminada: volver al login
    LoginRequired,
    /// Respuesta de una consulta más antigua que la ya aplicada
    Stale,
}

/// Política de refresco del tablero
///
/// Distingue la carga inicial (sin nada que mostrar: un error obliga a
/// volver al login) de un refresco (hay datos: se conservan y solo se avisa).
/// Cada despacho aplicado pasa por el detector de punto actual antes de
/// publicarse.
pub struct DashboardController {
    session: SessionContext,
    store: SessionStore,
    state: DashboardState,
    tracker: CurrentPointTracker,
    chime: Arc<dyn Chime>,
    issued: u64,
    applied: u64,
}

impl DashboardController {
    pub fn new(session: SessionContext, store: SessionStore, state: DashboardState) -> Self {
        Self {
            session,
            store,
            state,
            tracker: CurrentPointTracker::default(),
            chime: Arc::new(SilentChime),
            issued: 0,
            applied: 0,
        }
    }

    pub fn with_chime(mut self, chime: Arc<dyn Chime>) -> Self {
        self.chime = chime;
        self
    }

    pub fn unit_id(&self) -> &str {
        &self.session.unit_id
    }

    /// Registrar una consulta nueva
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state.set_loading(true);
        debug!("🔄 Consulta #{} para la unidad {}", self.issued, self.session.unit_id);
        FetchTicket(self.issued)
    }

    /// Aplicar la respuesta de una consulta
    pub async fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<DispatchModel, DispatchError>,
    ) -> AppResult<RefreshOutcome> {
        if ticket.0 <= self.applied {
            debug!(
                "⏭️ Respuesta #{} descartada, ya se aplicó la #{}",
                ticket.0, self.applied
            );
            return Ok(RefreshOutcome::Stale);
        }
        self.applied = ticket.0;
        if self.applied >= self.issued {
            self.state.set_loading(false);
        }

        match result {
            Ok(model) => {
                if self.tracker.observe(&model) {
                    info!(
                        "🔔 Nuevo punto actual: {}",
                        self.tracker.previous().unwrap_or_default()
                    );
                    self.chime.play();
                }
                self.state.replace_model(model);
                Ok(RefreshOutcome::Updated)
            }
            Err(DispatchError::SessionExpired) => {
                warn!("🔒 Sesión expirada para la unidad {}", self.session.unit_id);
                self.end_session(DispatchError::SessionExpired.to_string()).await?;
                Ok(RefreshOutcome::LoginRequired)
            }
            Err(err) => {
                error!(
                    "❌ Error crítico al obtener datos para la unidad {} [{}]: {}",
                    self.session.unit_id,
                    err.code(),
                    err
                );
                if self.state.has_data() {
                    self.state.notify(Notice::refresh_error(err.to_string()));
                    Ok(RefreshOutcome::Retained)
                } else {
                    self.end_session(INITIAL_LOAD_FAILED.to_string()).await?;
                    Ok(RefreshOutcome::LoginRequired)
                }
            }
        }
    }

    /// Cierre de sesión pedido por el usuario
    pub async fn logout(&mut self) -> AppResult<()> {
        info!("👋 Cierre de sesión de la unidad {}", self.session.unit_id);
        self.store.clear().await?;
        self.state.reset(None);
        Ok(())
    }

    async fn end_session(&mut self, message: String) -> AppResult<()> {
        self.store.clear().await?;
        self.state.reset(Some(Notice::session_error(message)));
        Ok(())
    }
}
