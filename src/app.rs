//! Bucle principal del monitor
//!
//! Une sesión, consultas periódicas, comandos del teclado y la vista. Cada
//! consulta corre en su propia tarea y devuelve el resultado por un canal,
//! así un refresco manual no espera a que termine el automático.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::EnvironmentConfig;
use crate::controllers::{DashboardController, FetchTicket, RefreshOutcome};
use crate::models::DispatchModel;
use crate::services::{Chime, DispatchSource};
use crate::session::{SessionContext, SessionStore};
use crate::state::{DashboardState, Notice, NoticeKind};
use crate::ui::viewport::ScrollState;
use crate::ui::{render_frame, render_notice, DashboardView, RenderOptions};
use crate::utils::errors::{AppResult, DispatchError};

type FetchResult = (FetchTicket, Result<DispatchModel, DispatchError>);

/// Comandos escritos por el operador mientras mira el tablero
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Logout,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let command = line.trim().to_lowercase();
    match command.as_str() {
        "" => None,
        "r" | "refresh" | "refrescar" => Some(Command::Refresh),
        "logout" | "salir-sesion" => Some(Command::Logout),
        "q" | "quit" | "salir" => Some(Command::Quit),
        _ => Some(Command::Unknown(command)),
    }
}

/// Cómo terminó una sesión de monitoreo
#[derive(Debug, Clone, PartialEq)]
pub enum WatchExit {
    Quit,
    /// Volver al login, con el aviso que lo provocó si lo hay
    LoginRequired(Option<Notice>),
}

pub struct Monitor {
    config: EnvironmentConfig,
    source: Arc<dyn DispatchSource>,
    store: SessionStore,
    chime: Arc<dyn Chime>,
}

impl Monitor {
    pub fn new(
        config: EnvironmentConfig,
        source: Arc<dyn DispatchSource>,
        store: SessionStore,
        chime: Arc<dyn Chime>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            chime,
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            viewport_rows: self.config.viewport_rows,
        }
    }

    /// Ejecutar el monitor hasta que el operador salga
    pub async fn run(&self) -> AppResult<()> {
        let mut input = spawn_stdin_reader();
        let mut shutdown = spawn_shutdown_listener();
        let mut pending = self.store.resolve().await?;

        loop {
            let session = match pending.take() {
                Some(session) => session,
                None => match prompt_login(&self.store, &mut input, &mut shutdown).await? {
                    Some(session) => session,
                    None => return Ok(()),
                },
            };

            match self.run_session(session, &mut input, &mut shutdown).await? {
                WatchExit::Quit => {
                    info!("👋 Monitor terminado");
                    return Ok(());
                }
                WatchExit::LoginRequired(notice) => {
                    println!();
                    if let Some(notice) = notice {
                        for line in render_notice(&notice) {
                            println!("{}", line);
                        }
                    }
                }
            }
        }
    }

    /// Monitorear una unidad hasta salir o perder la sesión
    pub async fn run_session(
        &self,
        session: SessionContext,
        input: &mut mpsc::Receiver<String>,
        shutdown: &mut watch::Receiver<bool>,
    ) -> AppResult<WatchExit> {
        info!("🚌 Monitoreando la unidad {}", session.unit_id);

        let state = DashboardState::new();
        let mut controller = DashboardController::new(session, self.store.clone(), state.clone())
            .with_chime(self.chime.clone());
        let view_task = self.spawn_view(&state);

        let (tx, mut rx) = mpsc::channel::<FetchResult>(16);
        let mut ticker = tokio::time::interval(self.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut input_open = true;

        let exit = loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.spawn_fetch(&mut controller, &tx);
                }
                Some((ticket, result)) = rx.recv() => {
                    if controller.apply(ticket, result).await? == RefreshOutcome::LoginRequired {
                        break WatchExit::LoginRequired(state.snapshot().notice);
                    }
                }
                line = input.recv(), if input_open => match line {
                    None => {
                        warn!("⌨️ Entrada estándar cerrada, el tablero sigue sin comandos");
                        input_open = false;
                    }
                    Some(line) => match parse_command(&line) {
                        Some(Command::Refresh) => {
                            ticker.reset();
                            self.spawn_fetch(&mut controller, &tx);
                        }
                        Some(Command::Logout) => {
                            controller.logout().await?;
                            break WatchExit::LoginRequired(None);
                        }
                        Some(Command::Quit) => break WatchExit::Quit,
                        Some(Command::Unknown(command)) => {
                            state.notify(Notice::new(NoticeKind::Info, "Comando desconocido:", command));
                        }
                        None => {}
                    },
                },
                _ = shutdown.changed() => {
                    info!("🛑 Señal de terminación recibida, cerrando el monitor...");
                    break WatchExit::Quit;
                }
            }
        };

        view_task.abort();
        Ok(exit)
    }

    fn spawn_fetch(&self, controller: &mut DashboardController, tx: &mpsc::Sender<FetchResult>) {
        let ticket = controller.begin_fetch();
        let unit_id = controller.unit_id().to_string();
        let source = self.source.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let result = source.fetch_dispatch(&unit_id).await;
            // Si la sesión ya terminó nadie espera esta respuesta
            let _ = tx.send((ticket, result)).await;
        });
    }

    fn spawn_view(&self, state: &DashboardState) -> JoinHandle<()> {
        let mut rx = state.subscribe();
        let mut view = DashboardView::new(self.render_options());

        tokio::spawn(async move {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                let frame = view.on_snapshot(&snapshot);
                DashboardView::draw(&frame);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Consultar una vez e imprimir el tablero, sin bucle ni efectos
    pub async fn print_status(&self) -> AppResult<()> {
        let Some(session) = self.store.resolve().await? else {
            println!("Sin sesión activa. Use `despacho_monitor login <unidad>`.");
            return Ok(());
        };

        println!("Unidad activa: {}", session.unit_id);
        let state = DashboardState::new();
        match self.source.fetch_dispatch(&session.unit_id).await {
            Ok(model) => state.replace_model(model),
            Err(DispatchError::SessionExpired) => {
                self.store.clear().await?;
                state.notify(Notice::session_error(DispatchError::SessionExpired.to_string()));
            }
            Err(err) => state.notify(Notice::refresh_error(err.to_string())),
        }

        let mut scroll = ScrollState::default();
        if let Some(model) = state.current_model() {
            let current = model.current_point().map(|(index, _)| index);
            scroll.scroll_into_view(model.control_points.len(), current, self.config.viewport_rows);
        }
        print!("{}", render_frame(&state.snapshot(), &scroll, &self.render_options()));
        Ok(())
    }
}

/// Pedir el identificador de unidad; `None` si se cerró la entrada o se pidió salir
pub async fn prompt_login(
    store: &SessionStore,
    input: &mut mpsc::Receiver<String>,
    shutdown: &mut watch::Receiver<bool>,
) -> AppResult<Option<SessionContext>> {
    loop {
        print!("Identificador de unidad: ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = input.recv() => line,
            _ = shutdown.changed() => None,
        };
        let Some(line) = line else {
            return Ok(None);
        };

        let unit_id = line.trim();
        if unit_id.is_empty() {
            println!("El identificador de la unidad es requerido.");
            continue;
        }
        return store.login(unit_id).await.map(Some);
    }
}

/// Leer la entrada estándar línea por línea
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("⚠️ Error leyendo la entrada estándar: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Publicar Ctrl+C / SIGTERM en un canal
pub fn spawn_shutdown_listener() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = tx.send(true);
        // Mantener el canal abierto para que los receptores no vean un cierre
        std::future::pending::<()>().await;
    });
    rx
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida");
        },
    }
}
