//! Proyección del estado a pantalla
//!
//! `render_frame` es una función pura del estado; `DashboardView` agrega el
//! desplazamiento hasta el punto actual al recibir cada despacho nuevo.

use colored::Colorize;

use super::cards::{control_point_card, route_header, unit_card, CARD_WIDTH};
use super::styles::{muted, primary};
use super::viewport::ScrollState;
use crate::models::DispatchModel;
use crate::state::{DashboardSnapshot, Notice};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const COMMAND_HINT: &str = "[r] refrescar  [logout] cerrar sesión  [q] salir";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub viewport_rows: usize,
}

/// Dibujar el tablero completo
pub fn render_frame(snapshot: &DashboardSnapshot, scroll: &ScrollState, options: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    match snapshot.model.as_deref() {
        None => {
            lines.push(muted("Cargando información del despacho…").to_string());
        }
        Some(model) => {
            lines.extend(route_header(&model.route_info));
            lines.push(separator());
            lines.extend(control_points_section(model, scroll, options));
            lines.push(separator());
            lines.extend(unit_card(&model.unit_ahead));
            lines.push(String::new());
            lines.extend(unit_card(&model.unit_behind));
        }
    }

    lines.push(separator());
    lines.push(status_line(snapshot));
    if let Some(notice) = &snapshot.notice {
        lines.extend(render_notice(notice));
    }

    let mut frame = lines.join("\n");
    frame.push('\n');
    frame
}

fn separator() -> String {
    muted(&"─".repeat(CARD_WIDTH + 2)).to_string()
}

fn control_points_section(model: &DispatchModel, scroll: &ScrollState, options: &RenderOptions) -> Vec<String> {
    if !model.has_control_points() {
        return vec![
            primary("ℹ La unidad no tiene despacho asignado.").to_string(),
            muted("No hay puntos de control para mostrar. Intente refrescar más tarde.").to_string(),
        ];
    }

    let total = model.control_points.len();
    let window = scroll.window(total, options.viewport_rows);
    let mut lines = Vec::new();

    if window.start > 0 {
        lines.push(muted(&format!("  ↑ {} puntos anteriores", window.start)).to_string());
    }
    for point in &model.control_points[window.clone()] {
        lines.extend(control_point_card(point));
    }
    if window.end < total {
        lines.push(muted(&format!("  ↓ {} puntos siguientes", total - window.end)).to_string());
    }

    lines
}

fn status_line(snapshot: &DashboardSnapshot) -> String {
    let mut parts = Vec::new();
    if let Some(updated) = snapshot.last_updated {
        parts.push(format!("Actualizado {}", updated.format("%H:%M:%S")));
    }
    if snapshot.loading {
        parts.push("actualizando…".to_string());
    }
    parts.push(COMMAND_HINT.to_string());
    muted(&parts.join("  ·  ")).to_string()
}

pub fn render_notice(notice: &Notice) -> Vec<String> {
    let title = if notice.is_error() {
        notice.title.red().bold()
    } else {
        notice.title.bold()
    };
    vec![format!("{} {}", title, notice.description)]
}

/// Vista del tablero con su posición de desplazamiento
pub struct DashboardView {
    options: RenderOptions,
    scroll: ScrollState,
    seen_revision: u64,
}

impl DashboardView {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            scroll: ScrollState::default(),
            seen_revision: 0,
        }
    }

    /// Procesar un estado nuevo y devolver el cuadro a dibujar
    ///
    /// Solo se desplaza cuando llega un despacho nuevo, no en cada redibujo.
    pub fn on_snapshot(&mut self, snapshot: &DashboardSnapshot) -> String {
        if let Some(model) = snapshot.model.as_deref() {
            if snapshot.revision != self.seen_revision {
                self.seen_revision = snapshot.revision;
                self.follow_current_point(model);
            }
        }
        render_frame(snapshot, &self.scroll, &self.options)
    }

    fn follow_current_point(&mut self, model: &DispatchModel) {
        if !model.has_control_points() {
            return;
        }
        let current = model.current_point().map(|(index, _)| index);
        self.scroll
            .scroll_into_view(model.control_points.len(), current, self.options.viewport_rows);
    }

    /// Escribir el cuadro en la terminal, limpiando la pantalla
    pub fn draw(frame: &str) {
        print!("{}{}", CLEAR_SCREEN, frame);
        use std::io::Write;
        if let Err(e) = std::io::stdout().flush() {
            log::warn!("⚠️ No se pudo escribir en la terminal: {}", e);
        }
    }
}
