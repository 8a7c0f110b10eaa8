//! Vista de terminal del tablero de despacho

pub mod cards;
pub mod dashboard;
pub mod hooks;
pub mod styles;
pub mod viewport;

pub use dashboard::{render_frame, render_notice, DashboardView, RenderOptions};
