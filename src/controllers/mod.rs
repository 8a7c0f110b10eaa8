//! Controladores
//!
//! Este módulo contiene la lógica que decide qué hacer con cada respuesta
//! de la API de despacho.

pub mod dashboard_controller;

pub use dashboard_controller::{DashboardController, FetchTicket, RefreshOutcome};
