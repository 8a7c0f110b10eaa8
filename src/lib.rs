//! Monitor de despacho para unidades de transporte
//!
//! Consulta periódicamente la API de despacho de una unidad y muestra en la
//! terminal la ruta, los puntos de control y las unidades adelante/atrás.

pub mod app;
pub mod client;
pub mod config;
pub mod controllers;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod ui;
pub mod utils;
