//! Configuración del proyecto
//!
//! Este módulo contiene la configuración leída de variables de entorno
//! (y de un archivo `.env` si existe).

pub mod environment;

pub use environment::*;
