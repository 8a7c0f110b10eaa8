//! Servicios del monitor
//!
//! Consulta y normalización del despacho, y aviso sonoro.

pub mod chime_service;
pub mod dispatch_service;
pub mod normalizer;

pub use chime_service::{chime_from_config, Chime};
pub use dispatch_service::{DispatchService, DispatchSource};
pub use normalizer::DispatchNormalizer;
