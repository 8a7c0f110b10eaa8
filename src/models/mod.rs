//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos de la API de despacho:
//! la respuesta cruda, con sus inconsistencias de tipos, y el modelo
//! normalizado que se muestra en pantalla.

pub mod loose;
pub mod route;
pub mod control_point;
pub mod unit;
pub mod dispatch;

pub use control_point::ControlPoint;
pub use dispatch::{CompanionField, ControlPointsField, DispatchModel, RawDispatchPayload};
pub use route::RouteInfo;
pub use unit::{CompanionSide, UnitDetails};
