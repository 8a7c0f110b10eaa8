//! Modelo de ControlPoint
//!
//! Puntos de control del despacho en el orden que asigna el servidor.

use serde::{Deserialize, Serialize};

use super::loose;
use crate::utils::validation::parse_status;

/// Punto de control programado en la ruta
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    #[serde(default, deserialize_with = "loose::text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub scheduled_time: Option<String>,

    /// Punto actual / siguiente parada
    #[serde(default, deserialize_with = "loose::flag")]
    pub is_current: bool,

    /// Adelanto/atraso en minutos como texto con signo: positivo = atrasado
    #[serde(default, deserialize_with = "loose::text")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub meta: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub meta_time: Option<String>,
}

impl ControlPoint {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Valor numérico del estado, si lo tiene
    pub fn status_value(&self) -> Option<i64> {
        parse_status(self.status.as_deref())
    }

    /// Estado presente y no vacío
    pub fn has_status(&self) -> bool {
        self.status.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }

    pub fn has_meta(&self) -> bool {
        self.meta.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }

    /// Se muestra la línea de meta solo en el punto actual, o en puntos
    /// pasados que ya tienen meta, y siempre que exista un estado.
    pub fn shows_meta_line(&self) -> bool {
        (self.is_current || self.has_meta()) && self.has_status()
    }
}

/// Primer punto marcado como actual
pub fn current_point(points: &[ControlPoint]) -> Option<(usize, &ControlPoint)> {
    points.iter().enumerate().find(|(_, p)| p.is_current)
}
