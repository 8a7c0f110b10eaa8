//! Modelo de UnitDetails
//!
//! Unidades que circulan adelante y atrás de la unidad propia en la misma ruta.

use serde::{Deserialize, Serialize};

use super::loose;

/// Lado de la unidad acompañante respecto a la propia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionSide {
    Ahead,
    Behind,
}

impl CompanionSide {
    /// Nombre usado en los identificadores sintéticos
    pub fn slug(&self) -> &'static str {
        match self {
            CompanionSide::Ahead => "ahead",
            CompanionSide::Behind => "behind",
        }
    }
}

/// Datos de una unidad acompañante
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDetails {
    #[serde(default, deserialize_with = "loose::text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub unit_identifier: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub last_known_location: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub last_known_time: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub meta: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub meta_time: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub status: Option<String>,

    #[serde(rename = "totalAT", default, deserialize_with = "loose::text")]
    pub total_at: Option<String>,

    #[serde(rename = "totalAD", default, deserialize_with = "loose::text")]
    pub total_ad: Option<String>,

    #[serde(default, deserialize_with = "loose::flag")]
    pub is_primary: bool,
}

impl UnitDetails {
    /// Unidad vacía que se muestra cuando la API no envía datos
    pub fn placeholder(id: String, label: &str) -> Self {
        Self {
            id: Some(id),
            label: Some(label.to_string()),
            unit_identifier: Some("--".to_string()),
            last_known_location: Some("Sin datos".to_string()),
            last_known_time: Some("--:--".to_string()),
            meta: None,
            meta_time: None,
            status: None,
            total_at: Some("0".to_string()),
            total_ad: Some("0".to_string()),
            is_primary: false,
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    pub fn has_label(&self) -> bool {
        !self.label().is_empty()
    }

    pub fn has_meta(&self) -> bool {
        self.meta.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }

    pub fn has_status(&self) -> bool {
        self.status.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }
}
