//! Modelo de RouteInfo
//!
//! Cabecera del despacho: ruta, unidad, fecha y hora de despacho y los
//! contadores acumulados (AT/AD) que reenvía el sistema central.

use serde::{Deserialize, Serialize};

use super::loose;

/// Información de la ruta despachada
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    #[serde(default, deserialize_with = "loose::text")]
    pub route_name: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub unit_id: Option<String>,

    /// Fecha del despacho, `YYYY-MM-DD` una vez normalizada
    #[serde(default, deserialize_with = "loose::text")]
    pub current_date: Option<String>,

    #[serde(default, deserialize_with = "loose::text")]
    pub dispatch_time: Option<String>,

    /// Hora de despacho mostrada en la cabecera (`HH:MM:SS`)
    #[serde(default, deserialize_with = "loose::text")]
    pub current_time: Option<String>,

    #[serde(default, deserialize_with = "loose::number")]
    pub speed: Option<f64>,

    /// Contadores: cualquier número JSON, entero o no
    #[serde(rename = "totalAT", default, deserialize_with = "loose::number")]
    pub total_at: Option<f64>,

    #[serde(rename = "totalAD", default, deserialize_with = "loose::number")]
    pub total_ad: Option<f64>,
}

impl RouteInfo {
    pub fn route_name(&self) -> &str {
        self.route_name.as_deref().unwrap_or("")
    }

    pub fn unit_id(&self) -> &str {
        self.unit_id.as_deref().unwrap_or("")
    }

    /// Texto `AT: x | AD: y` con solo los contadores presentes
    pub fn counters_summary(&self) -> Option<String> {
        let parts: Vec<String> = [("AT", self.total_at), ("AD", self.total_ad)]
            .iter()
            .filter_map(|(name, value)| value.map(|v| format!("{}: {}", name, v)))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_upstream_shape() {
        let info: RouteInfo = serde_json::from_value(json!({
            "routeName": "R1 Terminal - Centro",
            "unitId": 42,
            "currentDate": "2025-03-14",
            "currentTime": "06:45:00",
            "speed": 32.5,
            "totalAT": 3,
            "totalAD": "2"
        }))
        .unwrap();

        assert_eq!(info.route_name(), "R1 Terminal - Centro");
        assert_eq!(info.unit_id(), "42");
        assert_eq!(info.current_time.as_deref(), Some("06:45:00"));
        assert_eq!(info.speed, Some(32.5));
        assert_eq!(info.total_at, Some(3.0));
        // El contador en texto no se considera numérico
        assert_eq!(info.total_ad, None);
    }

    #[test]
    fn test_counters_summary() {
        let mut info = RouteInfo::default();
        assert_eq!(info.counters_summary(), None);

        info.total_at = Some(4.0);
        assert_eq!(info.counters_summary().as_deref(), Some("AT: 4"));

        info.total_ad = Some(0.0);
        assert_eq!(info.counters_summary().as_deref(), Some("AT: 4 | AD: 0"));

        info.total_at = None;
        assert_eq!(info.counters_summary().as_deref(), Some("AD: 0"));
    }

    #[test]
    fn test_fractional_counters_are_kept() {
        let info: RouteInfo = serde_json::from_value(json!({
            "unitId": "42",
            "totalAT": 2.5,
            "totalAD": 1.0
        }))
        .unwrap();

        assert_eq!(info.total_at, Some(2.5));
        assert_eq!(info.total_ad, Some(1.0));
        assert_eq!(info.counters_summary().as_deref(), Some("AT: 2.5 | AD: 1"));
    }
}
