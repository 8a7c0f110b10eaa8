//! Modelo de despacho
//!
//! `RawDispatchPayload` refleja la respuesta tal como la envía la API
//! (`{ routeInfo, controlPoints, unitAhead, unitBehind }`), con sus
//! inconsistencias; `DispatchModel` es la versión normalizada que consume
//! la pantalla.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::control_point::{current_point, ControlPoint};
use super::route::RouteInfo;
use super::unit::UnitDetails;
use crate::utils::errors::DispatchError;

/// Campo de unidad acompañante tal como llega de la API
///
/// La API indica "sin unidad" con `[]` en lugar de `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CompanionField {
    /// `[]`, la forma canónica de "no hay unidad"
    EmptyList,
    Present(UnitDetails),
    /// Cualquier otra forma: campo ausente, `null`, lista no vacía, texto...
    #[default]
    Unexpected,
}

impl<'de> Deserialize<'de> for CompanionField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(ref items) if items.is_empty() => CompanionField::EmptyList,
            Value::Object(_) => match UnitDetails::deserialize(value) {
                Ok(unit) => CompanionField::Present(unit),
                Err(e) => {
                    log::warn!("⚠️ Unidad acompañante con formato inesperado: {}", e);
                    CompanionField::Unexpected
                }
            },
            _ => CompanionField::Unexpected,
        })
    }
}

/// Lista de puntos de control tal como llega de la API
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControlPointsField {
    List(Vec<ControlPoint>),
    #[default]
    NotAList,
}

impl<'de> Deserialize<'de> for ControlPointsField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Array(items) = value else {
            return Ok(ControlPointsField::NotAList);
        };

        let mut points = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                log::warn!("⚠️ Punto de control #{} ignorado: no es un objeto", index);
                continue;
            }
            match ControlPoint::deserialize(item) {
                Ok(point) => points.push(point),
                Err(e) => log::warn!("⚠️ Punto de control #{} ignorado: {}", index, e),
            }
        }
        Ok(ControlPointsField::List(points))
    }
}

/// Respuesta cruda de `GET /api/get_despacho/{unitId}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDispatchPayload {
    /// Se conserva sin tipar para poder evaluar `unitId` como lo hace la API
    #[serde(default)]
    pub route_info: Option<Value>,

    #[serde(default)]
    pub control_points: ControlPointsField,

    #[serde(default)]
    pub unit_ahead: CompanionField,

    #[serde(default)]
    pub unit_behind: CompanionField,
}

impl RawDispatchPayload {
    /// Interpretar el cuerpo de la respuesta; debe ser un objeto JSON
    pub fn from_json(body: &str) -> Result<Self, DispatchError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| DispatchError::MalformedBody(e.to_string()))?;

        if !value.is_object() {
            return Err(DispatchError::MalformedBody(format!(
                "se esperaba un objeto JSON, se recibió {}",
                json_kind(&value)
            )));
        }

        serde_json::from_value(value).map_err(|e| DispatchError::MalformedBody(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booleano",
        Value::Number(_) => "un número",
        Value::String(_) => "un texto",
        Value::Array(_) => "una lista",
        Value::Object(_) => "un objeto",
    }
}

/// Despacho normalizado, listo para mostrar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchModel {
    pub route_info: RouteInfo,
    pub control_points: Vec<ControlPoint>,
    pub unit_ahead: UnitDetails,
    pub unit_behind: UnitDetails,
}

impl DispatchModel {
    /// Índice y punto actual, si hay uno marcado
    pub fn current_point(&self) -> Option<(usize, &ControlPoint)> {
        current_point(&self.control_points)
    }

    pub fn has_control_points(&self) -> bool {
        !self.control_points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> RawDispatchPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_companion_field_shapes() {
        let raw = decode(json!({
            "unitAhead": [],
            "unitBehind": { "unitIdentifier": "17" }
        }));
        assert_eq!(raw.unit_ahead, CompanionField::EmptyList);
        assert!(matches!(raw.unit_behind, CompanionField::Present(ref u) if u.unit_identifier.as_deref() == Some("17")));

        let raw = decode(json!({ "unitAhead": null, "unitBehind": [{ "id": 1 }] }));
        assert_eq!(raw.unit_ahead, CompanionField::Unexpected);
        assert_eq!(raw.unit_behind, CompanionField::Unexpected);

        let raw = decode(json!({}));
        assert_eq!(raw.unit_ahead, CompanionField::Unexpected);
        assert!(raw.route_info.is_none());
    }

    #[test]
    fn test_control_points_field_shapes() {
        let raw = decode(json!({ "controlPoints": "nada" }));
        assert_eq!(raw.control_points, ControlPointsField::NotAList);

        let raw = decode(json!({ "controlPoints": { "0": {} } }));
        assert_eq!(raw.control_points, ControlPointsField::NotAList);

        let raw = decode(json!({ "controlPoints": [ { "id": "b" }, 5, { "id": "a" } ] }));
        match raw.control_points {
            ControlPointsField::List(points) => {
                let ids: Vec<&str> = points.iter().map(|p| p.id()).collect();
                assert_eq!(ids, vec!["b", "a"]);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        for body in ["[]", "\"ok\"", "null", "{ not json", ""] {
            let err = RawDispatchPayload::from_json(body).unwrap_err();
            assert_eq!(err.code(), "MALFORMED_BODY", "body: {:?}", body);
        }
        assert!(RawDispatchPayload::from_json("{}").is_ok());
    }
}
