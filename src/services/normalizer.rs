//! Normalización de la respuesta de despacho
//!
//! Convierte la respuesta cruda de la API en un `DispatchModel` estricto:
//! siempre con cabecera válida, lista de puntos (posiblemente vacía) y
//! unidades adelante/atrás con forma de objeto.

use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::config::DisplayLocale;
use crate::models::{
    loose, CompanionField, CompanionSide, ControlPointsField, DispatchModel, RawDispatchPayload,
    RouteInfo, UnitDetails,
};
use crate::utils::validation::{format_iso_date, is_iso_date};

#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchNormalizer {
    locale: DisplayLocale,
}

impl DispatchNormalizer {
    pub fn new(locale: DisplayLocale) -> Self {
        Self { locale }
    }

    /// Normalizar usando la fecha local de hoy como respaldo
    pub fn normalize(&self, raw: RawDispatchPayload, unit_id: &str) -> Option<DispatchModel> {
        self.normalize_on(raw, unit_id, Local::now().date_naive())
    }

    /// Normalizar la respuesta de la unidad `unit_id`
    ///
    /// Devuelve `None` cuando no hay `routeInfo` o su `unitId` está vacío:
    /// la API no tiene despacho para la unidad.
    pub fn normalize_on(
        &self,
        raw: RawDispatchPayload,
        unit_id: &str,
        today: NaiveDate,
    ) -> Option<DispatchModel> {
        let mut route_info = match decode_route_info(raw.route_info) {
            Some(info) => info,
            None => {
                log::warn!("⚠️ No se encontraron datos de ruta para la unidad {}.", unit_id);
                return None;
            }
        };

        let unit_ahead = self.resolve_companion(raw.unit_ahead, CompanionSide::Ahead, unit_id);
        let unit_behind = self.resolve_companion(raw.unit_behind, CompanionSide::Behind, unit_id);

        let control_points = match raw.control_points {
            ControlPointsField::List(points) => points,
            ControlPointsField::NotAList => Vec::new(),
        };

        if let Some(date) = route_info.current_date.as_deref() {
            if !date.is_empty() && !is_iso_date(date) {
                let replacement = format_iso_date(today);
                log::warn!(
                    "📅 Fecha de despacho '{}' con formato inválido, se usa {}",
                    date,
                    replacement
                );
                route_info.current_date = Some(replacement);
            }
        }

        Some(DispatchModel {
            route_info,
            control_points,
            unit_ahead,
            unit_behind,
        })
    }

    fn side_label(&self, side: CompanionSide) -> &'static str {
        match side {
            CompanionSide::Ahead => self.locale.ahead_label(),
            CompanionSide::Behind => self.locale.behind_label(),
        }
    }

    fn resolve_companion(&self, field: CompanionField, side: CompanionSide, unit_id: &str) -> UnitDetails {
        let label = self.side_label(side);
        match field {
            CompanionField::EmptyList => {
                UnitDetails::placeholder(format!("empty-{}-api-{}", side.slug(), unit_id), label)
            }
            CompanionField::Present(mut unit) => {
                if !unit.has_label() {
                    unit.label = Some(label.to_string());
                }
                unit
            }
            CompanionField::Unexpected => {
                log::debug!("🔍 Unidad {} con forma inesperada para {}", side.slug(), unit_id);
                UnitDetails::placeholder(
                    format!("empty-{}-fallback-api-{}", side.slug(), unit_id),
                    label,
                )
            }
        }
    }
}

fn decode_route_info(value: Option<serde_json::Value>) -> Option<RouteInfo> {
    let value = value.filter(|v| v.is_object())?;
    if loose::is_falsy(value.get("unitId")) {
        return None;
    }
    RouteInfo::deserialize(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn raw(value: Value) -> RawDispatchPayload {
        serde_json::from_value(value).unwrap()
    }

    fn normalize(value: Value, unit_id: &str) -> Option<DispatchModel> {
        DispatchNormalizer::new(DisplayLocale::En).normalize_on(raw(value), unit_id, today())
    }

    #[test]
    fn test_missing_or_empty_unit_id_means_no_data() {
        let others = json!({ "controlPoints": [{ "id": "1" }], "unitAhead": [], "unitBehind": [] });
        for route_info in [
            Value::Null,
            json!({}),
            json!({ "unitId": "" }),
            json!({ "unitId": null, "routeName": "R1" }),
            json!({ "unitId": 0 }),
            json!({ "unitId": false }),
            json!("R1"),
        ] {
            let mut payload = others.clone();
            payload["routeInfo"] = route_info.clone();
            assert!(normalize(payload, "42").is_none(), "routeInfo: {}", route_info);
        }
        assert!(normalize(others, "42").is_none());
    }

    #[test]
    fn test_empty_payload_scenario() {
        let model = normalize(
            json!({
                "routeInfo": { "unitId": "42", "routeName": "R1" },
                "controlPoints": [],
                "unitAhead": [],
                "unitBehind": []
            }),
            "42",
        )
        .unwrap();

        assert!(model.control_points.is_empty());
        assert_eq!(model.route_info.route_name(), "R1");
        assert_eq!(model.unit_ahead.label(), "Ahead");
        assert_eq!(model.unit_ahead.id(), "empty-ahead-api-42");
        assert_eq!(model.unit_behind.label(), "Behind");
        assert_eq!(model.unit_behind.id(), "empty-behind-api-42");
        assert!(model.unit_ahead.id().ends_with("-42"));
        assert!(model.unit_behind.id().ends_with("-42"));
    }

    #[test]
    fn test_placeholder_uses_requested_unit_id() {
        let model = normalize(
            json!({ "routeInfo": { "unitId": "server-id" }, "unitAhead": [], "unitBehind": [] }),
            "requested",
        )
        .unwrap();
        assert_eq!(model.unit_ahead.id(), "empty-ahead-api-requested");
    }

    #[test]
    fn test_unexpected_shapes_use_fallback_identifier() {
        let model = normalize(
            json!({
                "routeInfo": { "unitId": "42" },
                "unitAhead": null,
                "unitBehind": [{ "id": "x" }]
            }),
            "42",
        )
        .unwrap();
        assert_eq!(model.unit_ahead.id(), "empty-ahead-fallback-api-42");
        assert_eq!(model.unit_ahead.label(), "Ahead");
        assert_eq!(model.unit_behind.id(), "empty-behind-fallback-api-42");
        assert_eq!(model.unit_behind.label(), "Behind");

        let model = normalize(json!({ "routeInfo": { "unitId": "42" } }), "42").unwrap();
        assert_eq!(model.unit_ahead.id(), "empty-ahead-fallback-api-42");
    }

    #[test]
    fn test_present_units_keep_or_default_label() {
        let model = normalize(
            json!({
                "routeInfo": { "unitId": "42" },
                "unitAhead": { "id": "u-17", "unitIdentifier": "17" },
                "unitBehind": { "id": "u-9", "label": "Siguiente", "unitIdentifier": "9" }
            }),
            "42",
        )
        .unwrap();

        assert_eq!(model.unit_ahead.id(), "u-17");
        assert_eq!(model.unit_ahead.label(), "Ahead");
        assert_eq!(model.unit_behind.label(), "Siguiente");
        assert_eq!(model.unit_behind.unit_identifier.as_deref(), Some("9"));
    }

    #[test]
    fn test_spanish_labels() {
        let model = DispatchNormalizer::new(DisplayLocale::Es)
            .normalize_on(
                raw(json!({ "routeInfo": { "unitId": "42" }, "unitAhead": [], "unitBehind": {} })),
                "42",
                today(),
            )
            .unwrap();
        assert_eq!(model.unit_ahead.label(), "Adelante");
        assert_eq!(model.unit_behind.label(), "Atrás");
    }

    #[test]
    fn test_non_array_control_points_become_empty() {
        for control_points in [Value::Null, json!("x"), json!({ "id": "1" }), json!(3)] {
            let model = normalize(
                json!({ "routeInfo": { "unitId": "42" }, "controlPoints": control_points }),
                "42",
            )
            .unwrap();
            assert!(model.control_points.is_empty());
        }
    }

    #[test]
    fn test_control_point_order_is_preserved() {
        let model = normalize(
            json!({
                "routeInfo": { "unitId": "42" },
                "controlPoints": [{ "id": "3" }, { "id": "1" }, { "id": "2" }]
            }),
            "42",
        )
        .unwrap();
        let ids: Vec<&str> = model.control_points.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_invalid_date_is_replaced_with_today() {
        for date in ["14/03/2025", "2025-3-14", "hoy", "2025-03-14 06:00"] {
            let model = normalize(
                json!({ "routeInfo": { "unitId": "42", "currentDate": date } }),
                "42",
            )
            .unwrap();
            assert_eq!(model.route_info.current_date.as_deref(), Some("2025-03-14"), "date: {}", date);
        }

        let model = normalize(
            json!({ "routeInfo": { "unitId": "42", "currentDate": "2024-12-31" } }),
            "42",
        )
        .unwrap();
        assert_eq!(model.route_info.current_date.as_deref(), Some("2024-12-31"));

        let model = normalize(json!({ "routeInfo": { "unitId": "42" } }), "42").unwrap();
        assert_eq!(model.route_info.current_date, None);
    }

    #[test]
    fn test_route_counters_accept_any_json_number() {
        let model = normalize(
            json!({ "routeInfo": { "unitId": "42", "totalAT": 2.5, "totalAD": 1.0 } }),
            "42",
        )
        .unwrap();

        assert_eq!(model.route_info.total_at, Some(2.5));
        assert_eq!(model.route_info.total_ad, Some(1.0));
        assert_eq!(
            model.route_info.counters_summary().as_deref(),
            Some("AT: 2.5 | AD: 1")
        );
    }
}
