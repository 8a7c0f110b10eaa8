//! Tarjetas del tablero
//!
//! Cada función devuelve las líneas ya coloreadas de una tarjeta.

use colored::Colorize;

use super::styles::{muted, paint_status, point_border, point_treatment, primary, status_tone};
use crate::models::{ControlPoint, RouteInfo, UnitDetails};
use crate::utils::validation::{header_time, short_time};

pub const CARD_WIDTH: usize = 44;

/// Texto a la izquierda y a la derecha, separados hasta ocupar `width`
fn spread(left: &str, right: &str, width: usize) -> (String, String) {
    let used = left.chars().count() + right.chars().count();
    let gap = width.saturating_sub(used).max(1);
    (left.to_string(), format!("{}{}", " ".repeat(gap), right))
}

fn optional_time(value: Option<&str>) -> String {
    value.map(short_time).unwrap_or_default()
}

/// Cabecera con ruta, hora de despacho, unidad y contadores
pub fn route_header(info: &RouteInfo) -> Vec<String> {
    let mut lines = vec![info.route_name().bold().to_string()];

    if let Some(time) = header_time(info.current_time.as_deref()) {
        lines.push(format!("{} {}", "Despacho:".bold(), time.bold()));
    }

    let mut unit_line = primary(info.unit_id()).to_string();
    if let Some(counters) = info.counters_summary() {
        unit_line.push_str("    ");
        unit_line.push_str(&counters);
    }
    lines.push(unit_line);

    lines
}

/// Tarjeta de una unidad adelante/atrás
pub fn unit_card(unit: &UnitDetails) -> Vec<String> {
    let border = if unit.is_primary {
        "┃".bright_blue().bold()
    } else {
        muted("│")
    };

    let title = format!(
        "{}: {}",
        unit.label(),
        unit.unit_identifier.as_deref().unwrap_or("")
    );
    let title = if unit.is_primary {
        primary(&title)
    } else {
        muted(&title).bold()
    };

    let mut lines = vec![
        format!("{} {}", border, title),
        format!(
            "{} Total AT: {} Total AD: {}",
            border,
            primary(unit.total_at.as_deref().unwrap_or("")),
            unit.total_ad.as_deref().unwrap_or("").bold()
        ),
        format!(
            "{} {} - {}",
            border,
            unit.last_known_location.as_deref().unwrap_or(""),
            optional_time(unit.last_known_time.as_deref())
        ),
    ];

    if unit.has_meta() {
        let mut meta_line = format!(
            "{} {} {}",
            border,
            unit.meta.as_deref().unwrap_or(""),
            optional_time(unit.meta_time.as_deref()).bold()
        );
        if unit.has_status() {
            meta_line.push_str(&format!(" l: {}", primary(unit.status.as_deref().unwrap_or(""))));
        }
        lines.push(meta_line);
    }

    lines
}

/// Tarjeta de un punto de control
pub fn control_point_card(point: &ControlPoint) -> Vec<String> {
    let border = point_border(point_treatment(point));

    let (name, time) = spread(
        point.name(),
        &optional_time(point.scheduled_time.as_deref()),
        CARD_WIDTH,
    );
    let mut lines = vec![format!("{} {}{}", border, name.bold(), time.bold())];

    if point.shows_meta_line() {
        let mut meta = point.meta.clone().unwrap_or_default();
        if let Some(meta_time) = point.meta_time.as_deref().filter(|t| !t.is_empty()) {
            if !meta.is_empty() {
                meta.push(' ');
            }
            meta.push_str(&short_time(meta_time));
        }
        let status = point.status.as_deref().unwrap_or("");
        let (meta, padded_status) = spread(&meta, status, CARD_WIDTH);
        let pad = &padded_status[..padded_status.len() - status.len()];
        lines.push(format!(
            "{} {}{}{}",
            border,
            meta.bold(),
            pad,
            paint_status(status, status_tone(point.status_value()))
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_route_header_shows_dispatch_time_only_for_full_times() {
        plain();
        let mut info = RouteInfo {
            route_name: Some("R1 Terminal - Centro".into()),
            unit_id: Some("42".into()),
            current_time: Some("06:45:10".into()),
            total_at: Some(3.0),
            ..RouteInfo::default()
        };

        let lines = route_header(&info);
        assert_eq!(lines[0], "R1 Terminal - Centro");
        assert_eq!(lines[1], "Despacho: 06:45");
        assert_eq!(lines[2], "42    AT: 3");

        info.current_time = Some("6:45".into());
        info.total_at = None;
        let lines = route_header(&info);
        assert_eq!(lines, vec!["R1 Terminal - Centro".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_unit_card_lines() {
        plain();
        let unit = UnitDetails {
            label: Some("Adelante".into()),
            unit_identifier: Some("17".into()),
            last_known_location: Some("Parque Central".into()),
            last_known_time: Some("07:05:44".into()),
            meta: Some("Redondel".into()),
            meta_time: Some("07:10:00".into()),
            status: Some("2".into()),
            total_at: Some("1".into()),
            total_ad: Some("0".into()),
            ..UnitDetails::default()
        };

        let lines = unit_card(&unit);
        assert_eq!(lines[0], "│ Adelante: 17");
        assert_eq!(lines[1], "│ Total AT: 1 Total AD: 0");
        assert_eq!(lines[2], "│ Parque Central - 07:05");
        assert_eq!(lines[3], "│ Redondel 07:10 l: 2");
    }

    #[test]
    fn test_unit_card_without_meta() {
        plain();
        let unit = UnitDetails::placeholder("empty-behind-api-42".into(), "Atrás");
        let lines = unit_card(&unit);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "│ Atrás: --");
        assert_eq!(lines[2], "│ Sin datos - --:--");
    }

    #[test]
    fn test_control_point_card_layout() {
        plain();
        let point = ControlPoint {
            id: Some("7".into()),
            name: Some("Redondel Norte".into()),
            scheduled_time: Some("07:32:00".into()),
            is_current: true,
            status: Some("-2".into()),
            meta: Some("Marcó".into()),
            meta_time: Some("07:30:15".into()),
        };

        let lines = control_point_card(&point);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("┃ Redondel Norte"));
        assert!(lines[0].ends_with("07:32"));
        assert_eq!(lines[0].chars().count(), CARD_WIDTH + 2);
        assert!(lines[1].starts_with("┃ Marcó 07:30"));
        assert!(lines[1].ends_with("-2"));
    }

    #[test]
    fn test_upcoming_point_has_dashed_border_and_no_meta() {
        plain();
        let point = ControlPoint {
            id: Some("8".into()),
            name: Some("Mercado".into()),
            scheduled_time: Some("07:40:00".into()),
            status: Some("1".into()),
            ..ControlPoint::default()
        };
        let lines = control_point_card(&point);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("┆ Mercado"));
    }
}
