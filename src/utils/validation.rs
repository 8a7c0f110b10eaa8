//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar los formatos
//! de fecha y hora que entrega la API de despacho, y para recortar
//! horas `HH:MM:SS` a `HH:MM` al mostrarlas.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref FULL_TIME_REGEX: Regex = Regex::new(r"^\d{2}:\d{2}:\d{2}$").unwrap();
}

/// Validar que una fecha tenga el formato estricto `YYYY-MM-DD`
///
/// Solo revisa la forma, no que la fecha exista en el calendario.
pub fn is_iso_date(value: &str) -> bool {
    ISO_DATE_REGEX.is_match(value)
}

/// Validar que una hora tenga el formato estricto `HH:MM:SS`
pub fn is_full_time(value: &str) -> bool {
    FULL_TIME_REGEX.is_match(value)
}

/// Formatear una fecha como `YYYY-MM-DD`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Recortar una hora a `HH:MM`
///
/// Cualquier texto de 5 o más caracteres conserva sus primeros 5;
/// los más cortos se devuelven sin cambios.
pub fn short_time(value: &str) -> String {
    if value.chars().count() >= 5 {
        value.chars().take(5).collect()
    } else {
        value.to_string()
    }
}

/// Hora de despacho para la cabecera: solo si viene como `HH:MM:SS`
pub fn header_time(value: Option<&str>) -> Option<String> {
    value.filter(|v| is_full_time(v)).map(short_time)
}

/// Interpretar el estado de un punto de control (entero con signo en texto)
pub fn parse_status(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| leading_integer(v.trim()))
}

// Acepta prefijos numéricos como "3 min" o "+2", igual que la API los envía a veces.
fn leading_integer(value: &str) -> Option<i64> {
    let mut end = 0;
    for (idx, ch) in value.char_indices() {
        if ch.is_ascii_digit() || (idx == 0 && (ch == '-' || ch == '+')) {
            end = idx + ch.len_utf8();
        } else {
            break;
        }
    }
    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_pattern() {
        assert!(is_iso_date("2025-03-14"));
        assert!(!is_iso_date("14/03/2025"));
        assert!(!is_iso_date("2025-3-14"));
        assert!(!is_iso_date("2025-03-14T08:00:00"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("08:15:30"), "08:15");
        assert_eq!(short_time("08:15"), "08:15");
        assert_eq!(short_time("8:15"), "8:15");
        assert_eq!(short_time(""), "");
    }

    #[test]
    fn test_header_time_requires_full_format() {
        assert_eq!(header_time(Some("06:45:00")), Some("06:45".to_string()));
        assert_eq!(header_time(Some("06:45")), None);
        assert_eq!(header_time(None), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status(Some("3")), Some(3));
        assert_eq!(parse_status(Some("-2")), Some(-2));
        assert_eq!(parse_status(Some("+1")), Some(1));
        assert_eq!(parse_status(Some("0")), Some(0));
        assert_eq!(parse_status(Some("4 min")), Some(4));
        assert_eq!(parse_status(Some("abc")), None);
        assert_eq!(parse_status(Some("-")), None);
        assert_eq!(parse_status(None), None);
    }
}
