//! Tratamiento visual según el estado
//!
//! Decide borde y colores de cada tarjeta; el dibujo en sí vive en `cards`.

use colored::{ColoredString, Colorize};

use crate::models::ControlPoint;

/// Tratamiento de la tarjeta de un punto de control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointTreatment {
    /// Punto actual atrasado, o sin estado numérico
    CurrentLate,
    /// Punto actual a tiempo o adelantado
    CurrentOnTime,
    /// Resto de puntos: borde discontinuo
    Upcoming,
}

/// Color del texto de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Late,
    OnTime,
    Neutral,
}

pub fn point_treatment(point: &ControlPoint) -> PointTreatment {
    if !point.is_current {
        return PointTreatment::Upcoming;
    }
    match point.status_value() {
        Some(value) if value <= 0 => PointTreatment::CurrentOnTime,
        _ => PointTreatment::CurrentLate,
    }
}

pub fn status_tone(value: Option<i64>) -> StatusTone {
    match value {
        Some(v) if v > 0 => StatusTone::Late,
        Some(_) => StatusTone::OnTime,
        None => StatusTone::Neutral,
    }
}

/// Borde izquierdo de la tarjeta
pub fn point_border(treatment: PointTreatment) -> ColoredString {
    match treatment {
        PointTreatment::CurrentLate => "┃".bright_blue().bold(),
        PointTreatment::CurrentOnTime => "┃".green().bold(),
        PointTreatment::Upcoming => "┆".bright_blue(),
    }
}

pub fn paint_status(text: &str, tone: StatusTone) -> ColoredString {
    match tone {
        StatusTone::Late => text.red().bold(),
        StatusTone::OnTime => text.green().bold(),
        StatusTone::Neutral => text.bold(),
    }
}

pub fn primary(text: &str) -> ColoredString {
    text.bright_blue().bold()
}

pub fn muted(text: &str) -> ColoredString {
    text.bright_black()
}
