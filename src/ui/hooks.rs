//! Efectos secundarios de la vista
//!
//! El aviso sonoro suena una sola vez por cada cambio de punto actual,
//! comparando identificadores, no contando redibujos.

use crate::models::DispatchModel;

#[derive(Debug, Clone, Default)]
pub struct CurrentPointTracker {
    previous: Option<String>,
}

impl CurrentPointTracker {
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Registrar un despacho nuevo; `true` si el punto actual cambió
    ///
    /// Con lista vacía no se toca nada. Con lista sin punto actual se olvida
    /// el último, así volver al mismo punto vuelve a sonar.
    pub fn observe(&mut self, model: &DispatchModel) -> bool {
        if !model.has_control_points() {
            return false;
        }

        match model.current_point() {
            Some((_, point)) => {
                let id = point.id();
                if self.previous.as_deref() == Some(id) {
                    false
                } else {
                    self.previous = Some(id.to_string());
                    true
                }
            }
            None => {
                self.previous = None;
                false
            }
        }
    }
}
