//! Desplazamiento de la lista de puntos de control
//!
//! En cada despacho nuevo la ventana visible arranca en el punto actual.
//! Si no hay punto actual la ventana se queda donde estaba.

use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
}

impl ScrollState {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Llevar el punto actual al inicio de la ventana
    pub fn scroll_into_view(&mut self, len: usize, current: Option<usize>, rows: usize) {
        if let Some(index) = current {
            self.offset = index;
        }
        self.offset = clamp_offset(self.offset, len, rows);
    }

    /// Rango visible de la lista
    pub fn window(&self, len: usize, rows: usize) -> Range<usize> {
        let start = clamp_offset(self.offset, len, rows);
        start..(start + rows.max(1)).min(len)
    }
}

// La ventana siempre queda llena cuando hay suficientes elementos
fn clamp_offset(offset: usize, len: usize, rows: usize) -> usize {
    offset.min(len.saturating_sub(rows.max(1)))
}
