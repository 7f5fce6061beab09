//! Responsive grid layout.

use serde::Serialize;

/// Column count and spacing for a viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLayout {
    pub columns: usize,
    pub gutter_px: u32,
}

/// `(exclusive upper width bound, columns)`, ascending
const BREAKPOINTS: [(f64, usize); 3] = [(768.0, 2), (1024.0, 3), (1280.0, 4)];

const WIDE_COLUMNS: usize = 5;
const NARROW_GUTTER: u32 = 8;
const WIDE_GUTTER: u32 = 16;

impl GridLayout {
    /// Layout for a viewport `width_px` pixels wide.
    ///
    /// A width that hasn't been measured yet (zero, negative or NaN) gets a
    /// single column.
    pub fn for_width(width_px: f64) -> Self {
        if width_px.is_nan() || width_px <= 0.0 {
            return Self {
                columns: 1,
                gutter_px: NARROW_GUTTER,
            };
        }

        let columns = BREAKPOINTS
            .iter()
            .find(|(bound, _)| width_px < *bound)
            .map(|(_, columns)| *columns)
            .unwrap_or(WIDE_COLUMNS);
        let gutter_px = if width_px < BREAKPOINTS[0].0 {
            NARROW_GUTTER
        } else {
            WIDE_GUTTER
        };

        Self { columns, gutter_px }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::for_width(0.0)
    }
}
