//! Page geometry: the only configuration the report engine takes.

use crate::error::ReportError;

/// Page dimensions and margins in millimeters.
///
/// The default matches a portrait A4 page, with a 20 mm top margin applied
/// when a block is pushed to a continuation page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    /// Y-offset for the first block on every page after the first.
    pub top_margin: f32,
    /// Left/right content margin for tables and the notes panel.
    pub side_margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            top_margin: 20.0,
            side_margin: 20.0,
        }
    }
}

impl PageGeometry {
    /// Reject degenerate geometry before any block is placed.
    ///
    /// A non-positive page height would make the pagination loop advance
    /// pages forever, so this is checked once up front instead.
    pub fn validate(&self) -> Result<(), ReportError> {
        if !(self.page_width.is_finite() && self.page_width > 0.0) {
            return Err(ReportError::Geometry(format!(
                "page width must be positive, got {}",
                self.page_width
            )));
        }
        if !(self.page_height.is_finite() && self.page_height > 0.0) {
            return Err(ReportError::Geometry(format!(
                "page height must be positive, got {}",
                self.page_height
            )));
        }
        if !(self.top_margin.is_finite() && self.top_margin >= 0.0)
            || self.top_margin >= self.page_height
        {
            return Err(ReportError::Geometry(format!(
                "top margin {} leaves no room on a {} mm page",
                self.top_margin, self.page_height
            )));
        }
        if !(self.side_margin.is_finite() && self.side_margin >= 0.0)
            || self.side_margin * 2.0 >= self.page_width
        {
            return Err(ReportError::Geometry(format!(
                "side margin {} leaves no room on a {} mm page",
                self.side_margin, self.page_width
            )));
        }
        Ok(())
    }

    /// Usable content width between the side margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.side_margin
    }
}
