//! Budget comparison chart geometry.
//!
//! A deterministic, stateless scaling pass: given the two cost figures and
//! the chart's page position, every rectangle, gridline, and label position
//! comes out bit-for-bit identical. Drawing happens elsewhere — this module
//! only computes coordinates.

use crate::report::format::format_currency;

/// Bar body height area in mm.
pub const CHART_HEIGHT: f32 = 80.0;
/// Plot width in mm.
pub const CHART_WIDTH: f32 = 150.0;

const BAR_WIDTH: f32 = 40.0;
const BAR_GAP: f32 = 30.0;
const GRIDLINE_COUNT: usize = 5;

/// Scale a value into bar height. Monotonic in `value`; 0 at 0 and
/// `chart_height` at `max_value`. The divisor is floored at 1, so a zero or
/// negative `max_value` yields zero-height bars instead of NaN.
pub fn scale_bar(value: f64, max_value: f64, chart_height: f32) -> f32 {
    (value / max_value.max(1.0)) as f32 * chart_height
}

/// One horizontal gridline with its tick label.
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub y: f32,
    pub label: String,
}

/// One bar with its value label above and category label below.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub top_y: f32,
    pub width: f32,
    pub height: f32,
    pub value_label: String,
    pub category: &'static str,
}

/// Complete chart coordinates, measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub title_y: f32,
    /// Rounded outline around the whole plot: (x, y, width, height).
    pub frame: (f32, f32, f32, f32),
    /// Vertical axis: x, top y, bottom y.
    pub axis: (f32, f32, f32),
    pub gridlines: Vec<Gridline>,
    pub bars: [Bar; 2],
    /// Baseline under the bars: (x1, x2, y).
    pub baseline: (f32, f32, f32),
    /// Y of the category labels under the bars.
    pub category_label_y: f32,
}

/// Compute the chart geometry for the block placed at `top_y` on a page of
/// `page_width` mm. Bars are scaled against `max(expected, actual, 1)`;
/// the floor of 1 keeps an all-zero budget from dividing by zero.
pub fn chart_geometry(expected: f64, actual: f64, page_width: f32, top_y: f32) -> ChartGeometry {
    let max_value = expected.max(actual).max(1.0);
    let start_x = (page_width - CHART_WIDTH) / 2.0;
    let plot_top = top_y + 15.0;
    let plot_bottom = plot_top + CHART_HEIGHT;

    let gridlines = (0..=GRIDLINE_COUNT)
        .map(|k| {
            let value = max_value / GRIDLINE_COUNT as f64 * k as f64;
            Gridline {
                y: plot_bottom - k as f32 * (CHART_HEIGHT / GRIDLINE_COUNT as f32),
                label: format_currency(value),
            }
        })
        .collect();

    let bar = |index: usize, value: f64, category: &'static str| {
        let height = scale_bar(value, max_value, CHART_HEIGHT);
        Bar {
            x: start_x + 20.0 + index as f32 * (BAR_WIDTH + BAR_GAP),
            top_y: plot_bottom - height,
            width: BAR_WIDTH,
            height,
            value_label: format_currency(value),
            category,
        }
    };

    ChartGeometry {
        title_y: top_y,
        frame: (start_x - 5.0, top_y + 10.0, CHART_WIDTH + 10.0, CHART_HEIGHT + 30.0),
        axis: (start_x, plot_top, plot_bottom),
        gridlines,
        bars: [bar(0, expected, "Expected"), bar(1, actual, "Actual")],
        baseline: (start_x, start_x + CHART_WIDTH, plot_bottom),
        category_label_y: plot_bottom + 15.0,
    }
}
