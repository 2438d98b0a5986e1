//! Low-level vector drawing on a PDF layer.
//!
//! All public functions take coordinates in mm measured from the TOP-LEFT of
//! the page, matching the layout plan, and flip to PDF's bottom-left origin
//! internally. Callers never see PDF-space y values.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{Line, Mm, PdfLayerReference, Point, Polygon};

use crate::report::theme::Rgb;

/// Segments used to approximate each quarter-circle corner.
const CORNER_SEGMENTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectStyle {
    Fill,
    Stroke,
    FillStroke,
}

fn pdf_color(color: Rgb) -> printpdf::Color {
    printpdf::Color::Rgb(printpdf::Rgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        None,
    ))
}

pub fn set_fill(layer: &PdfLayerReference, color: Rgb) {
    layer.set_fill_color(pdf_color(color));
}

pub fn set_stroke(layer: &PdfLayerReference, color: Rgb, thickness: f32) {
    layer.set_outline_color(pdf_color(color));
    layer.set_outline_thickness(thickness);
}

fn emit(layer: &PdfLayerReference, points: Vec<(Point, bool)>, style: RectStyle) {
    match style {
        RectStyle::Fill | RectStyle::FillStroke => {
            layer.add_polygon(Polygon {
                rings: vec![points],
                mode: if style == RectStyle::FillStroke {
                    PaintMode::FillStroke
                } else {
                    PaintMode::Fill
                },
                winding_order: WindingOrder::NonZero,
            });
        }
        RectStyle::Stroke => {
            layer.add_line(Line {
                points,
                is_closed: true,
            });
        }
    }
}

/// Axis-aligned rectangle at top-left (x, top_y).
pub fn rect(
    layer: &PdfLayerReference,
    x: f32,
    top_y: f32,
    w: f32,
    h: f32,
    page_height: f32,
    style: RectStyle,
) {
    let bottom = page_height - (top_y + h);
    let points = vec![
        (Point::new(Mm(x), Mm(bottom)), false),
        (Point::new(Mm(x + w), Mm(bottom)), false),
        (Point::new(Mm(x + w), Mm(bottom + h)), false),
        (Point::new(Mm(x), Mm(bottom + h)), false),
    ];
    emit(layer, points, style);
}

/// Rectangle with circular corners of radius `r`, approximated by short
/// line segments. `r` is clamped so opposing corners cannot overlap.
pub fn rounded_rect(
    layer: &PdfLayerReference,
    x: f32,
    top_y: f32,
    w: f32,
    h: f32,
    r: f32,
    page_height: f32,
    style: RectStyle,
) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    if r == 0.0 {
        rect(layer, x, top_y, w, h, page_height, style);
        return;
    }
    let bottom = page_height - (top_y + h);
    let top = bottom + h;

    // Quarter arc around (cx, cy) from angle `from` to `from + 90°`.
    let arc = |points: &mut Vec<(Point, bool)>, cx: f32, cy: f32, from: f32| {
        for i in 0..=CORNER_SEGMENTS {
            let angle = from + std::f32::consts::FRAC_PI_2 * i as f32 / CORNER_SEGMENTS as f32;
            points.push((
                Point::new(Mm(cx + r * angle.cos()), Mm(cy + r * angle.sin())),
                false,
            ));
        }
    };

    let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    arc(&mut points, x + w - r, bottom + r, -std::f32::consts::FRAC_PI_2);
    arc(&mut points, x + w - r, top - r, 0.0);
    arc(&mut points, x + r, top - r, std::f32::consts::FRAC_PI_2);
    arc(&mut points, x + r, bottom + r, std::f32::consts::PI);
    emit(layer, points, style);
}

/// Straight line between two top-left-origin points.
pub fn line(
    layer: &PdfLayerReference,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    page_height: f32,
) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(page_height - y1)), false),
            (Point::new(Mm(x2), Mm(page_height - y2)), false),
        ],
        is_closed: false,
    });
}
