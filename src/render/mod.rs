//! # PDF Renderer
//!
//! Walks a finalized [`LayoutPlan`] and emits the document with `printpdf`.
//! The renderer makes no layout decisions: every block arrives with its page
//! and y-offset already fixed, so drawing is a straight dispatch over block
//! kinds followed by a footer pass across all pages.
//!
//! A photo that fails to decode is logged and skipped; the bordered frame is
//! drawn regardless, so a bad image never aborts the report.

mod draw;
pub(crate) mod text;

use std::io::{BufWriter, Cursor};

use base64::Engine;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::error::ReportError;
use crate::report::chart::{self, ChartGeometry};
use crate::report::geometry::PageGeometry;
use crate::report::layout::{
    Block, ChartBlock, ImageBlock, LayoutPlan, NotesBlock, TableBlock, TitleBlock,
};
use crate::report::theme::Theme;

use draw::RectStyle;

// Photo inset geometry in mm: bordered frame with the image inside.
const IMAGE_FRAME_X: f32 = 75.0;
const IMAGE_FRAME_W: f32 = 60.0;
const IMAGE_FRAME_H: f32 = 45.0;
const IMAGE_X: f32 = 80.0;
const IMAGE_W: f32 = 50.0;
const IMAGE_H: f32 = 35.0;

const TABLE_ROW_HEIGHT: f32 = 8.0;
const NOTES_PANEL_HEIGHT: f32 = 40.0;
const NOTES_LINE_HEIGHT: f32 = 5.0;
const CORNER_RADIUS: f32 = 2.0;

const PT_TO_MM: f32 = 0.352_778;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render `plan` into PDF bytes.
pub fn render(
    plan: &LayoutPlan,
    geometry: &PageGeometry,
    theme: &Theme,
) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Drone Report",
        Mm(geometry.page_width),
        Mm(geometry.page_height),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(e.to_string()))?,
    };

    let mut pages = vec![(first_page, first_layer)];
    for _ in 1..plan.page_count {
        pages.push(doc.add_page(
            Mm(geometry.page_width),
            Mm(geometry.page_height),
            "Layer 1",
        ));
    }

    for block in &plan.blocks {
        let (page, layer) = pages[block.placement().page];
        let layer = doc.get_page(page).get_layer(layer);
        match block {
            Block::Title(b) => draw_title(&layer, b, geometry, theme, &fonts),
            Block::Image(b) => draw_image(&layer, b, geometry, theme),
            Block::Table(b) => draw_table(&layer, b, geometry, theme, &fonts),
            Block::Chart(b) => draw_chart(&layer, b, geometry, theme, &fonts),
            Block::Notes(b) => draw_notes(&layer, b, geometry, theme, &fonts),
        }
    }

    let generated_on = chrono::Local::now().format("%-m/%-d/%Y").to_string();
    for (index, (page, layer)) in pages.iter().enumerate() {
        let layer = doc.get_page(*page).get_layer(*layer);
        draw_footer(&layer, index, plan.page_count, &generated_on, geometry, theme, &fonts);
    }

    let mut buffer = Vec::new();
    doc.save(&mut BufWriter::new(Cursor::new(&mut buffer)))
        .map_err(|e| ReportError::Render(e.to_string()))?;
    Ok(buffer)
}

/// Draw `text` with its baseline at top-down `y`.
fn put_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    x: f32,
    y: f32,
    page_height: f32,
) {
    layer.use_text(text, size, Mm(x), Mm(page_height - y), font);
}

fn put_text_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    center_x: f32,
    y: f32,
    page_height: f32,
) {
    let x = center_x - text::text_width_mm(text, size) / 2.0;
    put_text(layer, font, text, size, x, y, page_height);
}

fn put_text_right(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    size: f32,
    right_x: f32,
    y: f32,
    page_height: f32,
) {
    let x = right_x - text::text_width_mm(text, size);
    put_text(layer, font, text, size, x, y, page_height);
}

// ============================================================================
// BLOCKS
// ============================================================================

fn draw_title(
    layer: &PdfLayerReference,
    block: &TitleBlock,
    geometry: &PageGeometry,
    theme: &Theme,
    fonts: &Fonts,
) {
    let p = block.placement;
    draw::set_fill(layer, theme.primary);
    draw::rect(
        layer,
        0.0,
        p.y,
        geometry.page_width,
        p.height,
        geometry.page_height,
        RectStyle::Fill,
    );
    draw::set_fill(layer, theme.on_primary);
    put_text_centered(
        layer,
        &fonts.bold,
        &block.text,
        theme.title_font_size,
        geometry.page_width / 2.0,
        p.y + 20.0,
        geometry.page_height,
    );
}

fn draw_image(
    layer: &PdfLayerReference,
    block: &ImageBlock,
    geometry: &PageGeometry,
    theme: &Theme,
) {
    let p = block.placement;
    draw::set_stroke(layer, theme.border, 0.5);
    draw::rounded_rect(
        layer,
        IMAGE_FRAME_X,
        p.y,
        IMAGE_FRAME_W,
        IMAGE_FRAME_H,
        3.0,
        geometry.page_height,
        RectStyle::Stroke,
    );

    let rgb = match decode_photo(&block.data_base64) {
        Ok(image) => image,
        Err(reason) => {
            tracing::warn!(%reason, "skipping undecodable drone photo");
            return;
        }
    };

    let (px_w, px_h) = (rgb.width(), rgb.height());
    let image = printpdf::Image::from(printpdf::ImageXObject {
        width: printpdf::Px(px_w as usize),
        height: printpdf::Px(px_h as usize),
        color_space: printpdf::ColorSpace::Rgb,
        bits_per_component: printpdf::ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // At 72 dpi one pixel is one point, so the scale factors map pixel
    // dimensions onto the frame's mm dimensions exactly.
    let translate_y = geometry.page_height - (p.y + 5.0 + IMAGE_H);
    image.add_to_layer(
        layer.clone(),
        printpdf::ImageTransform {
            translate_x: Some(Mm(IMAGE_X)),
            translate_y: Some(Mm(translate_y)),
            scale_x: Some(IMAGE_W / (px_w as f32 * PT_TO_MM)),
            scale_y: Some(IMAGE_H / (px_h as f32 * PT_TO_MM)),
            dpi: Some(72.0),
            ..Default::default()
        },
    );
}

/// Decode a base64 photo, tolerating a `data:image/...;base64,` prefix.
fn decode_photo(data: &str) -> Result<image::RgbImage, String> {
    let payload = match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data,
    };
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| e.to_string())?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    Ok(decoded.to_rgb8())
}

fn draw_table(
    layer: &PdfLayerReference,
    block: &TableBlock,
    geometry: &PageGeometry,
    theme: &Theme,
    fonts: &Fonts,
) {
    let p = block.placement;
    let x = geometry.side_margin;
    let width = geometry.content_width();
    let value_x = x + width / 2.0;
    let text_baseline = |row_top: f32| row_top + TABLE_ROW_HEIGHT - 2.5;

    draw::set_fill(layer, theme.primary);
    draw::rect(
        layer,
        x,
        p.y,
        width,
        TABLE_ROW_HEIGHT,
        geometry.page_height,
        RectStyle::Fill,
    );
    draw::set_fill(layer, theme.on_primary);
    put_text(
        layer,
        &fonts.bold,
        &block.header[0],
        theme.body_font_size,
        x + 2.0,
        text_baseline(p.y),
        geometry.page_height,
    );
    put_text(
        layer,
        &fonts.bold,
        &block.header[1],
        theme.body_font_size,
        value_x + 2.0,
        text_baseline(p.y),
        geometry.page_height,
    );

    for (i, row) in block.rows.iter().enumerate() {
        let row_top = p.y + (i as f32 + 1.0) * TABLE_ROW_HEIGHT;
        if i % 2 == 1 {
            draw::set_fill(layer, theme.row_stripe);
            draw::rect(
                layer,
                x,
                row_top,
                width,
                TABLE_ROW_HEIGHT,
                geometry.page_height,
                RectStyle::Fill,
            );
        }
        draw::set_fill(layer, theme.text);
        put_text(
            layer,
            &fonts.regular,
            &row[0],
            theme.body_font_size,
            x + 2.0,
            text_baseline(row_top),
            geometry.page_height,
        );
        if block.right_align_values {
            put_text_right(
                layer,
                &fonts.regular,
                &row[1],
                theme.body_font_size,
                x + width - 2.0,
                text_baseline(row_top),
                geometry.page_height,
            );
        } else {
            put_text(
                layer,
                &fonts.regular,
                &row[1],
                theme.body_font_size,
                value_x + 2.0,
                text_baseline(row_top),
                geometry.page_height,
            );
        }
    }

    draw::set_stroke(layer, theme.border, 0.3);
    draw::rect(
        layer,
        x,
        p.y,
        width,
        p.height,
        geometry.page_height,
        RectStyle::Stroke,
    );
}

fn draw_chart(
    layer: &PdfLayerReference,
    block: &ChartBlock,
    geometry: &PageGeometry,
    theme: &Theme,
    fonts: &Fonts,
) {
    let cg: ChartGeometry = chart::chart_geometry(
        block.expected_cost,
        block.actual_cost,
        geometry.page_width,
        block.placement.y,
    );
    let ph = geometry.page_height;

    draw::set_fill(layer, theme.primary);
    put_text_centered(
        layer,
        &fonts.bold,
        "Budget Comparison",
        theme.heading_font_size,
        geometry.page_width / 2.0,
        cg.title_y + 8.0,
        ph,
    );

    let (fx, fy, fw, fh) = cg.frame;
    draw::set_stroke(layer, theme.border, 0.3);
    draw::rounded_rect(layer, fx, fy, fw, fh, 3.0, ph, RectStyle::Stroke);

    let (axis_x, plot_top, plot_bottom) = cg.axis;
    draw::set_stroke(layer, theme.axis, 0.3);
    for gridline in &cg.gridlines {
        draw::line(layer, axis_x, gridline.y, axis_x + chart::CHART_WIDTH, gridline.y, ph);
        draw::set_fill(layer, theme.muted);
        put_text_right(
            layer,
            &fonts.regular,
            &gridline.label,
            theme.small_font_size,
            axis_x - 2.0,
            gridline.y + 1.5,
            ph,
        );
    }

    for (bar, color) in cg.bars.iter().zip([theme.bar_expected, theme.bar_actual]) {
        if bar.height > 0.0 {
            draw::set_fill(layer, color);
            draw::rounded_rect(
                layer,
                bar.x,
                bar.top_y,
                bar.width,
                bar.height,
                CORNER_RADIUS.min(bar.height / 2.0),
                ph,
                RectStyle::Fill,
            );
        }
        let bar_center = bar.x + bar.width / 2.0;
        draw::set_fill(layer, theme.text);
        put_text_centered(
            layer,
            &fonts.regular,
            &bar.value_label,
            theme.small_font_size,
            bar_center,
            bar.top_y - 2.0,
            ph,
        );
        put_text_centered(
            layer,
            &fonts.regular,
            bar.category,
            theme.body_font_size,
            bar_center,
            cg.category_label_y,
            ph,
        );
    }

    draw::set_stroke(layer, theme.axis, 0.5);
    draw::line(layer, axis_x, plot_top, axis_x, plot_bottom, ph);
    let (bx1, bx2, by) = cg.baseline;
    draw::line(layer, bx1, by, bx2, by, ph);
}

fn draw_notes(
    layer: &PdfLayerReference,
    block: &NotesBlock,
    geometry: &PageGeometry,
    theme: &Theme,
    fonts: &Fonts,
) {
    let p = block.placement;
    let ph = geometry.page_height;

    draw::set_fill(layer, theme.primary);
    put_text(
        layer,
        &fonts.bold,
        "Notes:",
        theme.heading_font_size,
        geometry.side_margin,
        p.y + 5.0,
        ph,
    );

    draw::set_stroke(layer, theme.border, 0.3);
    draw::rounded_rect(
        layer,
        geometry.side_margin,
        p.y + 10.0,
        geometry.content_width(),
        NOTES_PANEL_HEIGHT,
        CORNER_RADIUS,
        ph,
        RectStyle::Stroke,
    );

    let text_width = geometry.content_width() - 10.0;
    let max_lines = ((NOTES_PANEL_HEIGHT - 10.0) / NOTES_LINE_HEIGHT) as usize;
    draw::set_fill(layer, theme.text);
    for (i, line) in text::wrap(&block.text, text_width, theme.body_font_size)
        .into_iter()
        .take(max_lines)
        .enumerate()
    {
        put_text(
            layer,
            &fonts.regular,
            &line,
            theme.body_font_size,
            geometry.side_margin + 5.0,
            p.y + 17.0 + i as f32 * NOTES_LINE_HEIGHT,
            ph,
        );
    }
}

fn draw_footer(
    layer: &PdfLayerReference,
    page_index: usize,
    page_count: usize,
    generated_on: &str,
    geometry: &PageGeometry,
    theme: &Theme,
    fonts: &Fonts,
) {
    let ph = geometry.page_height;
    draw::set_stroke(layer, theme.border, 0.3);
    draw::line(
        layer,
        geometry.side_margin,
        theme.footer_rule_y,
        geometry.page_width - geometry.side_margin,
        theme.footer_rule_y,
        ph,
    );

    draw::set_fill(layer, theme.muted);
    put_text(
        layer,
        &fonts.regular,
        &format!("Generated on {}", generated_on),
        theme.footer_font_size,
        geometry.side_margin,
        theme.footer_text_y,
        ph,
    );
    put_text_right(
        layer,
        &fonts.regular,
        &format!("Page {} of {}", page_index + 1, page_count),
        theme.footer_font_size,
        geometry.page_width - geometry.side_margin,
        theme.footer_text_y,
        ph,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalize;
    use crate::record::DroneRecord;
    use crate::report::layout::layout;

    fn render_record(record: &DroneRecord) -> Vec<u8> {
        let geometry = PageGeometry::default();
        let plan = layout(&normalize(record), &geometry).unwrap();
        render(&plan, &geometry, &Theme::default()).unwrap()
    }

    #[test]
    fn test_emits_pdf_header() {
        let bytes = render_record(&DroneRecord::default());
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_bad_image_data_does_not_abort() {
        let record = DroneRecord {
            image_base64: Some("not valid base64 at all!!!".into()),
            ..Default::default()
        };
        let bytes = render_record(&record);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_data_url_prefix_is_stripped() {
        // 1x1 red PNG.
        let png = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";
        let rgb = decode_photo(&format!("data:image/png;base64,{}", png)).unwrap();
        assert_eq!((rgb.width(), rgb.height()), (1, 1));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_photo("@@@@").is_err());
        // Valid base64 that is not an image.
        assert!(decode_photo("aGVsbG8=").is_err());
    }

    #[test]
    fn test_multi_page_report_renders() {
        let record = DroneRecord {
            name: Some("Heron".into()),
            budget: Some(crate::record::BudgetRecord {
                notes: Some("Long-term airframe fatigue observations".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let bytes = render_record(&record);
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1_000);
    }
}
