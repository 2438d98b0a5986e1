//! Report visual theme.
//!
//! Every color, font size, and footer coordinate the renderer uses lives in
//! this one immutable struct, passed explicitly into the renderer. Drawing
//! code never declares its own color constants.

/// An RGB color in 0..=255 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Immutable style configuration for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Title band and table header fill (indigo).
    pub primary: Rgb,
    /// Text on primary-filled surfaces.
    pub on_primary: Rgb,
    /// Body text.
    pub text: Rgb,
    /// Muted text (footer).
    pub muted: Rgb,
    /// Alternating table row fill.
    pub row_stripe: Rgb,
    /// Panel and image borders.
    pub border: Rgb,
    /// Chart axis and baseline.
    pub axis: Rgb,
    /// Expected-cost bar (green).
    pub bar_expected: Rgb,
    /// Actual-cost bar (blue).
    pub bar_actual: Rgb,

    pub title_font_size: f32,
    pub heading_font_size: f32,
    pub body_font_size: f32,
    pub small_font_size: f32,
    pub footer_font_size: f32,

    /// Footer rule and text baselines, measured from the top of the page.
    pub footer_rule_y: f32,
    pub footer_text_y: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Rgb::new(63, 81, 181),
            on_primary: Rgb::new(255, 255, 255),
            text: Rgb::new(0, 0, 0),
            muted: Rgb::new(150, 150, 150),
            row_stripe: Rgb::new(245, 245, 245),
            border: Rgb::new(200, 200, 200),
            axis: Rgb::new(100, 100, 100),
            bar_expected: Rgb::new(76, 175, 80),
            bar_actual: Rgb::new(33, 150, 243),
            title_font_size: 20.0,
            heading_font_size: 14.0,
            body_font_size: 10.0,
            small_font_size: 9.0,
            footer_font_size: 8.0,
            footer_rule_y: 285.0,
            footer_text_y: 290.0,
        }
    }
}
