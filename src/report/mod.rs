//! # Report Pipeline
//!
//! One-directional, single-pass generation:
//!
//! ```text
//! DroneRecord --normalize--> ReportModel --layout--> LayoutPlan --render--> PDF bytes
//! ```
//!
//! Each invocation builds its own model, cursor, and block plan, so
//! concurrent generations need no coordination. No state survives a call.
//!
//! ```no_run
//! use skyreport::record::DroneRecord;
//! use skyreport::report::{generate, PageGeometry};
//!
//! let record: DroneRecord = serde_json::from_str(r#"{"name": "Falcon"}"#)?;
//! let report = generate(&record, &PageGeometry::default())?;
//! std::fs::write(&report.filename, &report.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chart;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod theme;

pub use geometry::PageGeometry;
pub use layout::{Block, LayoutPlan, Placement};
pub use theme::Theme;

use crate::error::ReportError;
use crate::model::normalize;
use crate::record::DroneRecord;
use crate::render;

/// A finished report: deterministic filename plus the document bytes.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Run the full pipeline for one record.
///
/// Fails only on degenerate geometry or a PDF backend error; incomplete
/// records and undecodable images degrade instead of failing.
pub fn generate(
    record: &DroneRecord,
    geometry: &PageGeometry,
) -> Result<GeneratedReport, ReportError> {
    let model = normalize(record);
    let plan = layout::layout(&model, geometry)?;
    let bytes = render::render(&plan, geometry, &Theme::default())?;
    Ok(GeneratedReport {
        filename: report_filename(record.name.as_deref()),
        page_count: plan.page_count,
        bytes,
    })
}

/// `Drone_Report_<name>.pdf`, with every whitespace run collapsed to one
/// underscore; `unnamed` when the record has no usable name.
pub fn report_filename(name: Option<&str>) -> String {
    let sanitized = match name {
        Some(n) if !n.trim().is_empty() => {
            let mut out = String::with_capacity(n.len());
            let mut in_whitespace = false;
            for c in n.chars() {
                if c.is_whitespace() {
                    if !in_whitespace {
                        out.push('_');
                        in_whitespace = true;
                    }
                } else {
                    out.push(c);
                    in_whitespace = false;
                }
            }
            out
        }
        _ => "unnamed".to_string(),
    };
    format!("Drone_Report_{}.pdf", sanitized)
}
