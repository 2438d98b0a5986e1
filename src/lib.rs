//! # Skyreport - Drone Fleet Report Engine
//!
//! Skyreport turns raw drone fleet records into paginated PDF reports. It
//! provides:
//!
//! - **Normalization**: lenient record ingestion with typed defaults
//! - **Layout**: deterministic block placement with whole-block pagination
//! - **Rendering**: vector PDF output with tables, a bar chart, and photos
//! - **Delivery**: a CLI and an HTTP endpoint around the same pipeline
//!
//! ## Quick Start
//!
//! ```no_run
//! use skyreport::record::DroneRecord;
//! use skyreport::report::{generate, PageGeometry};
//!
//! let json = std::fs::read_to_string("falcon.json")?;
//! let record: DroneRecord = serde_json::from_str(&json)?;
//!
//! let report = generate(&record, &PageGeometry::default())?;
//! std::fs::write(&report.filename, &report.bytes)?;
//! println!("{} pages", report.page_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | Raw record deserialization |
//! | [`model`] | Normalized report model |
//! | [`report`] | Layout engine, chart geometry, formatting |
//! | [`render`] | PDF drawing backend |
//! | [`server`] | HTTP delivery |
//! | [`error`] | Error types |

pub mod error;
pub mod model;
pub mod record;
pub mod render;
pub mod report;
pub mod server;

pub use error::ReportError;
pub use report::{GeneratedReport, PageGeometry};
