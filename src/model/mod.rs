//! # Normalized Report Model
//!
//! [`normalize`] turns a loosely-typed [`DroneRecord`] into a [`ReportModel`]
//! with every numeric field present and finite. Downstream layout and
//! rendering never deal with absence: monetary and hour fields default to 0,
//! text fields stay `Option` so empty blocks can be omitted entirely.
//!
//! Normalization always succeeds. There is deliberately no error path here —
//! a malformed record produces a report full of zeros and `N/A`, not a
//! failure.

use crate::record::{BudgetRecord, DroneRecord};

/// Fully-defaulted view of a drone + budget record, ready for layout.
///
/// Immutable once built; one instance per report generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportModel {
    pub name: Option<String>,
    pub category: Option<String>,
    pub model: Option<String>,
    pub battery_capacity_mah: f64,
    pub weight_grams: f64,
    pub max_flight_time_minutes: f64,
    pub status: Option<String>,
    pub last_maintenance: Option<String>,
    pub image_base64: Option<String>,
    pub budget: BudgetFigures,
}

/// Budget figures with all amounts present (0.0 when the record had none).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetFigures {
    pub expected_cost: f64,
    pub actual_cost: f64,
    pub maintenance_budget: f64,
    pub modification_budget: f64,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    /// `None` means "no notes block in the report" — distinct from an
    /// empty panel. Absent and empty-string notes both normalize to `None`.
    pub notes: Option<String>,
}

impl BudgetFigures {
    /// Expected minus actual cost. Negative when over budget.
    pub fn cost_variance(&self) -> f64 {
        self.expected_cost - self.actual_cost
    }

    /// Estimated minus actual hours. Negative when over the estimate.
    pub fn hours_variance(&self) -> f64 {
        self.estimated_hours - self.actual_hours
    }
}

/// Clamp an optional numeric field to a finite, non-absent value.
fn defaulted(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Drop absent and blank strings so layout can skip the block entirely.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Build a [`ReportModel`] from a raw record. Never fails.
pub fn normalize(record: &DroneRecord) -> ReportModel {
    let budget = record.budget.clone().unwrap_or_default();
    ReportModel {
        name: non_blank(record.name.clone()),
        category: non_blank(record.category.clone()),
        model: non_blank(record.model.clone()),
        battery_capacity_mah: defaulted(record.battery_capacity),
        weight_grams: defaulted(record.weight),
        max_flight_time_minutes: defaulted(record.max_flight_time),
        status: non_blank(record.status.clone()),
        last_maintenance: non_blank(record.last_maintenance.clone()),
        image_base64: non_blank(record.image_base64.clone()),
        budget: normalize_budget(&budget),
    }
}

fn normalize_budget(budget: &BudgetRecord) -> BudgetFigures {
    BudgetFigures {
        expected_cost: defaulted(budget.expected_cost),
        actual_cost: defaulted(budget.actual_cost),
        maintenance_budget: defaulted(budget.maintenance_budget),
        modification_budget: defaulted(budget.modification_budget),
        estimated_hours: defaulted(budget.estimated_hours),
        actual_hours: defaulted(budget.actual_hours),
        notes: non_blank(budget.notes.clone()),
    }
}

/// Physics-based flight time estimate in minutes.
///
/// This is the dashboard's estimate formula: battery energy at nominal cell
/// voltage, a hover power model of 100 W/kg + 50 W, 85% drivetrain
/// efficiency, floored at one minute. It can (and often does) disagree with
/// the operator-entered `max_flight_time_minutes` stored on the record — the
/// report displays the stored value and leaves this helper to callers that
/// want the estimate.
pub fn estimate_flight_time_minutes(
    battery_capacity_mah: f64,
    weight_grams: f64,
    battery_voltage: Option<f64>,
) -> f64 {
    if battery_capacity_mah <= 0.0 || weight_grams <= 0.0 {
        return 0.0;
    }
    let voltage = battery_voltage.filter(|v| *v > 0.0).unwrap_or(3.7);
    let energy_wh = battery_capacity_mah / 1000.0 * voltage;
    let weight_kg = weight_grams / 1000.0;
    let power_w = 100.0 * weight_kg + 50.0;
    let efficiency = 0.85;
    let hours = energy_wh * efficiency / power_w;
    (hours * 60.0).round().max(1.0)
}
