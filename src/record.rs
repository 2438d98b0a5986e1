//! Raw drone records as they arrive from the document store.
//!
//! Records are loosely typed at the boundary: every field may be absent or
//! null, and numeric fields occasionally arrive as strings (legacy writes).
//! Nothing here fails a report — [`crate::model::normalize`] turns any
//! `DroneRecord` into a fully-defaulted [`crate::model::ReportModel`].

use serde::{Deserialize, Serialize};

/// Lenient numeric field: accepts a JSON number, a numeric string, or
/// anything else (degrades to `None` instead of failing deserialization).
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// A drone document merged with its (optional) budget sub-record.
///
/// This is the single input boundary of the report engine. The surrounding
/// application fetches it from the document store; the engine performs no
/// I/O of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DroneRecord {
    pub name: Option<String>,
    pub category: Option<String>,
    pub model: Option<String>,
    /// Battery capacity in mAh.
    #[serde(deserialize_with = "lenient_number")]
    pub battery_capacity: Option<f64>,
    /// Nominal cell voltage, used only by the flight-time estimator.
    #[serde(deserialize_with = "lenient_number")]
    pub battery_voltage: Option<f64>,
    /// Airframe weight in grams.
    #[serde(deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
    /// Stored max flight time in minutes (operator-entered, not computed).
    #[serde(deserialize_with = "lenient_number")]
    pub max_flight_time: Option<f64>,
    pub status: Option<String>,
    pub last_maintenance: Option<String>,
    /// Base64-encoded photo (JPEG/PNG), without a data-URL prefix.
    pub image_base64: Option<String>,
    pub budget: Option<BudgetRecord>,
}

/// Budget figures embedded in (or merged into) a drone record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetRecord {
    #[serde(deserialize_with = "lenient_number")]
    pub expected_cost: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub actual_cost: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub maintenance_budget: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub modification_budget: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub estimated_hours: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub actual_hours: Option<f64>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let record: DroneRecord = serde_json::from_str("{}").unwrap();
        assert!(record.name.is_none());
        assert!(record.budget.is_none());
    }

    #[test]
    fn test_full_record() {
        let json = r#"{
            "name": "Falcon",
            "category": "Race drone",
            "batteryCapacity": 5000,
            "weight": 1200,
            "maxFlightTime": 25,
            "budget": {"expectedCost": 500, "actualCost": 750, "notes": "ok"}
        }"#;
        let record: DroneRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name.as_deref(), Some("Falcon"));
        assert_eq!(record.battery_capacity, Some(5000.0));
        let budget = record.budget.unwrap();
        assert_eq!(budget.expected_cost, Some(500.0));
        assert_eq!(budget.notes.as_deref(), Some("ok"));
    }

    #[test]
    fn test_null_fields() {
        let json = r#"{"name": null, "batteryCapacity": null, "budget": null}"#;
        let record: DroneRecord = serde_json::from_str(json).unwrap();
        assert!(record.name.is_none());
        assert!(record.battery_capacity.is_none());
        assert!(record.budget.is_none());
    }

    #[test]
    fn test_numeric_string_degrades_to_value() {
        let json = r#"{"weight": "1200", "batteryCapacity": " 5000 "}"#;
        let record: DroneRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.weight, Some(1200.0));
        assert_eq!(record.battery_capacity, Some(5000.0));
    }

    #[test]
    fn test_malformed_number_degrades_to_none() {
        let json = r#"{"weight": "heavy", "batteryCapacity": {"unit": "mAh"}}"#;
        let record: DroneRecord = serde_json::from_str(json).unwrap();
        assert!(record.weight.is_none());
        assert!(record.battery_capacity.is_none());
    }
}
