//! # Layout Engine
//!
//! Turns a [`ReportModel`] into an ordered sequence of placed [`Block`]s.
//! Blocks go down the page in a fixed order — title, optional photo inset,
//! specification table, budget tables, comparison chart, notes — and a block
//! that would overflow the current page moves wholesale to the next one.
//! Blocks are never split.
//!
//! The [`PageCursor`] is transient layout state: it exists for the duration
//! of one `layout` call and is discarded. The renderer receives the
//! finalized [`LayoutPlan`], never the cursor.

use crate::error::ReportError;
use crate::model::ReportModel;
use crate::report::format::{format_currency, format_quantity};
use crate::report::geometry::PageGeometry;

// Block heights and inter-block gaps in mm (portrait A4 scale).
const TITLE_BAND_HEIGHT: f32 = 30.0;
const IMAGE_INSET_HEIGHT: f32 = 50.0;
const GAP_TITLE_TO_IMAGE: f32 = 5.0;
const GAP_TITLE_TO_TABLE: f32 = 10.0;
const TABLE_ROW_HEIGHT: f32 = 8.0;
const GAP_BEFORE_BUDGET_TABLE: f32 = 15.0;
const GAP_BEFORE_TIME_TABLE: f32 = 10.0;
const GAP_BEFORE_CHART: f32 = 25.0;
const CHART_BLOCK_HEIGHT: f32 = 150.0;
const GAP_BEFORE_NOTES: f32 = 20.0;
const NOTES_BLOCK_HEIGHT: f32 = 60.0;

/// Where a block landed: page index, y-offset from the page top, height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub y: f32,
    pub height: f32,
}

/// Filled band across the page top with the report title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    pub text: String,
    pub placement: Placement,
}

/// Bordered photo inset below the title band.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub data_base64: String,
    pub placement: Placement,
}

/// Striped two-column table with a colored header row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub header: [String; 2],
    pub rows: Vec<[String; 2]>,
    /// Right-align the value column (used for currency amounts).
    pub right_align_values: bool,
    pub placement: Placement,
}

/// Two-bar budget comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBlock {
    pub expected_cost: f64,
    pub actual_cost: f64,
    pub placement: Placement,
}

/// Bordered panel with word-wrapped note text.
#[derive(Debug, Clone, PartialEq)]
pub struct NotesBlock {
    pub text: String,
    pub placement: Placement,
}

/// A typed, positioned unit of report content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(TitleBlock),
    Image(ImageBlock),
    Table(TableBlock),
    Chart(ChartBlock),
    Notes(NotesBlock),
}

impl Block {
    pub fn placement(&self) -> Placement {
        match self {
            Block::Title(b) => b.placement,
            Block::Image(b) => b.placement,
            Block::Table(b) => b.placement,
            Block::Chart(b) => b.placement,
            Block::Notes(b) => b.placement,
        }
    }
}

/// The finalized block plan plus the total page count (known only after
/// every block is placed — the renderer's footer pass needs it up front).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub blocks: Vec<Block>,
    pub page_count: usize,
}

/// Transient placement state: current page index and y-offset.
struct PageCursor {
    page: usize,
    y: f32,
}

impl PageCursor {
    fn new() -> Self {
        Self { page: 0, y: 0.0 }
    }

    /// Advance past an inter-block gap without placing anything.
    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    /// Claim `height` mm, breaking to the next page first if the block
    /// would overflow the current one.
    fn place(&mut self, height: f32, geometry: &PageGeometry) -> Result<Placement, ReportError> {
        if self.y + height > geometry.page_height {
            self.page += 1;
            self.y = geometry.top_margin;
        }
        if self.y + height > geometry.page_height {
            // Still overflows on a fresh page: the block simply cannot fit.
            return Err(ReportError::Geometry(format!(
                "block of height {} mm cannot fit a {} mm page",
                height, geometry.page_height
            )));
        }
        let placement = Placement {
            page: self.page,
            y: self.y,
            height,
        };
        self.y += height;
        Ok(placement)
    }
}

/// Place all report blocks for `model` on pages of `geometry`.
///
/// Fails only on degenerate geometry; any valid [`ReportModel`] lays out.
pub fn layout(model: &ReportModel, geometry: &PageGeometry) -> Result<LayoutPlan, ReportError> {
    geometry.validate()?;

    let mut cursor = PageCursor::new();
    let mut blocks = Vec::new();

    let display_name = model.name.as_deref().unwrap_or("Unnamed");
    blocks.push(Block::Title(TitleBlock {
        text: format!("Drone Report: {}", display_name),
        placement: cursor.place(TITLE_BAND_HEIGHT, geometry)?,
    }));

    if let Some(data) = &model.image_base64 {
        cursor.gap(GAP_TITLE_TO_IMAGE);
        blocks.push(Block::Image(ImageBlock {
            data_base64: data.clone(),
            placement: cursor.place(IMAGE_INSET_HEIGHT, geometry)?,
        }));
    } else {
        cursor.gap(GAP_TITLE_TO_TABLE);
    }

    blocks.push(Block::Table(spec_table(model, &mut cursor, geometry)?));

    cursor.gap(GAP_BEFORE_BUDGET_TABLE);
    blocks.push(Block::Table(budget_table(model, &mut cursor, geometry)?));

    cursor.gap(GAP_BEFORE_TIME_TABLE);
    blocks.push(Block::Table(time_table(model, &mut cursor, geometry)?));

    cursor.gap(GAP_BEFORE_CHART);
    blocks.push(Block::Chart(ChartBlock {
        expected_cost: model.budget.expected_cost,
        actual_cost: model.budget.actual_cost,
        placement: cursor.place(CHART_BLOCK_HEIGHT, geometry)?,
    }));

    if let Some(notes) = &model.budget.notes {
        cursor.gap(GAP_BEFORE_NOTES);
        blocks.push(Block::Notes(NotesBlock {
            text: notes.clone(),
            placement: cursor.place(NOTES_BLOCK_HEIGHT, geometry)?,
        }));
    }

    Ok(LayoutPlan {
        page_count: cursor.page + 1,
        blocks,
    })
}

fn table_height(row_count: usize) -> f32 {
    // Header row plus data rows.
    (row_count as f32 + 1.0) * TABLE_ROW_HEIGHT
}

fn or_na(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

fn spec_table(
    model: &ReportModel,
    cursor: &mut PageCursor,
    geometry: &PageGeometry,
) -> Result<TableBlock, ReportError> {
    let rows = vec![
        ["Category".to_string(), or_na(&model.category)],
        ["Model".to_string(), or_na(&model.model)],
        [
            "Battery".to_string(),
            format!("{} mAh", format_quantity(model.battery_capacity_mah)),
        ],
        [
            "Weight".to_string(),
            format!("{} g", format_quantity(model.weight_grams)),
        ],
        [
            "Max Flight Time".to_string(),
            format!("{} min", format_quantity(model.max_flight_time_minutes)),
        ],
        ["Status".to_string(), or_na(&model.status)],
        ["Last Maintenance".to_string(), or_na(&model.last_maintenance)],
    ];
    Ok(TableBlock {
        header: ["Specification".to_string(), "Value".to_string()],
        placement: cursor.place(table_height(rows.len()), geometry)?,
        rows,
        right_align_values: false,
    })
}

fn budget_table(
    model: &ReportModel,
    cursor: &mut PageCursor,
    geometry: &PageGeometry,
) -> Result<TableBlock, ReportError> {
    let budget = &model.budget;
    let rows = vec![
        ["Expected Budget".to_string(), format_currency(budget.expected_cost)],
        ["Actual Cost".to_string(), format_currency(budget.actual_cost)],
        ["Variance".to_string(), format_currency(budget.cost_variance())],
        [
            "Maintenance Budget".to_string(),
            format_currency(budget.maintenance_budget),
        ],
        [
            "Modification Budget".to_string(),
            format_currency(budget.modification_budget),
        ],
    ];
    Ok(TableBlock {
        header: ["Budget Type".to_string(), "Amount".to_string()],
        placement: cursor.place(table_height(rows.len()), geometry)?,
        rows,
        right_align_values: true,
    })
}

fn time_table(
    model: &ReportModel,
    cursor: &mut PageCursor,
    geometry: &PageGeometry,
) -> Result<TableBlock, ReportError> {
    let budget = &model.budget;
    let rows = vec![
        ["Estimated Hours".to_string(), format_quantity(budget.estimated_hours)],
        ["Actual Hours".to_string(), format_quantity(budget.actual_hours)],
        ["Variance".to_string(), format_quantity(budget.hours_variance())],
    ];
    Ok(TableBlock {
        header: ["Time Tracking".to_string(), "Hours".to_string()],
        placement: cursor.place(table_height(rows.len()), geometry)?,
        rows,
        right_align_values: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{normalize, BudgetFigures};
    use crate::record::DroneRecord;
    use pretty_assertions::assert_eq;

    fn model_with(budget: BudgetFigures) -> ReportModel {
        ReportModel {
            budget,
            ..normalize(&DroneRecord::default())
        }
    }

    fn heights_fit(plan: &LayoutPlan, geometry: &PageGeometry) -> bool {
        plan.blocks
            .iter()
            .map(Block::placement)
            .all(|p| p.y + p.height <= geometry.page_height)
    }

    #[test]
    fn test_block_order_without_image_or_notes() {
        let model = model_with(BudgetFigures::default());
        let plan = layout(&model, &PageGeometry::default()).unwrap();
        let kinds: Vec<&str> = plan
            .blocks
            .iter()
            .map(|b| match b {
                Block::Title(_) => "title",
                Block::Image(_) => "image",
                Block::Table(_) => "table",
                Block::Chart(_) => "chart",
                Block::Notes(_) => "notes",
            })
            .collect();
        assert_eq!(kinds, ["title", "table", "table", "table", "chart"]);
    }

    #[test]
    fn test_title_sits_at_page_top() {
        let model = model_with(BudgetFigures::default());
        let plan = layout(&model, &PageGeometry::default()).unwrap();
        let placement = plan.blocks[0].placement();
        assert_eq!(placement.page, 0);
        assert_eq!(placement.y, 0.0);
        assert_eq!(placement.height, 30.0);
    }

    #[test]
    fn test_image_shifts_spec_table_down() {
        let mut record = DroneRecord::default();
        record.image_base64 = Some("aGVsbG8=".into());
        let with_image = layout(&normalize(&record), &PageGeometry::default()).unwrap();
        let without_image =
            layout(&normalize(&DroneRecord::default()), &PageGeometry::default()).unwrap();

        let spec_y = |plan: &LayoutPlan| {
            plan.blocks
                .iter()
                .find_map(|b| match b {
                    Block::Table(t) => Some(t.placement.y),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(spec_y(&without_image), 40.0);
        assert_eq!(spec_y(&with_image), 85.0);
    }

    #[test]
    fn test_scenario_a_spec_only_drone() {
        let record = DroneRecord {
            name: Some("Falcon".into()),
            battery_capacity: Some(5000.0),
            weight: Some(1200.0),
            ..Default::default()
        };
        let plan = layout(&normalize(&record), &PageGeometry::default()).unwrap();

        assert!(!plan.blocks.iter().any(|b| matches!(b, Block::Notes(_))));

        // Budget content alone never triggers a page break: every table
        // stays on the first page (only the tall chart block moves on).
        assert!(plan
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .all(|b| b.placement().page == 0));

        let spec = plan
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) if t.header[0] == "Specification" => Some(t),
                _ => None,
            })
            .unwrap();
        assert!(spec.rows.iter().any(|r| r[1] == "5000 mAh"));
        assert!(spec.rows.iter().any(|r| r[1] == "1200 g"));

        let budget = plan
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) if t.header[0] == "Budget Type" => Some(t),
                _ => None,
            })
            .unwrap();
        assert!(budget.rows.iter().all(|r| r[1] == "$0.00"));
    }

    #[test]
    fn test_scenario_b_notes_and_chart() {
        let model = model_with(BudgetFigures {
            expected_cost: 500.0,
            actual_cost: 750.0,
            notes: Some("Needs prop replacement".into()),
            ..Default::default()
        });
        let plan = layout(&model, &PageGeometry::default()).unwrap();

        let notes = plan
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Notes(n) => Some(n),
                _ => None,
            })
            .expect("notes block should be placed");
        assert_eq!(notes.text, "Needs prop replacement");

        let chart = plan
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Chart(c) => Some(c),
                _ => None,
            })
            .unwrap();
        assert_eq!(chart.expected_cost, 500.0);
        assert_eq!(chart.actual_cost, 750.0);
    }

    #[test]
    fn test_single_page_when_everything_fits() {
        // A taller page swallows the whole report, chart and notes included.
        let model = model_with(BudgetFigures {
            expected_cost: 500.0,
            actual_cost: 750.0,
            notes: Some("Needs prop replacement".into()),
            ..Default::default()
        });
        let geometry = PageGeometry {
            page_height: 500.0,
            ..Default::default()
        };
        let plan = layout(&model, &geometry).unwrap();
        assert_eq!(plan.page_count, 1);
        assert!(plan.blocks.iter().all(|b| b.placement().page == 0));
    }

    #[test]
    fn test_scenario_c_overflow_pushes_whole_blocks() {
        // Image + notes on a default page: title(30) + image(85) + tables
        // put the chart past y=254, so chart (150) and notes (60) both
        // break to page 1.
        let record = DroneRecord {
            name: Some("Heron".into()),
            image_base64: Some("aGVsbG8=".into()),
            budget: Some(crate::record::BudgetRecord {
                expected_cost: Some(100.0),
                notes: Some("Long-term airframe fatigue observations".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let geometry = PageGeometry::default();
        let plan = layout(&normalize(&record), &geometry).unwrap();

        assert_eq!(plan.page_count, 2);
        assert!(heights_fit(&plan, &geometry));

        let chart_placement = plan
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Chart(c) => Some(c.placement),
                _ => None,
            })
            .unwrap();
        assert_eq!(chart_placement.page, 1);
        assert_eq!(chart_placement.y, geometry.top_margin);

        let notes_placement = plan
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Notes(n) => Some(n.placement),
                _ => None,
            })
            .unwrap();
        assert_eq!(notes_placement.page, 1);
    }

    #[test]
    fn test_no_block_exceeds_page_height() {
        for height in [200.0_f32, 250.0, 297.0, 400.0] {
            let geometry = PageGeometry {
                page_height: height,
                ..Default::default()
            };
            let model = model_with(BudgetFigures {
                notes: Some("x".into()),
                ..Default::default()
            });
            let plan = layout(&model, &geometry).unwrap();
            assert!(heights_fit(&plan, &geometry), "overflow at page height {height}");
        }
    }

    #[test]
    fn test_page_count_is_minimal() {
        // Cursor-level property: 5 blocks of 50mm on a 120mm page with a
        // 10mm continuation margin. Two fit per page, so three pages.
        let geometry = PageGeometry {
            page_width: 210.0,
            page_height: 120.0,
            top_margin: 10.0,
            side_margin: 20.0,
        };
        let mut cursor = PageCursor::new();
        let mut last_page = 0;
        for _ in 0..5 {
            last_page = cursor.place(50.0, &geometry).unwrap().page;
        }
        assert_eq!(last_page, 2);
    }

    #[test]
    fn test_degenerate_geometry_fails_before_placement() {
        let model = model_with(BudgetFigures::default());
        let geometry = PageGeometry {
            page_height: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            layout(&model, &geometry),
            Err(ReportError::Geometry(_))
        ));
    }

    #[test]
    fn test_block_taller_than_page_fails() {
        let model = model_with(BudgetFigures::default());
        // Valid but tiny page: the chart block (150mm) can never fit.
        let geometry = PageGeometry {
            page_height: 100.0,
            top_margin: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            layout(&model, &geometry),
            Err(ReportError::Geometry(_))
        ));
    }

    #[test]
    fn test_unnamed_drone_title() {
        let plan = layout(
            &normalize(&DroneRecord::default()),
            &PageGeometry::default(),
        )
        .unwrap();
        match &plan.blocks[0] {
            Block::Title(t) => assert_eq!(t.text, "Drone Report: Unnamed"),
            other => panic!("expected title block, got {:?}", other),
        }
    }
}
