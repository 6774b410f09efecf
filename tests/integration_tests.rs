//! Integration tests for the BOM pipeline.
//!
//! These tests drive the public operations end to end and validate the
//! structural correctness of the reports (group counts, totals, CSV shape)
//! rather than exact byte-for-byte rendering.

use cutplan::report::csv;
use cutplan::{
    get_cut_list, get_jamb_kit_list, get_pick_list, get_purchasing_summary,
    get_stock_optimization, CutListFilter, ProjectSnapshot, ResolutionError,
};

const EPS: f64 = 1e-9;

/// A realistic two-product snapshot: a sliding door with formula-cut rails,
/// range-quantity anchors, flagged hardware, and a fixed panel product.
fn project_snapshot() -> ProjectSnapshot {
    serde_json::from_str(
        r#"{
        "project_id": "P-1001",
        "products": [
            {
                "id": "SD-200",
                "name": "Sliding Door",
                "parts": [
                    {
                        "part_number": "EXT-100", "name": "Head Rail",
                        "part_type": "Extrusion", "unit": "Each",
                        "formula": "width - 4",
                        "quantity_mode": { "mode": "fixed", "quantity": 2.0 },
                        "is_milled": true
                    },
                    {
                        "part_number": "EXT-110", "name": "Side Stile",
                        "part_type": "Extrusion", "unit": "Each",
                        "formula": "- 10", "dimension": "height",
                        "quantity_mode": { "mode": "fixed", "quantity": 2.0 }
                    },
                    {
                        "part_number": "HW-300", "name": "Roller Assembly",
                        "part_type": "Hardware", "unit": "Each",
                        "quantity_mode": { "mode": "fixed", "quantity": 4.0 }
                    },
                    {
                        "part_number": "FAS-12", "name": "Jamb Anchor",
                        "part_type": "Fastener", "unit": "Each",
                        "quantity_mode": { "mode": "range", "min": 4.0, "max": 12.0, "default": 6.0 }
                    }
                ]
            },
            {
                "id": "FX-100",
                "name": "Fixed Panel",
                "parts": [
                    {
                        "part_number": "EXT-100", "name": "Head Rail",
                        "part_type": "Extrusion", "unit": "Each",
                        "formula": "width - 2",
                        "quantity_mode": { "mode": "fixed", "quantity": 2.0 }
                    }
                ]
            }
        ],
        "openings": [
            {
                "name": "Opening 101", "product_id": "SD-200",
                "width": 36.0, "height": 96.0, "quantity": 5,
                "range_selections": { "FAS-12": 6.0 }
            },
            {
                "name": "Opening 102", "product_id": "FX-100",
                "width": 48.0, "height": 96.0, "quantity": 2
            }
        ],
        "accessories": [
            {
                "opening": "Opening 101",
                "part_number": "EXT-900", "name": "Jamb Filler",
                "cut_length": 96.0, "quantity": 2
            }
        ],
        "catalog": {
            "EXT-100": { "stock_length": 144.0 },
            "EXT-110": { "stock_length": 288.0 },
            "EXT-900": { "stock_length": 144.0 },
            "HW-300": { "include_on_pick_list": true, "include_on_jamb_kit": true },
            "FAS-12": { "include_on_jamb_kit": true }
        }
    }"#,
    )
    .unwrap()
}

// ==================== End-to-end scenario ====================

#[test]
fn test_end_to_end_stock_optimization() {
    // One Extrusion part, formula "width - 4", 2 cuts/unit, stock 144;
    // width=36 quantity=5 -> 10 cuts of 32 -> FFD packs 3 pieces,
    // waste = 3*144 - 320 = 112 (~25.9%).
    let snapshot: ProjectSnapshot = serde_json::from_str(
        r#"{
        "project_id": "P-SPEC",
        "products": [{
            "id": "SD-200", "name": "Sliding Door",
            "parts": [{
                "part_number": "EXT-100", "name": "Head Rail",
                "part_type": "Extrusion", "unit": "Each",
                "formula": "width - 4",
                "quantity_mode": { "mode": "fixed", "quantity": 2.0 }
            }]
        }],
        "openings": [{
            "name": "Opening 101", "product_id": "SD-200",
            "width": 36.0, "height": 96.0, "quantity": 5
        }],
        "catalog": { "EXT-100": { "stock_length": 144.0 } }
    }"#,
    )
    .unwrap();

    let report = get_stock_optimization(&snapshot);
    assert!(report.errors.is_empty());
    assert_eq!(report.plans.len(), 1);

    let plan = &report.plans[0];
    assert_eq!(plan.part_number, "EXT-100");
    assert_eq!(plan.stock_pieces_needed, 3);
    assert!((plan.total_cut_length - 320.0).abs() < EPS);
    assert!((plan.waste_length - 112.0).abs() < EPS);
    assert!((plan.waste_percent - 112.0 / 432.0 * 100.0).abs() < EPS);

    // Every cut is packed exactly once.
    let packed: usize = plan.pieces.iter().map(|p| p.cuts.len()).sum();
    assert_eq!(packed, 10);
}

#[test]
fn test_full_project_optimization() {
    let report = get_stock_optimization(&project_snapshot());
    assert!(report.errors.is_empty());

    // EXT-100 (both products), EXT-110, EXT-900; HW/FAS have no cuts.
    let parts: Vec<&str> = report.plans.iter().map(|p| p.part_number.as_str()).collect();
    assert_eq!(parts, vec!["EXT-100", "EXT-110", "EXT-900"]);

    // EXT-100: 10 cuts of 32 plus 4 cuts of 46 from the fixed panels.
    let ext100 = &report.plans[0];
    assert!((ext100.total_cut_length - (10.0 * 32.0 + 4.0 * 46.0)).abs() < EPS);

    // EXT-110: height formula "- 10" -> 86, 10 cuts into 288 stock.
    let ext110 = &report.plans[1];
    assert!((ext110.total_cut_length - 860.0).abs() < EPS);
    for piece in &ext110.pieces {
        assert!(piece.cuts.iter().all(|&c| (c - 86.0).abs() < EPS));
        // 288 / 86 = 3 cuts per piece at most.
        assert!(piece.cuts.len() <= 3);
    }
    assert_eq!(ext110.stock_pieces_needed, 4); // ceil(10/3)
}

// ==================== Purchasing summary ====================

#[test]
fn test_purchasing_summary_totals() {
    let report = get_purchasing_summary(&project_snapshot());
    assert!(report.errors.is_empty());

    let total = |part: &str| {
        report
            .lines
            .iter()
            .find(|l| l.part_number == part)
            .map(|l| l.total_quantity)
            .unwrap_or_default()
    };

    assert!((total("EXT-100") - 14.0).abs() < EPS); // 2*5 + 2*2
    assert!((total("EXT-110") - 10.0).abs() < EPS);
    assert!((total("HW-300") - 20.0).abs() < EPS);
    assert!((total("FAS-12") - 30.0).abs() < EPS); // chosen 6 * 5 units
    assert!((total("EXT-900") - 2.0).abs() < EPS); // accessory pieces
}

// ==================== Cut list ====================

#[test]
fn test_cut_list_groups_and_misc() {
    let report = get_cut_list(&project_snapshot(), &CutListFilter::default());
    assert_eq!(report.groups.len(), 2);

    let sd = report
        .groups
        .iter()
        .find(|g| g.product_id == "SD-200")
        .unwrap();
    assert_eq!(sd.unit_count, 5);
    assert_eq!(sd.lines.len(), 4);
    // Extrusions sort ahead of hardware and fasteners.
    assert_eq!(sd.lines[0].part_type, cutplan::PartType::Extrusion);

    assert_eq!(report.misc.len(), 1);
    assert_eq!(report.misc[0].part_number, "EXT-900");
    assert_eq!(report.misc[0].openings, vec!["Opening 101"]);
}

#[test]
fn test_cut_list_product_filter_and_batch() {
    let snapshot = project_snapshot();
    let size_key = snapshot.openings[0].size_key();

    let filter = CutListFilter {
        product: Some("SD-200".to_string()),
        size_key: None,
        batch_size: Some(2),
    };
    let report = get_cut_list(&snapshot, &filter);

    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.size_key, size_key);
    assert_eq!(group.unit_count, 2);

    let rail = group
        .lines
        .iter()
        .find(|l| l.part_number == "EXT-100")
        .unwrap();
    assert!((rail.total_qty - 4.0).abs() < EPS); // 2/unit * batch of 2
}

// ==================== Pick list and jamb kits ====================

#[test]
fn test_pick_list_only_flagged_parts() {
    let report = get_pick_list(&project_snapshot());
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].product_id, "SD-200");
    assert_eq!(report.groups[0].lines.len(), 1);
    assert_eq!(report.groups[0].lines[0].part_number, "HW-300");
}

#[test]
fn test_jamb_kit_per_opening() {
    let report = get_jamb_kit_list(&project_snapshot());
    assert_eq!(report.groups.len(), 1); // FX-100 has no kit hardware
    let group = &report.groups[0];
    assert_eq!(group.opening, "Opening 101");
    let parts: Vec<&str> = group.lines.iter().map(|l| l.part_number.as_str()).collect();
    assert_eq!(parts, vec!["HW-300", "FAS-12"]);
}

// ==================== Error isolation ====================

#[test]
fn test_bad_formula_isolated_from_project() {
    let mut snapshot = project_snapshot();
    snapshot.products[0].parts[0].formula = Some("width - DROP TABLE".to_string());

    let summary = get_purchasing_summary(&snapshot);
    // One failure per SD-200 opening; the other parts still resolve.
    assert_eq!(summary.errors.len(), 1);
    assert!(matches!(
        summary.errors[0].error,
        ResolutionError::FormulaFailed(cutplan::FormulaError::InvalidCharacter { .. })
    ));
    assert!(summary.lines.iter().any(|l| l.part_number == "HW-300"));

    // The failed part keeps its fixed-panel contribution only.
    let rail = summary
        .lines
        .iter()
        .find(|l| l.part_number == "EXT-100")
        .unwrap();
    assert!((rail.total_quantity - 4.0).abs() < EPS);
}

#[test]
fn test_oversized_cut_rejected_not_dropped() {
    let mut snapshot = project_snapshot();
    // Shrink EXT-110 stock below the 86" cuts it must hold.
    snapshot
        .catalog
        .insert("EXT-110", cutplan::CatalogEntry {
            stock_length: Some(48.0),
            ..Default::default()
        });

    let report = get_stock_optimization(&snapshot);
    assert!(report.plans.iter().all(|p| p.part_number != "EXT-110"));
    let failure = report
        .errors
        .iter()
        .find(|f| matches!(f.error, ResolutionError::CutExceedsStock { .. }))
        .expect("oversized cut group should be reported");
    // Group-level failures carry a placeholder opening, never a blank.
    assert_eq!(failure.opening, "-");
    assert_eq!(failure.part_number, "EXT-110");
}

// ==================== CSV structure ====================

#[test]
fn test_summary_csv_structure() {
    let report = get_purchasing_summary(&project_snapshot());
    let rendered = csv::summary_csv(&report).unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Part Number,Description,Type,Unit,Total Qty");
    assert_eq!(lines.len(), 1 + report.lines.len());
    for (row, line) in lines[1..].iter().zip(&report.lines) {
        assert!(row.starts_with(&format!("{},", line.part_number)));
        assert_eq!(row.split(',').count(), 5);
    }
}

#[test]
fn test_cut_list_csv_structure() {
    let report = get_cut_list(&project_snapshot(), &CutListFilter::default());
    let rendered = csv::cut_list_csv(&report).unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    let data_rows: usize = report.groups.iter().map(|g| g.lines.len()).sum::<usize>()
        + report.misc.len();
    assert_eq!(lines.len(), 1 + data_rows);
    assert!(lines.iter().skip(1).any(|l| l.starts_with("MISC,")));
}

#[test]
fn test_stock_csv_structure() {
    let report = get_stock_optimization(&project_snapshot());
    let rendered = csv::stock_plans_csv(&report.plans).unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 1 + report.plans.len());
    assert!(lines[1].starts_with("EXT-100,144,"));
}

// ==================== Snapshot file round trip ====================

#[test]
fn test_snapshot_load_from_file() {
    let snapshot = project_snapshot();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

    let loaded = ProjectSnapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot);

    let report = get_purchasing_summary(&loaded);
    assert!(!report.lines.is_empty());
}

#[test]
fn test_snapshot_load_missing_file() {
    let err = ProjectSnapshot::load(std::path::Path::new("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, cutplan::BomError::FileNotFound { .. }));
}

// ==================== Determinism ====================

#[test]
fn test_reports_reproducible() {
    let snapshot = project_snapshot();
    assert_eq!(
        get_cut_list(&snapshot, &CutListFilter::default()),
        get_cut_list(&snapshot, &CutListFilter::default())
    );
    assert_eq!(
        get_stock_optimization(&snapshot),
        get_stock_optimization(&snapshot)
    );
}
