//! 集成測試

use chrono::NaiveDate;
use progress::calc::{ProgressCalculator, WarningSeverity};
use progress::model::*;
use progress::{EditCommand, ReportSession};
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn test_scenario_single_item_complete() {
    // 場景 A：單一項目，兩週各完成 5
    let report = WorkPackageReport::new(
        vec![WorkItem::new(
            "Galian tanah".to_string(),
            "m3".to_string(),
            Decimal::from(100000),
            Decimal::from(10),
        )
        .with_week(1, Decimal::ZERO, Some(Decimal::from(5)))
        .with_week(2, Decimal::ZERO, Some(Decimal::from(5)))],
        2,
    );

    let result = ProgressCalculator::default().calculate(&report);
    let item = &result.enriched_items[0];

    assert_eq!(item.item_budget, Decimal::from(1110000));
    assert_eq!(result.totals.total_budget, Decimal::from(1110000));
    assert_eq!(item.weight, dec("100.00"));
    assert_eq!(item.accumulated_actual, Decimal::from(10));
    assert_eq!(item.percent_complete, dec("100.00"));
    assert_eq!(item.weighted_progress, dec("100.00"));
    assert_eq!(result.totals.weighted_progress, dec("100.00"));
}

#[test]
fn test_scenario_two_items_weights() {
    // 場景 B：預算 300000 與 700000
    let config = ProgressConfig::new().with_markup(Decimal::ONE);
    let report = WorkPackageReport::new(
        vec![
            WorkItem::new("Pekerjaan A".to_string(), "ls".to_string(), Decimal::from(300000), Decimal::ONE),
            WorkItem::new("Pekerjaan B".to_string(), "ls".to_string(), Decimal::from(700000), Decimal::ONE),
        ],
        1,
    );

    let result = ProgressCalculator::new(config).calculate(&report);

    assert_eq!(result.totals.total_budget, Decimal::from(1000000));
    assert_eq!(result.enriched_items[0].weight, dec("30.00"));
    assert_eq!(result.enriched_items[1].weight, dec("70.00"));
    assert_eq!(result.totals.weight, dec("100.00"));
}

#[test]
fn test_scenario_zero_target_volume() {
    // 場景 C：目標量為 0
    let report = WorkPackageReport::new(
        vec![
            WorkItem::new("Mobilisasi".to_string(), "ls".to_string(), Decimal::from(100000), Decimal::ZERO)
                .with_week(1, Decimal::ONE, Some(Decimal::from(3))),
            WorkItem::new("Galian".to_string(), "m3".to_string(), Decimal::from(100000), Decimal::from(10)),
        ],
        1,
    );

    let result = ProgressCalculator::default().calculate(&report);

    assert_eq!(result.enriched_items[0].percent_complete, Decimal::ZERO);
    assert_eq!(result.enriched_items[0].weighted_progress, Decimal::ZERO);
}

#[test]
fn test_scenario_actual_only_in_last_week() {
    // 場景 D：只有第 3 週有實際量
    let report = WorkPackageReport::new(
        vec![WorkItem::new("Aspal".to_string(), "ton".to_string(), Decimal::from(250000), Decimal::from(4))
            .with_week(3, Decimal::ZERO, Some(Decimal::from(4)))],
        3,
    );

    let result = ProgressCalculator::default().calculate(&report);

    assert_eq!(result.enriched_items[0].weight, dec("100.00"));
    assert_eq!(result.curve_series[0].actual_cumulative, Decimal::ZERO);
    assert_eq!(result.curve_series[1].actual_cumulative, Decimal::ZERO);
    assert_eq!(result.curve_series[2].actual_cumulative, dec("100.00"));
    assert_eq!(result.curve_series[2].actual_cumulative, result.totals.weighted_progress);
}

#[test]
fn test_over_delivery_not_clamped() {
    let report = WorkPackageReport::new(
        vec![
            WorkItem::new("Galian".to_string(), "m3".to_string(), Decimal::from(100000), Decimal::from(10))
                .with_week(1, Decimal::from(10), Some(Decimal::from(13))),
            WorkItem::new("Beton".to_string(), "m3".to_string(), Decimal::from(100000), Decimal::from(10)),
        ],
        1,
    );

    let result = ProgressCalculator::default().calculate(&report);

    assert_eq!(result.enriched_items[0].percent_complete, dec("130.00"));
    assert_eq!(result.enriched_items[0].weighted_progress, dec("65.00"));
    assert_eq!(result.totals.deviation, dec("15.00"));
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(8)]
fn test_curve_matches_totals(#[case] week_count: u32) {
    let items = (1..=5)
        .map(|n| {
            let mut item = WorkItem::new(
                format!("Item {}", n),
                "m2".to_string(),
                Decimal::from(12345 * n),
                Decimal::from(7 * n),
            );
            for week in 1..=8 {
                item = item.with_week(
                    week,
                    Decimal::new(i64::from(n * week) * 3, 1),
                    Some(Decimal::new(i64::from(n + week) * 2, 1)),
                );
            }
            item
        })
        .collect();
    let report = WorkPackageReport::new(items, week_count);

    let result = ProgressCalculator::default().calculate(&report);
    let last = result.last_curve_point().unwrap();

    assert_eq!(result.curve_series.len(), week_count as usize);
    assert_eq!(last.actual_cumulative, result.totals.weighted_progress);
    assert_eq!(last.planned_cumulative, result.totals.planned_weighted_progress);
}

#[test]
fn test_json_contract() {
    let json = r#"{
        "items": [
            {"id": 11, "name": "Galian", "unit": "m3", "unitPrice": "100000", "targetVolume": 10,
             "weight": 100, "weeklyData": {"1": {"planned": 5, "actual": 4}, "2": {"planned": 5, "actual": null}}},
            {"name": "Rusak", "unit": "m3", "unitPrice": "abc", "targetVolume": null}
        ],
        "weekCount": 2,
        "packageMetadata": {"startDate": "2025-03-03", "namaPaket": "Jalan Desa"}
    }"#;

    let report = WorkPackageReport::from_json_str(json).unwrap();
    let result = ProgressCalculator::default().calculate(&report);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(result.enriched_items[1].weight, Decimal::ZERO);
    assert_eq!(result.totals.weighted_progress, dec("40.00"));
    assert_eq!(result.totals.actual_period.this_week, Decimal::ZERO);
    assert_eq!(value["packageMetadata"]["namaPaket"], "Jalan Desa");
    assert_eq!(value["enrichedItems"][0]["id"], "11");
    assert_eq!(value["curveSeries"][1]["period"]["start"], "2025-03-10");
    assert!(!result.has_warnings_at(WarningSeverity::Warning));
}

#[test]
fn test_edit_session_end_to_end() {
    let report = WorkPackageReport::new(
        vec![
            WorkItem::new("Galian".to_string(), "m3".to_string(), Decimal::from(100000), Decimal::from(10))
                .with_id("1".to_string()),
        ],
        1,
    )
    .with_metadata(PackageMetadata::default().with_start_date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()));

    let mut session = ReportSession::open(report, ProgressConfig::default()).unwrap();
    let galian = session.keys()[0];
    let add = EditCommand::add_item(WorkItem::new(
        "Beton".to_string(),
        "m3".to_string(),
        Decimal::from(300000),
        Decimal::from(10),
    ));
    let beton = add.target().unwrap();

    session
        .apply_all([
            add,
            EditCommand::SetWeekCount { week_count: 2 },
            EditCommand::SetActual { key: galian, week: 1, actual: Decimal::from(10) },
            EditCommand::SetActual { key: beton, week: 2, actual: Decimal::from(5) },
        ])
        .unwrap();

    let result = session.recompute().clone();
    // Galian 25%，Beton 75%
    assert_eq!(result.enriched_items[0].weight, dec("25.00"));
    assert_eq!(result.totals.weighted_progress, dec("62.50"));
    assert_eq!(result.totals.actual_period.prior, dec("25.00"));
    assert_eq!(result.totals.actual_period.this_week, dec("37.50"));
    assert_eq!(result, ProgressCalculator::default().calculate(session.report()));

    let payload: serde_json::Value =
        serde_json::from_str(&session.save_payload().to_json().unwrap()).unwrap();
    assert_eq!(payload["items"].as_array().unwrap().len(), 2);
    assert_eq!(payload["weekCount"], 2);
}

#[test]
fn test_extreme_json_input_never_panics() {
    let json = r#"{
        "items": [
            {"id": 1, "name": "Galian", "unit": "m3", "unitPrice": 100000, "targetVolume": 10,
             "weeklyData": {"1": {"actual": "50000000000000000000000000000"},
                            "2": {"actual": "50000000000000000000000000000"}}},
            {"id": 2, "name": "Beton", "unit": "m3", "unitPrice": 100000, "targetVolume": 10,
             "weeklyData": {"2": {"planned": 10, "actual": 10}}}
        ],
        "weekCount": 4000000000,
        "packageMetadata": {"startDate": "2025-07-07T00:00:00Z", "nama": "X"}
    }"#;

    let report = WorkPackageReport::from_json_str(json).unwrap();
    let result = ProgressCalculator::default().calculate(&report);

    assert_eq!(result.week_count, 52);
    assert_eq!(result.curve_series.len(), 52);
    assert_eq!(result.totals.weighted_progress, dec("50.00"));
    assert!(result.has_warnings_at(WarningSeverity::Error));
    assert!(result.warnings.iter().any(|w| w.item_index == Some(0)));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["packageMetadata"]["startDate"], "2025-07-07T00:00:00Z");
    assert_eq!(value["packageMetadata"]["nama"], "X");
    assert_eq!(value["curveSeries"][0]["period"]["start"], "2025-07-07");
}
