//! 週進度報表範例
//!
//! 由後端格式的 JSON 載入工程包，輸出各項目進度、合計與 S 曲線

use progress::calc::ProgressCalculator;
use progress::model::{ProgressConfig, WorkPackageReport};
use tracing_subscriber::EnvFilter;

const REPORT_JSON: &str = r#"{
    "items": [
        {"id": 1, "name": "Pekerjaan Persiapan", "unit": "ls", "unitPrice": 15000000, "targetVolume": 1,
         "weeklyData": {"1": {"planned": 0.5, "actual": 0.5}, "2": {"planned": 0.5, "actual": 0.5}}},
        {"id": 2, "name": "Galian Tanah", "unit": "m3", "unitPrice": 85000, "targetVolume": 420,
         "weeklyData": {"1": {"planned": 100, "actual": 80}, "2": {"planned": 150, "actual": 140},
                        "3": {"planned": 170, "actual": null}}},
        {"id": 3, "name": "Beton K-225", "unit": "m3", "unitPrice": 1250000, "targetVolume": 64,
         "weeklyData": {"2": {"planned": 10, "actual": 6}, "3": {"planned": 24, "actual": 20},
                        "4": {"planned": 30}}},
        {"id": 4, "name": "Pasangan Batu", "unit": "m3", "unitPrice": "950000", "targetVolume": "38,5",
         "weeklyData": {"3": {"planned": 18.5, "actual": 12}, "4": {"planned": 20}}}
    ],
    "weekCount": 3,
    "packageMetadata": {
        "startDate": "2025-07-07",
        "namaPaket": "Rehabilitasi Saluran Irigasi",
        "nomorKontrak": "027/KTR/PUPR/2025"
    }
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("===== Weekly Progress Report =====\n");

    // 步驟 1: 部署配置（覆寫部分預設值）
    let config = ProgressConfig::from_json_str(r#"{"markup": "1.11", "budgetRoundingUnit": 1000}"#)?;
    println!("[1] Markup {}, budget rounded down to {}\n", config.markup, config.budget_rounding_unit);

    // 步驟 2: 載入報表
    let report = WorkPackageReport::from_json_str(REPORT_JSON)?;
    println!("[2] {} items, week {}\n", report.items.len(), report.week_count);

    // 步驟 3: 計算
    let result = ProgressCalculator::new(config).calculate(&report);

    println!("[3] Items");
    println!(
        "    {:<22} {:>16} {:>8} {:>9} {:>9} {:>9}",
        "Name", "Budget", "Weight", "Complete", "Weighted", "ThisWeek"
    );
    for item in &result.enriched_items {
        println!(
            "    {:<22} {:>16} {:>8} {:>9} {:>9} {:>9}",
            item.item.name,
            item.item_budget.round_dp(2).to_string(),
            item.weight.to_string(),
            item.percent_complete.to_string(),
            item.weighted_progress.to_string(),
            item.period.this_week.to_string()
        );
    }

    let totals = &result.totals;
    println!("\n[4] Totals");
    println!("    Budget (rounded):       {}", totals.total_budget);
    println!("    Weight sum:             {}", totals.weight);
    println!("    Progress to last week:  {}", totals.actual_period.prior);
    println!("    Progress this week:     {}", totals.actual_period.this_week);
    println!("    Progress to this week:  {}", totals.weighted_progress);
    println!("    Planned:                {}", totals.planned_weighted_progress);
    println!("    Deviation:              {}", totals.deviation);

    println!("\n[5] S-Curve");
    for point in &result.curve_series {
        let dates = point
            .period
            .map(|p| format!("{} .. {}", p.start, p.end))
            .unwrap_or_default();
        println!(
            "    W{:<3} {:<26} planned {:>7}  actual {:>7}",
            point.week,
            dates,
            point.planned_cumulative.to_string(),
            point.actual_cumulative.to_string()
        );
    }

    if !result.warnings.is_empty() {
        println!("\n[6] Warnings");
        for warning in &result.warnings {
            println!("    {:?} {:?}: {}", warning.severity, warning.item_index, warning.message);
        }
    }

    println!("\n[7] JSON");
    println!("{}", serde_json::to_string_pretty(&result.totals)?);

    Ok(())
}
