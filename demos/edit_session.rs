//! 編輯草稿範例
//!
//! 模擬表格編輯：每次提交編輯後重算，最後產生存檔內容

use progress::model::{ProgressConfig, WorkItem, WorkPackageReport};
use progress::{EditCommand, ReportSession};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("===== Edit Session Example =====\n");

    let report = WorkPackageReport::new(
        vec![
            WorkItem::new("Galian Tanah".to_string(), "m3".to_string(), Decimal::from(85000), Decimal::from(400))
                .with_id("1".to_string()),
            WorkItem::new("Urugan Pasir".to_string(), "m3".to_string(), Decimal::from(210000), Decimal::from(120))
                .with_id("2".to_string()),
        ],
        1,
    );

    let mut session = ReportSession::open(report, ProgressConfig::default())?;
    let galian = session.keys()[0];
    let urugan = session.keys()[1];

    // 第 1 週回報
    session.apply_all([
        EditCommand::SetPlanned { key: galian, week: 1, planned: Decimal::from(150) },
        EditCommand::SetActual { key: galian, week: 1, actual: Decimal::from(120) },
        EditCommand::SetPlanned { key: urugan, week: 1, planned: Decimal::from(20) },
    ])?;
    print_summary("Week 1", &mut session);

    // 新增項目並進入第 2 週
    let add = EditCommand::add_item(WorkItem::new(
        "Lapis Pondasi".to_string(),
        "m3".to_string(),
        Decimal::from(450000),
        Decimal::from(80),
    ));
    let pondasi = add.target().unwrap_or_default();
    session.apply_all([
        add,
        EditCommand::SetWeekCount { week_count: 2 },
        EditCommand::SetActual { key: galian, week: 2, actual: Decimal::from(180) },
        EditCommand::SetActual { key: urugan, week: 2, actual: Decimal::from(35) },
        EditCommand::SetPlanned { key: pondasi, week: 2, planned: Decimal::from(10) },
    ])?;
    print_summary("Week 2", &mut session);

    // 存檔
    let payload = session.save_payload();
    println!("Save payload:\n{}", payload.to_json()?);
    session.assign_id(pondasi, "3".to_string())?;
    session.mark_saved();

    tracing::info!("unsaved changes: {}", session.has_unsaved_changes());

    Ok(())
}

fn print_summary(label: &str, session: &mut ReportSession) {
    let result = session.recompute();
    let totals = &result.totals;

    println!("[{}]", label);
    for item in &result.enriched_items {
        println!(
            "    {:<16} weight {:>6}  progress {:>6}",
            item.item.name,
            item.weight.to_string(),
            item.weighted_progress.to_string()
        );
    }
    println!(
        "    total {}  planned {}  deviation {}  this week {}\n",
        totals.weighted_progress,
        totals.planned_weighted_progress,
        totals.deviation,
        totals.actual_period.this_week
    );
}
