//! S 曲線（累計計劃 / 實際進度）

use chrono::NaiveDate;
use progress_core::{ProgressConfig, WorkItem};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accumulation::Measure;
use crate::aggregator::{difference, Aggregator};
use crate::bucketing::{WeekBucketing, WeekPeriod};
use crate::weight::WeightTable;

/// S 曲線上的一點
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    /// 週次
    pub week: u32,
    /// 截至本週的累計計劃加權進度
    pub planned_cumulative: Decimal,
    /// 截至本週的累計實際加權進度
    pub actual_cumulative: Decimal,
    /// 本週計劃增量
    pub planned_increment: Decimal,
    /// 本週實際增量
    pub actual_increment: Decimal,
    /// 偏差 = 實際 - 計劃
    pub deviation: Decimal,
    /// 本週日期區間（已知開工日時）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<WeekPeriod>,
}

/// S 曲線建構器
///
/// 每一點都以目前的權重與目標量重新計算（as-of-now），
/// 因此最後一點必定等於工程包合計。
pub struct CurveBuilder;

impl CurveBuilder {
    /// 建立第 1 週到第 `week_count` 週的累計序列
    pub fn build(
        items: &[WorkItem],
        weights: &WeightTable,
        week_count: u32,
        start_date: Option<NaiveDate>,
        config: &ProgressConfig,
    ) -> Vec<CurvePoint> {
        let mut points = Vec::with_capacity(week_count as usize);
        let mut previous_planned = Decimal::ZERO;
        let mut previous_actual = Decimal::ZERO;

        for week in 1..=week_count {
            let planned = Aggregator::weighted_total(items, weights, week, Measure::Planned);
            let actual = Aggregator::weighted_total(items, weights, week, Measure::Actual);

            points.push(CurvePoint {
                week,
                planned_cumulative: config.round(planned),
                actual_cumulative: config.round(actual),
                planned_increment: config.round(difference(planned, previous_planned)),
                actual_increment: config.round(difference(actual, previous_actual)),
                deviation: config.round(difference(actual, planned)),
                period: start_date.and_then(|start| WeekBucketing::period(start, week)),
            });

            previous_planned = planned;
            previous_actual = actual;
        }

        tracing::debug!("S 曲線點數: {}", points.len());

        points
    }
}
