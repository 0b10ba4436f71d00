//! 工程包進度彙總

use progress_core::{ProgressConfig, WorkItem};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::accumulation::{checked_sum, Measure, WeeklyAccumulator};
use crate::resolver::{ProgressResolver, ResolvedProgress};
use crate::weight::WeightTable;

/// 期間拆分：截至上週 / 截至本週 / 本週增量
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBreakdown {
    /// 截至上週（第 1 週到第 weekCount-1 週）
    pub prior: Decimal,
    /// 截至本週（第 1 週到第 weekCount 週）
    pub current: Decimal,
    /// 本週增量 = 截至本週 - 截至上週
    pub this_week: Decimal,
}

impl PeriodBreakdown {
    /// 由全精度數值建立並四捨五入
    fn rounded(prior: Decimal, current: Decimal, config: &ProgressConfig) -> Self {
        Self {
            prior: config.round(prior),
            current: config.round(current),
            this_week: config.round(difference(current, prior)),
        }
    }
}

/// 附帶計算結果的工作項目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    #[serde(flatten)]
    pub item: WorkItem,

    /// 項目預算（單價 × 數量 × 加成）
    pub item_budget: Decimal,

    /// 權重（bobot）
    pub weight: Decimal,

    pub accumulated_planned: Decimal,
    pub accumulated_actual: Decimal,

    pub planned_percent: Decimal,
    pub percent_complete: Decimal,

    pub planned_weighted_progress: Decimal,
    pub weighted_progress: Decimal,

    /// 實際加權進度的期間拆分
    pub period: PeriodBreakdown,
}

/// 工程包合計
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTotals {
    /// 取整前總預算
    pub raw_budget: Decimal,
    /// 向下取整後總預算
    pub total_budget: Decimal,
    /// 權重總和（應約等於 100）
    pub weight: Decimal,
    /// 實際加權進度（工程包整體實體進度）
    pub weighted_progress: Decimal,
    /// 計劃加權進度
    pub planned_weighted_progress: Decimal,
    /// 偏差 = 實際 - 計劃（正值表示超前）
    pub deviation: Decimal,
    /// 實際累計量總和（各項單位不同，僅供參考）
    pub accumulated_actual: Decimal,
    /// 計劃累計量總和
    pub accumulated_planned: Decimal,
    /// 實際加權進度的期間拆分
    pub actual_period: PeriodBreakdown,
    /// 計劃加權進度的期間拆分
    pub planned_period: PeriodBreakdown,
}

/// 進度彙總器
pub struct Aggregator;

impl Aggregator {
    /// 單一項目在 `to_week` 的進度（全精度）
    pub fn resolve_item(
        item: &WorkItem,
        weight: Decimal,
        to_week: u32,
        measure: Measure,
    ) -> ResolvedProgress {
        let accumulated = WeeklyAccumulator::accumulate(item, to_week, measure);
        ProgressResolver::resolve(accumulated, item.target_volume, weight)
    }

    /// 所有項目在 `to_week` 的加權進度總和（全精度，溢位視為 0）
    pub fn weighted_total(
        items: &[WorkItem],
        weights: &WeightTable,
        to_week: u32,
        measure: Measure,
    ) -> Decimal {
        Self::checked_weighted_total(items, weights, to_week, measure).unwrap_or(Decimal::ZERO)
    }

    /// 加權進度總和，溢位時返回 `None`
    pub fn checked_weighted_total(
        items: &[WorkItem],
        weights: &WeightTable,
        to_week: u32,
        measure: Measure,
    ) -> Option<Decimal> {
        checked_sum(items.iter().enumerate().map(|(index, item)| {
            Self::resolve_item(item, weights.weight(index), to_week, measure).weighted_progress
        }))
    }

    /// 彙總所有項目，返回附帶結果的項目與工程包合計
    pub fn aggregate(
        items: &[WorkItem],
        weights: &WeightTable,
        week_count: u32,
        config: &ProgressConfig,
    ) -> (Vec<EnrichedItem>, ProgressTotals) {
        let prior_week = week_count.saturating_sub(1);

        let mut enriched_items = Vec::with_capacity(items.len());
        let mut actual_prior = Vec::with_capacity(items.len());
        let mut planned_prior = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let weight = weights.weight(index);

            let accumulated_actual = WeeklyAccumulator::accumulate(item, week_count, Measure::Actual);
            let accumulated_planned =
                WeeklyAccumulator::accumulate(item, week_count, Measure::Planned);

            let actual = ProgressResolver::resolve(accumulated_actual, item.target_volume, weight);
            let planned = ProgressResolver::resolve(accumulated_planned, item.target_volume, weight);

            let actual_before = Self::resolve_item(item, weight, prior_week, Measure::Actual);
            let planned_before = Self::resolve_item(item, weight, prior_week, Measure::Planned);
            actual_prior.push(actual_before.weighted_progress);
            planned_prior.push(planned_before.weighted_progress);

            enriched_items.push(EnrichedItem {
                item: item.clone(),
                item_budget: weights
                    .item_budgets
                    .get(index)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
                weight,
                accumulated_planned,
                accumulated_actual,
                planned_percent: config.round(planned.percent_complete),
                percent_complete: config.round(actual.percent_complete),
                planned_weighted_progress: config.round(planned.weighted_progress),
                weighted_progress: config.round(actual.weighted_progress),
                period: PeriodBreakdown::rounded(
                    actual_before.weighted_progress,
                    actual.weighted_progress,
                    config,
                ),
            });
        }

        // 合計與 S 曲線使用同一個總和，最後一點必定等於合計
        let actual_current = Self::weighted_total(items, weights, week_count, Measure::Actual);
        let planned_current = Self::weighted_total(items, weights, week_count, Measure::Planned);
        let actual_prior = checked_sum(actual_prior).unwrap_or(Decimal::ZERO);
        let planned_prior = checked_sum(planned_prior).unwrap_or(Decimal::ZERO);

        let totals = ProgressTotals {
            raw_budget: weights.raw_budget,
            total_budget: weights.total_budget,
            weight: weights.weight_sum(),
            weighted_progress: config.round(actual_current),
            planned_weighted_progress: config.round(planned_current),
            deviation: config.round(difference(actual_current, planned_current)),
            accumulated_actual: checked_sum(enriched_items.iter().map(|i| i.accumulated_actual))
                .unwrap_or(Decimal::ZERO),
            accumulated_planned: checked_sum(enriched_items.iter().map(|i| i.accumulated_planned))
                .unwrap_or(Decimal::ZERO),
            actual_period: PeriodBreakdown::rounded(actual_prior, actual_current, config),
            planned_period: PeriodBreakdown::rounded(planned_prior, planned_current, config),
        };

        (enriched_items, totals)
    }
}

/// 差值，溢位時為 0
pub(crate) fn difference(minuend: Decimal, subtrahend: Decimal) -> Decimal {
    minuend.checked_sub(subtrahend).unwrap_or(Decimal::ZERO)
}
