//! 進度主計算器

use progress_core::{ProgressConfig, WorkItem, WorkPackageReport};
use rust_decimal::Decimal;

use crate::accumulation::{Measure, WeeklyAccumulator};
use crate::aggregator::Aggregator;
use crate::curve::CurveBuilder;
use crate::weight::{WeightCalculator, WeightTable};
use crate::{ProgressResult, ProgressWarning, WarningSeverity};

/// 進度計算器
///
/// 純函數：相同的 `(items, weekCount)` 永遠得到相同結果，不保存任何狀態。
#[derive(Debug, Clone, Default)]
pub struct ProgressCalculator {
    config: ProgressConfig,
}

impl ProgressCalculator {
    /// 創建新的進度計算器
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    /// 主計算入口（重新計算權重）
    pub fn calculate(&self, report: &WorkPackageReport) -> ProgressResult {
        let weights = self.weights(&report.items);
        self.calculate_with_weights(report, &weights)
    }

    /// 計算權重表
    pub fn weights(&self, items: &[WorkItem]) -> WeightTable {
        WeightCalculator::calculate(items, &self.config)
    }

    /// 使用已計算的權重表進行計算
    ///
    /// 週數超過配置上限時以上限計算，並提出錯誤警告。
    pub fn calculate_with_weights(
        &self,
        report: &WorkPackageReport,
        weights: &WeightTable,
    ) -> ProgressResult {
        let week_count = report.week_count.min(self.config.max_week_count);

        tracing::info!(
            "開始進度計算：項目 {} 筆，週數 {}",
            report.items.len(),
            week_count
        );

        let start_time = std::time::Instant::now();

        // Step 1: 彙總項目進度
        tracing::debug!("Step 1: 項目彙總");
        let (enriched_items, totals) =
            Aggregator::aggregate(&report.items, weights, week_count, &self.config);
        tracing::debug!(
            "總預算 {}，權重總和 {}，實際進度 {}",
            totals.total_budget,
            totals.weight,
            totals.weighted_progress
        );

        // Step 2: S 曲線
        tracing::debug!("Step 2: S 曲線");
        let curve_series = CurveBuilder::build(
            &report.items,
            weights,
            week_count,
            report.start_date(),
            &self.config,
        );

        // Step 3: 一致性檢查
        tracing::debug!("Step 3: 一致性檢查");
        let warnings = self.check_consistency(report, weights, week_count);

        let result = ProgressResult {
            week_count,
            enriched_items,
            totals,
            curve_series,
            warnings,
            package_metadata: report.package_metadata.clone(),
        };

        tracing::info!(
            "進度計算完成，耗時 {:?}，警告 {} 筆",
            start_time.elapsed(),
            result.warnings.len()
        );

        result
    }

    /// 檢查資料一致性（只提出警告，不自動修正）
    fn check_consistency(
        &self,
        report: &WorkPackageReport,
        weights: &WeightTable,
        week_count: u32,
    ) -> Vec<ProgressWarning> {
        let mut warnings = Vec::new();
        let tolerance = self.config.weight_tolerance;

        if week_count < report.week_count {
            warnings.push(ProgressWarning::error(
                None,
                format!(
                    "週數 {} 超過上限 {}，只計算到第 {} 週",
                    report.week_count, self.config.max_week_count, week_count
                ),
            ));
        }

        if weights.weights.len() != report.items.len() {
            warnings.push(ProgressWarning::error(
                None,
                format!(
                    "權重表有 {} 筆，但項目有 {} 筆，權重需要重新計算",
                    weights.weights.len(),
                    report.items.len()
                ),
            ));
        }

        for &index in &weights.overflowed {
            warnings.push(ProgressWarning::error(
                Some(index),
                "項目預算計算溢位，已視為 0".to_string(),
            ));
        }

        if weights.budget_overflowed {
            warnings.push(ProgressWarning::error(
                None,
                "總預算加總溢位，所有權重已視為 0".to_string(),
            ));
        } else if weights.total_budget > Decimal::ZERO {
            let weight_sum = weights.weight_sum();
            let drift = weight_sum
                .checked_sub(Decimal::ONE_HUNDRED)
                .map_or(Decimal::MAX, |d| d.abs());
            if drift > tolerance {
                warnings.push(ProgressWarning::warning(
                    None,
                    format!("權重總和為 {}，與 100 相差 {}", weight_sum, drift),
                ));
            }
        } else if !report.items.is_empty() {
            warnings.push(ProgressWarning::info(
                None,
                "總預算為 0，所有權重皆為 0".to_string(),
            ));
        }

        for (index, item) in report.items.iter().enumerate() {
            if let Some(stored) = item.weight {
                let derived = weights.weight(index);
                if stored.checked_sub(derived).map_or(true, |d| d.abs() > tolerance) {
                    warnings.push(ProgressWarning::warning(
                        Some(index),
                        format!("已存權重 {} 與計算權重 {} 不符，權重已過期", stored, derived),
                    ));
                }
            }

            let quantities_overflow = [Measure::Actual, Measure::Planned].into_iter().any(|measure| {
                WeeklyAccumulator::checked_accumulate(item, week_count, measure).is_none()
            });
            if quantities_overflow {
                warnings.push(ProgressWarning::error(
                    Some(index),
                    "週累計量溢位，已視為 0".to_string(),
                ));
            }

            let ignored = item.out_of_range_weeks(week_count);
            if !ignored.is_empty() {
                warnings.push(ProgressWarning::info(
                    Some(index),
                    format!("週次 {:?} 超出報表範圍，已略過", ignored),
                ));
            }
        }

        let totals_overflow = [Measure::Actual, Measure::Planned].into_iter().any(|measure| {
            Aggregator::checked_weighted_total(&report.items, weights, week_count, measure).is_none()
        });
        if totals_overflow {
            warnings.push(ProgressWarning::error(
                None,
                "加權進度合計溢位，已視為 0".to_string(),
            ));
        }

        for warning in &warnings {
            if warning.severity >= WarningSeverity::Warning {
                tracing::warn!(item_index = ?warning.item_index, "{}", warning.message);
            }
        }

        warnings
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }
}
