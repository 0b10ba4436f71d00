//! 增量重算

use progress_calc::{ProgressCalculator, ProgressResult, WeightTable};
use progress_core::WorkPackageReport;

use crate::dirty_tracking::DirtyTracker;

/// 增量計算器
///
/// 只有預算相關欄位（單價、數量、項目增刪）變更時才重算權重；
/// 沒有任何變更時直接返回上次結果。結果必須與完整重算一致。
#[derive(Debug, Default)]
pub struct IncrementalCalculator {
    calculator: ProgressCalculator,
    weights: Option<WeightTable>,
    cached: Option<ProgressResult>,
}

impl IncrementalCalculator {
    /// 創建新的增量計算器
    pub fn new(calculator: ProgressCalculator) -> Self {
        Self {
            calculator,
            weights: None,
            cached: None,
        }
    }

    /// 依髒標記重算
    pub fn recompute(&mut self, report: &WorkPackageReport, tracker: &DirtyTracker) -> &ProgressResult {
        let result = match self.cached.take() {
            Some(cached) if !tracker.is_dirty() => cached,
            _ => {
                let weights = match self.weights.take() {
                    Some(weights) if !tracker.needs_weights() => {
                        tracing::debug!("沿用權重表，髒項目 {} 筆", tracker.dirty_items().len());
                        weights
                    }
                    _ => {
                        tracing::debug!("重新計算權重表");
                        self.calculator.weights(&report.items)
                    }
                };

                let result = self.calculator.calculate_with_weights(report, &weights);
                self.weights = Some(weights);
                result
            }
        };

        self.cached.insert(result)
    }

    /// 上次計算結果
    pub fn cached(&self) -> Option<&ProgressResult> {
        self.cached.as_ref()
    }

    /// 清除快取（下次必定完整重算）
    pub fn invalidate(&mut self) {
        self.weights = None;
        self.cached = None;
    }

    /// 獲取計算器引用
    pub fn calculator(&self) -> &ProgressCalculator {
        &self.calculator
    }
}
