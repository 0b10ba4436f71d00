//! 權重（bobot）計算

use progress_core::{ProgressConfig, WorkItem};
use rust_decimal::Decimal;

use crate::accumulation::checked_sum;

/// 權重計算結果
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    /// 各項目預算（單價 × 數量 × 加成）
    pub item_budgets: Vec<Decimal>,

    /// 各項目權重（百分比，已四捨五入）
    pub weights: Vec<Decimal>,

    /// 取整前的總預算
    pub raw_budget: Decimal,

    /// 向下取整後的總預算
    pub total_budget: Decimal,

    /// 預算計算溢位的項目索引
    pub overflowed: Vec<usize>,

    /// 預算加總溢位（總預算已視為 0）
    pub budget_overflowed: bool,
}

impl WeightTable {
    /// 某項目的權重（索引不存在為 0）
    pub fn weight(&self, index: usize) -> Decimal {
        self.weights.get(index).copied().unwrap_or(Decimal::ZERO)
    }

    /// 權重總和（溢位視為 0）
    pub fn weight_sum(&self) -> Decimal {
        checked_sum(self.weights.iter().copied()).unwrap_or(Decimal::ZERO)
    }
}

/// 權重計算器
pub struct WeightCalculator;

impl WeightCalculator {
    /// 計算所有項目的權重
    ///
    /// 總預算 = floor(Σ 項目預算 / 取整單位) × 取整單位；
    /// 權重 = 項目預算 / 總預算 × 100，總預算 ≤ 0 時全為 0。
    pub fn calculate(items: &[WorkItem], config: &ProgressConfig) -> WeightTable {
        let mut overflowed = Vec::new();

        let item_budgets: Vec<Decimal> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Self::item_budget(item, config.markup).unwrap_or_else(|| {
                    overflowed.push(index);
                    Decimal::ZERO
                })
            })
            .collect();

        let (raw_budget, budget_overflowed) = match checked_sum(item_budgets.iter().copied()) {
            Some(raw_budget) => (raw_budget, false),
            None => (Decimal::ZERO, true),
        };
        let total_budget = config.floor_budget(raw_budget);

        let weights = item_budgets
            .iter()
            .map(|budget| Self::weight_of(*budget, total_budget, config))
            .collect();

        WeightTable {
            item_budgets,
            weights,
            raw_budget,
            total_budget,
            overflowed,
            budget_overflowed,
        }
    }

    /// 項目預算，溢位時返回 `None`
    pub fn item_budget(item: &WorkItem, markup: Decimal) -> Option<Decimal> {
        item.unit_price
            .checked_mul(item.target_volume)?
            .checked_mul(markup)
    }

    fn weight_of(budget: Decimal, total_budget: Decimal, config: &ProgressConfig) -> Decimal {
        if total_budget <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        budget
            .checked_div(total_budget)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|weight| config.round(weight))
            .unwrap_or(Decimal::ZERO)
    }
}
