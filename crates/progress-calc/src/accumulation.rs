//! 週累計

use progress_core::WorkItem;
use rust_decimal::Decimal;
use serde::Serialize;

/// 累計對象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Measure {
    /// 計劃（rencana）
    Planned,
    /// 實際（realisasi）
    Actual,
}

/// 逐項相加，溢位時返回 `None`
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// 週累計計算器
pub struct WeeklyAccumulator;

impl WeeklyAccumulator {
    /// 累計第 1 週到 `to_week` 週的數量（缺少的週視為 0，溢位視為 0）
    pub fn accumulate(item: &WorkItem, to_week: u32, measure: Measure) -> Decimal {
        Self::checked_accumulate(item, to_week, measure).unwrap_or(Decimal::ZERO)
    }

    /// 累計數量，溢位時返回 `None`
    pub fn checked_accumulate(item: &WorkItem, to_week: u32, measure: Measure) -> Option<Decimal> {
        if to_week == 0 {
            return Some(Decimal::ZERO);
        }

        checked_sum(item.weekly_data.range(1..=to_week).map(|(_, entry)| match measure {
            Measure::Planned => entry.planned,
            Measure::Actual => entry.actual_or_zero(),
        }))
    }

    /// 單週數量
    pub fn week_value(item: &WorkItem, week: u32, measure: Measure) -> Decimal {
        match measure {
            Measure::Planned => item.planned_at(week),
            Measure::Actual => item.actual_at(week),
        }
    }
}
