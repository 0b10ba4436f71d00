//! 完成率與加權進度

use rust_decimal::Decimal;

/// 單一項目在某週的進度（全精度，不四捨五入）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProgress {
    /// 完成百分比（可超過 100）
    pub percent_complete: Decimal,

    /// 加權進度 = 完成百分比 × 權重 / 100
    pub weighted_progress: Decimal,
}

impl ResolvedProgress {
    pub const ZERO: Self = Self {
        percent_complete: Decimal::ZERO,
        weighted_progress: Decimal::ZERO,
    };
}

/// 進度解析器
pub struct ProgressResolver;

impl ProgressResolver {
    /// 由累計量、目標量與權重計算進度
    pub fn resolve(accumulated: Decimal, target_volume: Decimal, weight: Decimal) -> ResolvedProgress {
        let percent_complete = Self::percent_complete(accumulated, target_volume);
        ResolvedProgress {
            percent_complete,
            weighted_progress: Self::weighted_progress(percent_complete, weight),
        }
    }

    /// 完成百分比，目標量 ≤ 0 時為 0
    pub fn percent_complete(accumulated: Decimal, target_volume: Decimal) -> Decimal {
        if target_volume <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        accumulated
            .checked_div(target_volume)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }

    /// 加權進度
    pub fn weighted_progress(percent_complete: Decimal, weight: Decimal) -> Decimal {
        percent_complete
            .checked_mul(weight)
            .map(|scaled| scaled / Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO)
    }
}
