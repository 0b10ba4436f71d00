//! 進度計算配置模型

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{ProgressError, Result};

/// 預設加成係數（含稅與不可預見費）
pub const DEFAULT_MARKUP: Decimal = Decimal::from_parts(111, 0, 0, false, 2);

/// 預設預算取整單位（總預算向下取整至千元）
pub const DEFAULT_BUDGET_ROUNDING_UNIT: Decimal = Decimal::ONE_THOUSAND;

/// 預設權重總和容差
pub const DEFAULT_WEIGHT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// 預設顯示小數位數
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// 預設報表週數上限
pub const DEFAULT_MAX_WEEK_COUNT: u32 = 52;

/// 進度計算參數配置
///
/// 加成係數與預算取整單位屬於部署政策，不寫死在計算邏輯中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressConfig {
    /// 加成係數（單價 × 數量 × 加成 = 項目預算）
    pub markup: Decimal,

    /// 總預算向下取整的單位（≤ 0 表示不取整）
    pub budget_rounding_unit: Decimal,

    /// 顯示用小數位數（四捨五入）
    pub decimal_places: u32,

    /// 權重總和與 100 的允許誤差
    pub weight_tolerance: Decimal,

    /// 報表週數上限
    pub max_week_count: u32,
}

impl ProgressConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            markup: DEFAULT_MARKUP,
            budget_rounding_unit: DEFAULT_BUDGET_ROUNDING_UNIT,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            max_week_count: DEFAULT_MAX_WEEK_COUNT,
        }
    }

    /// 從 JSON 載入部署覆寫（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置加成係數
    pub fn with_markup(mut self, markup: Decimal) -> Self {
        self.markup = markup;
        self
    }

    /// 建構器模式：設置預算取整單位
    pub fn with_budget_rounding_unit(mut self, unit: Decimal) -> Self {
        self.budget_rounding_unit = unit;
        self
    }

    /// 建構器模式：設置小數位數
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// 建構器模式：設置權重容差
    pub fn with_weight_tolerance(mut self, tolerance: Decimal) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// 建構器模式：設置週數上限
    pub fn with_max_week_count(mut self, max: u32) -> Self {
        self.max_week_count = max;
        self
    }

    /// 檢查配置是否合理
    pub fn validate(&self) -> Result<()> {
        if self.markup <= Decimal::ZERO {
            return Err(ProgressError::InvalidConfig(format!(
                "加成係數必須大於 0，目前為 {}",
                self.markup
            )));
        }
        if self.weight_tolerance < Decimal::ZERO {
            return Err(ProgressError::InvalidConfig(format!(
                "權重容差不可為負，目前為 {}",
                self.weight_tolerance
            )));
        }
        if self.max_week_count == 0 {
            return Err(ProgressError::InvalidConfig(
                "週數上限必須至少為 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 四捨五入至顯示位數（0.5 進位）
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }

    /// 總預算向下取整至取整單位的倍數（溢位時不取整）
    pub fn floor_budget(&self, raw_budget: Decimal) -> Decimal {
        let unit = self.budget_rounding_unit;
        if unit <= Decimal::ZERO {
            return raw_budget;
        }
        raw_budget
            .checked_div(unit)
            .and_then(|units| units.floor().checked_mul(unit))
            .unwrap_or(raw_budget)
    }

    /// 檢查週數是否在允許範圍內
    pub fn check_week_count(&self, week_count: u32) -> Result<()> {
        if week_count == 0 || week_count > self.max_week_count {
            return Err(ProgressError::InvalidWeekCount {
                week_count,
                max: self.max_week_count,
            });
        }
        Ok(())
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self::new()
    }
}
