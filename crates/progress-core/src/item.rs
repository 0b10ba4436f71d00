//! 工作項目模型

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// 單週執行量（計劃 / 實際）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekEntry {
    /// 計劃量（未填視為 0）
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub planned: Decimal,

    /// 實際量（`None` 表示尚未回報，與回報為 0 不同）
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub actual: Option<Decimal>,
}

impl WeekEntry {
    /// 創建新的週資料
    pub fn new(planned: Decimal, actual: Option<Decimal>) -> Self {
        Self { planned, actual }
    }

    /// 是否已回報實際量
    pub fn is_reported(&self) -> bool {
        self.actual.is_some()
    }

    /// 實際量（未回報視為 0）
    pub fn actual_or_zero(&self) -> Decimal {
        self.actual.unwrap_or(Decimal::ZERO)
    }
}

/// 工作項目（預算書中的一列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// 項目ID（尚未存檔的列為 `None`）
    #[serde(
        default,
        deserialize_with = "lenient::opaque_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// 項目名稱
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    /// 說明
    #[serde(default, deserialize_with = "lenient::text")]
    pub detail: String,

    /// 單位
    #[serde(default, deserialize_with = "lenient::text")]
    pub unit: String,

    /// 單價
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub unit_price: Decimal,

    /// 目標數量（完成百分比的分母）
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub target_volume: Decimal,

    /// 後端存放的權重（僅供一致性檢查，存檔時不送出）
    #[serde(default, deserialize_with = "lenient::optional_decimal", skip_serializing)]
    pub weight: Option<Decimal>,

    /// 每週計劃 / 實際量（週次從 1 開始）
    #[serde(default, deserialize_with = "lenient::weekly_data")]
    pub weekly_data: BTreeMap<u32, WeekEntry>,
}

impl WorkItem {
    /// 創建新的工作項目
    pub fn new(name: String, unit: String, unit_price: Decimal, target_volume: Decimal) -> Self {
        Self {
            id: None,
            name,
            detail: String::new(),
            unit,
            unit_price,
            target_volume,
            weight: None,
            weekly_data: BTreeMap::new(),
        }
    }

    /// 建構器模式：設置ID
    pub fn with_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }

    /// 建構器模式：設置說明
    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = detail;
        self
    }

    /// 建構器模式：設置後端權重
    pub fn with_stored_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    /// 建構器模式：設置某週資料
    pub fn with_week(mut self, week: u32, planned: Decimal, actual: Option<Decimal>) -> Self {
        self.weekly_data.insert(week, WeekEntry::new(planned, actual));
        self
    }

    /// 是否已存檔
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// 獲取某週資料
    pub fn week(&self, week: u32) -> Option<&WeekEntry> {
        self.weekly_data.get(&week)
    }

    /// 某週計劃量（無資料為 0）
    pub fn planned_at(&self, week: u32) -> Decimal {
        self.week(week).map(|e| e.planned).unwrap_or(Decimal::ZERO)
    }

    /// 某週實際量（無資料或未回報為 0）
    pub fn actual_at(&self, week: u32) -> Decimal {
        self.week(week).map(WeekEntry::actual_or_zero).unwrap_or(Decimal::ZERO)
    }

    /// 設置某週計劃量
    pub fn set_planned(&mut self, week: u32, planned: Decimal) {
        self.weekly_data.entry(week).or_default().planned = planned;
    }

    /// 設置某週實際量
    pub fn set_actual(&mut self, week: u32, actual: Decimal) {
        self.weekly_data.entry(week).or_default().actual = Some(actual);
    }

    /// 清除某週實際量（回到未回報狀態）
    pub fn clear_actual(&mut self, week: u32) {
        if let Some(entry) = self.weekly_data.get_mut(&week) {
            entry.actual = None;
        }
    }

    /// 超出報表週數（或週次為 0）的資料週次
    pub fn out_of_range_weeks(&self, week_count: u32) -> Vec<u32> {
        self.weekly_data
            .keys()
            .copied()
            .filter(|&w| w == 0 || w > week_count)
            .collect()
    }
}
