//! # Progress Calculation Engine
//!
//! 工程週進度計算引擎：權重、累計、完成率、彙總與 S 曲線

pub mod accumulation;
pub mod aggregator;
pub mod bucketing;
pub mod calculator;
pub mod curve;
pub mod resolver;
pub mod weight;

use serde::Serialize;

// Re-export 主要類型
pub use accumulation::{Measure, WeeklyAccumulator};
pub use aggregator::{Aggregator, EnrichedItem, PeriodBreakdown, ProgressTotals};
pub use bucketing::{WeekBucketing, WeekPeriod};
pub use calculator::ProgressCalculator;
pub use curve::{CurveBuilder, CurvePoint};
pub use resolver::{ProgressResolver, ResolvedProgress};
pub use weight::{WeightCalculator, WeightTable};

/// 進度計算結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResult {
    /// 實際計算的週數（不超過配置上限）
    pub week_count: u32,

    /// 附帶計算結果的項目
    pub enriched_items: Vec<EnrichedItem>,

    /// 工程包合計
    pub totals: ProgressTotals,

    /// S 曲線序列
    pub curve_series: Vec<CurvePoint>,

    /// 資料一致性警告
    pub warnings: Vec<ProgressWarning>,

    /// 原樣傳遞給報表輸出的附帶資訊
    pub package_metadata: progress_core::PackageMetadata,
}

impl ProgressResult {
    /// 添加警告
    pub fn add_warning(&mut self, warning: ProgressWarning) {
        self.warnings.push(warning);
    }

    /// 是否有達到指定嚴重度的警告
    pub fn has_warnings_at(&self, severity: WarningSeverity) -> bool {
        self.warnings.iter().any(|w| w.severity >= severity)
    }

    /// 最後一週的曲線點
    pub fn last_curve_point(&self) -> Option<&CurvePoint> {
        self.curve_series.last()
    }
}

/// 資料一致性警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressWarning {
    /// 項目索引（工程包層級為 `None`）
    pub item_index: Option<usize>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ProgressWarning {
    pub fn new(item_index: Option<usize>, message: String, severity: WarningSeverity) -> Self {
        Self {
            item_index,
            message,
            severity,
        }
    }

    pub fn info(item_index: Option<usize>, message: String) -> Self {
        Self::new(item_index, message, WarningSeverity::Info)
    }

    pub fn warning(item_index: Option<usize>, message: String) -> Self {
        Self::new(item_index, message, WarningSeverity::Warning)
    }

    pub fn error(item_index: Option<usize>, message: String) -> Self {
        Self::new(item_index, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
