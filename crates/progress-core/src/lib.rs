//! # Progress Core
//!
//! 工程進度報表的核心資料模型與類型定義

pub mod config;
pub mod item;
pub mod lenient;
pub mod report;

// Re-export 主要類型
pub use config::ProgressConfig;
pub use item::{WeekEntry, WorkItem};
pub use report::{PackageMetadata, WorkPackageReport};

/// 進度計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("無效的週數: {week_count}（允許範圍 1..={max}）")]
    InvalidWeekCount { week_count: u32, max: u32 },

    #[error("找不到草稿項目: {0}")]
    ItemNotFound(uuid::Uuid),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("JSON 解析錯誤: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProgressError>;
