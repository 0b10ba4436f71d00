//! # Progress
//!
//! 工程週進度報表引擎：由工作項目的單價、數量與每週執行量，
//! 計算權重、完成率、工程包加權進度與 S 曲線。

pub use progress_cache as cache;
pub use progress_calc as calc;
pub use progress_core as model;

pub use progress_cache::{EditCommand, ReportSession, SavePayload};
pub use progress_calc::{ProgressCalculator, ProgressResult};
pub use progress_core::{ProgressConfig, ProgressError, WorkItem, WorkPackageReport};
