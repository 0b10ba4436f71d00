//! # Progress Cache
//!
//! 編輯草稿、髒標記與增量重算

pub mod command;
pub mod dirty_tracking;
pub mod incremental;
pub mod save;
pub mod session;

// Re-export 主要類型
pub use command::EditCommand;
pub use dirty_tracking::DirtyTracker;
pub use incremental::IncrementalCalculator;
pub use save::SavePayload;
pub use session::ReportSession;
