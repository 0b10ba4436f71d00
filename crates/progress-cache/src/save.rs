//! 存檔內容

use progress_core::{Result, WorkItem};
use serde::Serialize;

/// 送往後端的完整草稿（整批取代項目列表）
///
/// 權重是推導值，`WorkItem` 序列化時不會帶出。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub items: Vec<WorkItem>,
    pub week_count: u32,
}

impl SavePayload {
    /// 序列化為 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
