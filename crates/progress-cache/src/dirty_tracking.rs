//! 髒標記追蹤

use std::collections::HashSet;

use uuid::Uuid;

/// 髒標記追蹤器
///
/// 記錄自上次重算以來被修改的草稿項目，以及是否需要重新計算權重。
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_items: HashSet<Uuid>,
    weights_dirty: bool,
    week_count_dirty: bool,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記項目為髒
    pub fn mark_item(&mut self, key: Uuid, affects_weights: bool) {
        self.dirty_items.insert(key);
        self.weights_dirty |= affects_weights;
    }

    /// 標記週數已變更
    pub fn mark_week_count(&mut self) {
        self.week_count_dirty = true;
    }

    /// 標記全部需要重算（含權重）
    pub fn mark_all(&mut self) {
        self.weights_dirty = true;
        self.week_count_dirty = true;
    }

    /// 檢查項目是否為髒
    pub fn is_item_dirty(&self, key: &Uuid) -> bool {
        self.dirty_items.contains(key)
    }

    /// 是否有任何變更
    pub fn is_dirty(&self) -> bool {
        !self.dirty_items.is_empty() || self.weights_dirty || self.week_count_dirty
    }

    /// 是否需要重新計算權重
    pub fn needs_weights(&self) -> bool {
        self.weights_dirty
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_items.clear();
        self.weights_dirty = false;
        self.week_count_dirty = false;
    }

    /// 獲取所有髒項目
    pub fn dirty_items(&self) -> Vec<Uuid> {
        self.dirty_items.iter().copied().collect()
    }
}
