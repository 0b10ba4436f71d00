//! 編輯指令

use progress_core::WorkItem;
use rust_decimal::Decimal;
use uuid::Uuid;

/// 對草稿報表的一次已提交編輯
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// 新增項目（key 由呼叫端產生，見 [`EditCommand::add_item`]）
    AddItem { key: Uuid, item: WorkItem },
    /// 刪除項目
    RemoveItem { key: Uuid },
    SetName { key: Uuid, name: String },
    SetDetail { key: Uuid, detail: String },
    SetUnit { key: Uuid, unit: String },
    SetUnitPrice { key: Uuid, unit_price: Decimal },
    SetTargetVolume { key: Uuid, target_volume: Decimal },
    /// 設置某週計劃量
    SetPlanned { key: Uuid, week: u32, planned: Decimal },
    /// 設置某週實際量
    SetActual { key: Uuid, week: u32, actual: Decimal },
    /// 清除某週實際量（回到未回報）
    ClearActual { key: Uuid, week: u32 },
    /// 變更報表週數（週資料不會被刪除）
    SetWeekCount { week_count: u32 },
}

impl EditCommand {
    /// 建立新增項目指令並產生新的草稿 key
    pub fn add_item(item: WorkItem) -> Self {
        Self::AddItem {
            key: Uuid::new_v4(),
            item,
        }
    }

    /// 指令作用的草稿項目
    pub fn target(&self) -> Option<Uuid> {
        match self {
            Self::AddItem { key, .. }
            | Self::RemoveItem { key }
            | Self::SetName { key, .. }
            | Self::SetDetail { key, .. }
            | Self::SetUnit { key, .. }
            | Self::SetUnitPrice { key, .. }
            | Self::SetTargetVolume { key, .. }
            | Self::SetPlanned { key, .. }
            | Self::SetActual { key, .. }
            | Self::ClearActual { key, .. } => Some(*key),
            Self::SetWeekCount { .. } => None,
        }
    }

    /// 是否影響預算（需要重新計算權重）
    pub fn affects_weights(&self) -> bool {
        matches!(
            self,
            Self::AddItem { .. }
                | Self::RemoveItem { .. }
                | Self::SetUnitPrice { .. }
                | Self::SetTargetVolume { .. }
        )
    }

    /// 指令指定的週次
    pub fn week(&self) -> Option<u32> {
        match self {
            Self::SetPlanned { week, .. }
            | Self::SetActual { week, .. }
            | Self::ClearActual { week, .. } => Some(*week),
            _ => None,
        }
    }
}
