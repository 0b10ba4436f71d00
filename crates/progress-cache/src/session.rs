//! 報表編輯草稿

use progress_calc::{ProgressCalculator, ProgressResult};
use progress_core::{ProgressConfig, ProgressError, Result, WorkItem, WorkPackageReport};
use uuid::Uuid;

use crate::command::EditCommand;
use crate::dirty_tracking::DirtyTracker;
use crate::incremental::IncrementalCalculator;
use crate::save::SavePayload;

/// 記憶體中的可編輯報表草稿
///
/// 由後端載入後，透過 [`EditCommand`] 修改；每次提交編輯後由呼叫端
/// 呼叫 [`ReportSession::recompute`] 取得最新結果，存檔時整批送出。
#[derive(Debug)]
pub struct ReportSession {
    report: WorkPackageReport,
    /// 與 `report.items` 一一對應的草稿 key
    keys: Vec<Uuid>,
    config: ProgressConfig,
    tracker: DirtyTracker,
    engine: IncrementalCalculator,
    unsaved: bool,
}

impl ReportSession {
    /// 由載入的報表開啟草稿
    pub fn open(report: WorkPackageReport, config: ProgressConfig) -> Result<Self> {
        config.validate()?;
        config.check_week_count(report.week_count)?;

        let keys = report.items.iter().map(|_| Uuid::new_v4()).collect();
        let engine = IncrementalCalculator::new(ProgressCalculator::new(config.clone()));

        tracing::info!(
            "開啟報表草稿：項目 {} 筆，週數 {}",
            report.items.len(),
            report.week_count
        );

        Ok(Self {
            report,
            keys,
            config,
            tracker: DirtyTracker::new(),
            engine,
            unsaved: false,
        })
    }

    /// 目前草稿
    pub fn report(&self) -> &WorkPackageReport {
        &self.report
    }

    /// 草稿 key（與項目順序一致）
    pub fn keys(&self) -> &[Uuid] {
        &self.keys
    }

    /// 依 key 獲取項目
    pub fn item(&self, key: Uuid) -> Option<&WorkItem> {
        self.position(key).map(|index| &self.report.items[index])
    }

    /// 是否有尚未重算的變更
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// 是否有尚未存檔的變更
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// 套用一次編輯
    pub fn apply(&mut self, command: EditCommand) -> Result<()> {
        tracing::debug!("套用編輯: {:?}", command);

        if let Some(week) = command.week() {
            self.config.check_week_count(week)?;
        }

        let affects_weights = command.affects_weights();
        let target = command.target();

        match command {
            EditCommand::AddItem { key, item } => {
                self.report.items.push(item);
                self.keys.push(key);
            }
            EditCommand::RemoveItem { key } => {
                let index = self.require(key)?;
                self.report.items.remove(index);
                self.keys.remove(index);
            }
            EditCommand::SetWeekCount { week_count } => {
                self.config.check_week_count(week_count)?;
                self.report.week_count = week_count;
                self.tracker.mark_week_count();
            }
            EditCommand::SetName { key, name } => self.item_mut(key)?.name = name,
            EditCommand::SetDetail { key, detail } => self.item_mut(key)?.detail = detail,
            EditCommand::SetUnit { key, unit } => self.item_mut(key)?.unit = unit,
            EditCommand::SetUnitPrice { key, unit_price } => {
                self.item_mut(key)?.unit_price = unit_price
            }
            EditCommand::SetTargetVolume { key, target_volume } => {
                self.item_mut(key)?.target_volume = target_volume
            }
            EditCommand::SetPlanned { key, week, planned } => {
                self.item_mut(key)?.set_planned(week, planned)
            }
            EditCommand::SetActual { key, week, actual } => {
                self.item_mut(key)?.set_actual(week, actual)
            }
            EditCommand::ClearActual { key, week } => self.item_mut(key)?.clear_actual(week),
        }

        if let Some(key) = target {
            self.tracker.mark_item(key, affects_weights);
        }
        self.unsaved = true;
        Ok(())
    }

    /// 依序套用多次編輯，遇到錯誤即停止
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = EditCommand>) -> Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    /// 重算並返回最新結果（沒有變更時返回快取）
    pub fn recompute(&mut self) -> &ProgressResult {
        let result = self.engine.recompute(&self.report, &self.tracker);
        self.tracker.clear();
        result
    }

    /// 產生存檔內容
    pub fn save_payload(&self) -> SavePayload {
        SavePayload {
            items: self.report.items.clone(),
            week_count: self.report.week_count,
        }
    }

    /// 記錄後端為新項目配發的ID
    pub fn assign_id(&mut self, key: Uuid, id: String) -> Result<()> {
        let index = self.require(key)?;
        self.report.items[index].id = Some(id);
        Ok(())
    }

    /// 標記已存檔
    pub fn mark_saved(&mut self) {
        tracing::info!("報表草稿已存檔：項目 {} 筆", self.report.items.len());
        self.unsaved = false;
    }

    fn item_mut(&mut self, key: Uuid) -> Result<&mut WorkItem> {
        let index = self.require(key)?;
        Ok(&mut self.report.items[index])
    }

    fn position(&self, key: Uuid) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    fn require(&self, key: Uuid) -> Result<usize> {
        self.position(key).ok_or(ProgressError::ItemNotFound(key))
    }
}
