//! 工程進度報表模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{lenient, ProgressConfig, Result, WorkItem};

/// 開工日期在附帶資訊中的欄位名稱
pub const START_DATE_FIELD: &str = "startDate";

/// 工程包的附帶資訊（名稱、日期、合約編號等）
///
/// 所有欄位原封不動地傳給報表輸出；計算引擎只從中讀取開工日期。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageMetadata {
    pub fields: Map<String, Value>,
}

impl PackageMetadata {
    /// 開工日期（用於計算各週日期區間），無法解析時為 `None`
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.fields.get(START_DATE_FIELD).and_then(lenient::parse_date)
    }

    /// 建構器模式：設置開工日期
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.fields.insert(
            START_DATE_FIELD.to_string(),
            Value::String(start_date.format("%Y-%m-%d").to_string()),
        );
        self
    }

    /// 建構器模式：添加其他欄位
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}

/// 單一工程包的週進度報表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackageReport {
    /// 工作項目（順序僅供顯示）
    #[serde(default)]
    pub items: Vec<WorkItem>,

    /// 目前回報的週數
    pub week_count: u32,

    /// 附帶資訊
    #[serde(default)]
    pub package_metadata: PackageMetadata,
}

impl WorkPackageReport {
    /// 創建新的報表（不檢查週數）
    pub fn new(items: Vec<WorkItem>, week_count: u32) -> Self {
        Self {
            items,
            week_count,
            package_metadata: PackageMetadata::default(),
        }
    }

    /// 創建新的報表並檢查週數範圍
    pub fn checked(items: Vec<WorkItem>, week_count: u32, config: &ProgressConfig) -> Result<Self> {
        config.check_week_count(week_count)?;
        Ok(Self::new(items, week_count))
    }

    /// 從後端 JSON 載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置附帶資訊
    pub fn with_metadata(mut self, metadata: PackageMetadata) -> Self {
        self.package_metadata = metadata;
        self
    }

    /// 開工日期
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.package_metadata.start_date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProgressError;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let json = json!({
            "items": [
                {"name": "Galian", "unit": "m3", "unitPrice": 100000, "targetVolume": 10,
                 "weeklyData": {"1": {"actual": 5}, "2": {"actual": 5}}}
            ],
            "weekCount": 2,
            "packageMetadata": {
                "startDate": "2025-01-06",
                "namaPaket": "Rehabilitasi Jalan Desa",
                "nomorKontrak": "KTR-001"
            }
        })
        .to_string();

        let report = WorkPackageReport::from_json_str(&json).unwrap();

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.week_count, 2);
        assert_eq!(report.items[0].actual_at(2), Decimal::from(5));
        assert_eq!(report.start_date(), NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(
            report.package_metadata.fields.get("nomorKontrak"),
            Some(&json!("KTR-001"))
        );
    }

    #[test]
    fn test_metadata_passthrough() {
        let metadata = PackageMetadata::default()
            .with_field("namaPaket", json!("Saluran Irigasi"))
            .with_field("tahunAnggaran", json!(2025));

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value, json!({"namaPaket": "Saluran Irigasi", "tahunAnggaran": 2025}));
    }

    #[test]
    fn test_metadata_round_trip_keeps_raw_start_date() {
        let input = json!({
            "startDate": "2025-07-07T00:00:00Z",
            "namaPaket": "Peningkatan Jalan",
            "nilaiKontrak": 1250000000
        });

        let metadata: PackageMetadata = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(metadata.start_date(), NaiveDate::from_ymd_opt(2025, 7, 7));
        assert_eq!(serde_json::to_value(&metadata).unwrap(), input);
    }

    #[test]
    fn test_unparsable_start_date_is_kept() {
        let input = json!({"startDate": "minggu depan"});
        let metadata: PackageMetadata = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(metadata.start_date(), None);
        assert_eq!(serde_json::to_value(&metadata).unwrap(), input);
    }

    #[test]
    fn test_with_start_date() {
        let metadata = PackageMetadata::default()
            .with_start_date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());

        assert_eq!(metadata.fields.get("startDate"), Some(&json!("2025-01-06")));
        assert_eq!(metadata.start_date(), NaiveDate::from_ymd_opt(2025, 1, 6));
    }

    #[test]
    fn test_checked_week_count() {
        let config = ProgressConfig::default();

        assert!(WorkPackageReport::checked(Vec::new(), 12, &config).is_ok());
        assert!(matches!(
            WorkPackageReport::checked(Vec::new(), 0, &config),
            Err(ProgressError::InvalidWeekCount { week_count: 0, max: 52 })
        ));
    }

    #[test]
    fn test_from_json_missing_week_count() {
        let result = WorkPackageReport::from_json_str(r#"{"items": []}"#);
        assert!(matches!(result, Err(ProgressError::Json(_))));
    }
}
