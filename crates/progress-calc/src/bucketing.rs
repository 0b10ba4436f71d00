//! 週次分桶（報表週次與日期區間的對應）

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// 報表中的一週
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPeriod {
    /// 週次（從 1 開始）
    pub week: u32,
    /// 起始日
    pub start: NaiveDate,
    /// 結束日（含）
    pub end: NaiveDate,
}

impl WeekPeriod {
    /// 日期是否落在本週
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// 週次分桶計算器
pub struct WeekBucketing;

impl WeekBucketing {
    /// 第 `week` 週的日期區間（開工日為第 1 週第 1 天）
    pub fn period(start_date: NaiveDate, week: u32) -> Option<WeekPeriod> {
        if week == 0 {
            return None;
        }

        let offset = u64::from(week - 1) * 7;
        let start = start_date.checked_add_days(Days::new(offset))?;
        let end = start.checked_add_days(Days::new(6))?;

        Some(WeekPeriod { week, start, end })
    }

    /// 第 1 週到第 `week_count` 週的日期區間
    pub fn periods(start_date: NaiveDate, week_count: u32) -> Vec<WeekPeriod> {
        (1..=week_count)
            .map_while(|week| Self::period(start_date, week))
            .collect()
    }

    /// 日期所在的週次（早於開工日為 `None`）
    pub fn week_containing(start_date: NaiveDate, date: NaiveDate) -> Option<u32> {
        let days = (date - start_date).num_days();
        if days < 0 {
            return None;
        }
        u32::try_from(days / 7 + 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_periods() {
        let periods = WeekBucketing::periods(date(2025, 1, 6), 3);

        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].start, date(2025, 1, 6));
        assert_eq!(periods[0].end, date(2025, 1, 12));
        assert_eq!(periods[2].week, 3);
        assert_eq!(periods[2].start, date(2025, 1, 20));
        assert_eq!(periods[2].end, date(2025, 1, 26));
    }

    #[test]
    fn test_periods_cross_year() {
        let periods = WeekBucketing::periods(date(2024, 12, 23), 2);

        assert_eq!(periods[1].start, date(2024, 12, 30));
        assert_eq!(periods[1].end, date(2025, 1, 5));
    }

    #[test]
    fn test_week_zero_has_no_period() {
        assert!(WeekBucketing::period(date(2025, 1, 6), 0).is_none());
        assert!(WeekBucketing::periods(date(2025, 1, 6), 0).is_empty());
    }

    #[rstest]
    #[case(date(2025, 1, 5), None)]
    #[case(date(2025, 1, 6), Some(1))]
    #[case(date(2025, 1, 12), Some(1))]
    #[case(date(2025, 1, 13), Some(2))]
    #[case(date(2025, 3, 31), Some(13))]
    fn test_week_containing(#[case] day: NaiveDate, #[case] expected: Option<u32>) {
        assert_eq!(WeekBucketing::week_containing(date(2025, 1, 6), day), expected);
    }

    #[test]
    fn test_period_contains() {
        let period = WeekBucketing::period(date(2025, 1, 6), 2).unwrap();

        assert!(period.contains(date(2025, 1, 13)));
        assert!(period.contains(date(2025, 1, 19)));
        assert!(!period.contains(date(2025, 1, 20)));
    }
}
