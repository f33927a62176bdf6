//! 조회 기간.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{StockInfoError, StockInfoResult};

/// 사용자가 선택한 조회 기간 (시작일, 종료일 모두 포함).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// 기간 생성. 시작일이 종료일보다 늦으면 에러입니다.
    pub fn new(start: NaiveDate, end: NaiveDate) -> StockInfoResult<Self> {
        if start > end {
            return Err(StockInfoError::InvalidInput(format!(
                "시작일({})이 종료일({})보다 늦습니다",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// 사용자가 선택한 종료일 (포함).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Provider에 전달할 종료일.
    ///
    /// Provider는 종료일을 포함하지 않으므로 하루를 더합니다.
    pub fn provider_end(&self) -> NaiveDate {
        self.end
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// 날짜 문자열 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> StockInfoResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        StockInfoError::Parse(format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_provider_end_is_exclusive_next_day() {
        let range = DateRange::new(date(2019, 1, 1), date(2021, 12, 31)).unwrap();
        assert_eq!(range.provider_end(), date(2022, 1, 1));

        let leap = DateRange::new(date(2024, 2, 28), date(2024, 2, 28)).unwrap();
        assert_eq!(leap.provider_end(), date(2024, 2, 29));
    }

    #[test]
    fn test_rejects_reversed_range() {
        assert!(matches!(
            DateRange::new(date(2022, 1, 2), date(2022, 1, 1)),
            Err(StockInfoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_date() {
        let range =
            DateRange::new(parse_date("2019-01-01").unwrap(), parse_date(" 2021-12-31 ").unwrap())
                .unwrap();
        assert_eq!(range.start(), date(2019, 1, 1));
        assert_eq!(range.end(), date(2021, 12, 31));
        assert_eq!(range.to_string(), "2019-01-01 ~ 2021-12-31");

        assert!(matches!(
            parse_date("2019/01/01"),
            Err(StockInfoError::Parse(_))
        ));
    }
}
