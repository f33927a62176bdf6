//! 시장 구분.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{StockInfoError, StockInfoResult};

/// 시장 선택자.
///
/// KIND 목록 조회 시 `marketType` 파라미터와 Yahoo Finance 티커 접미사를 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSelector {
    /// 시장 구분 없음 (전체 상장법인)
    #[default]
    Unspecified,
    /// 유가증권시장 (코스피)
    Primary,
    /// 코스닥
    Secondary,
}

impl MarketSelector {
    /// KIND `marketType` 쿼리 값.
    pub fn kind_market_type(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Primary => "stockMkt",
            Self::Secondary => "kosdaqMkt",
        }
    }

    /// Yahoo Finance 티커 접미사.
    ///
    /// 시장이 지정되지 않으면 접미사를 정할 수 없으므로 에러입니다.
    pub fn ticker_suffix(&self) -> StockInfoResult<&'static str> {
        match self {
            Self::Primary => Ok(".KS"),
            Self::Secondary => Ok(".KQ"),
            Self::Unspecified => Err(StockInfoError::InvalidInput(
                "티커 접미사를 정하려면 시장(kospi/kosdaq)을 지정해야 합니다".to_string(),
            )),
        }
    }

    /// 화면 표시용 시장 이름.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unspecified => "전체",
            Self::Primary => "코스피",
            Self::Secondary => "코스닥",
        }
    }
}

impl fmt::Display for MarketSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "ALL"),
            Self::Primary => write!(f, "KOSPI"),
            Self::Secondary => write!(f, "KOSDAQ"),
        }
    }
}

impl FromStr for MarketSelector {
    type Err = StockInfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_uppercase().as_str() {
            "" | "ALL" | "전체" => Ok(Self::Unspecified),
            "KOSPI" | "코스피" | "PRIMARY" | "KS" | "STOCKMKT" => Ok(Self::Primary),
            "KOSDAQ" | "코스닥" | "SECONDARY" | "KQ" | "KOSDAQMKT" => Ok(Self::Secondary),
            _ => Err(StockInfoError::InvalidInput(format!(
                "Invalid market: {}. Supported: kospi, kosdaq, all",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_parsing() {
        assert_eq!("kospi".parse::<MarketSelector>(), Ok(MarketSelector::Primary));
        assert_eq!("코스피".parse::<MarketSelector>(), Ok(MarketSelector::Primary));
        assert_eq!("KQ".parse::<MarketSelector>(), Ok(MarketSelector::Secondary));
        assert_eq!("코스닥".parse::<MarketSelector>(), Ok(MarketSelector::Secondary));
        assert_eq!("".parse::<MarketSelector>(), Ok(MarketSelector::Unspecified));
        assert_eq!("all".parse::<MarketSelector>(), Ok(MarketSelector::Unspecified));
        assert!("nyse".parse::<MarketSelector>().is_err());
    }

    #[test]
    fn test_kind_market_type() {
        assert_eq!(MarketSelector::Unspecified.kind_market_type(), "");
        assert_eq!(MarketSelector::Primary.kind_market_type(), "stockMkt");
        assert_eq!(MarketSelector::Secondary.kind_market_type(), "kosdaqMkt");
    }

    #[test]
    fn test_ticker_suffix() {
        assert_eq!(MarketSelector::Primary.ticker_suffix(), Ok(".KS"));
        assert_eq!(MarketSelector::Secondary.ticker_suffix(), Ok(".KQ"));
        assert!(matches!(
            MarketSelector::Unspecified.ticker_suffix(),
            Err(StockInfoError::InvalidInput(_))
        ));
    }
}
