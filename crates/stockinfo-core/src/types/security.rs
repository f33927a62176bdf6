//! 종목코드와 티커 심볼.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::market::MarketSelector;
use crate::error::{StockInfoError, StockInfoResult};

/// 종목코드 길이.
pub const SECURITY_CODE_LEN: usize = 6;

/// 숫자 종목코드의 최댓값.
const MAX_NUMERIC_CODE: u32 = 999_999;

/// 6자리 종목코드 (예: "005930").
///
/// 항상 정확히 6글자입니다. 숫자 코드는 앞을 0으로 채웁니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecurityCode(String);

impl SecurityCode {
    /// 정수 코드에서 생성 (5930 → "005930").
    pub fn from_number(code: u32) -> StockInfoResult<Self> {
        if code > MAX_NUMERIC_CODE {
            return Err(StockInfoError::Parse(format!(
                "종목코드 범위 초과: {}",
                code
            )));
        }
        Ok(Self(format!("{:06}", code)))
    }

    /// 목록 셀 텍스트에서 생성.
    ///
    /// - 숫자만 있으면 정수로 보고 0으로 채웁니다 ("5930", "005930", "5930.0").
    ///   6자리를 넘는 숫자열은 거부합니다.
    /// - 6글자 영숫자 코드(신규 KRX 형식, 예: "0001A0")는 대문자로 그대로 둡니다.
    pub fn parse(text: &str) -> StockInfoResult<Self> {
        let trimmed = text.trim();
        let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);

        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if digits.len() > SECURITY_CODE_LEN {
                return Err(StockInfoError::Parse(format!("종목코드 자릿수 초과: {:?}", text)));
            }
            let value: u32 = digits
                .parse()
                .map_err(|_| StockInfoError::Parse(format!("잘못된 종목코드: {}", text)))?;
            return Self::from_number(value);
        }

        if trimmed.len() == SECURITY_CODE_LEN && trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Ok(Self(trimmed.to_ascii_uppercase()));
        }

        Err(StockInfoError::Parse(format!("잘못된 종목코드: {:?}", text)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecurityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SecurityCode {
    type Error = StockInfoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SecurityCode> for String {
    fn from(code: SecurityCode) -> Self {
        code.0
    }
}

/// Yahoo Finance 티커 심볼 (예: "035420.KS").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TickerSymbol {
    code: SecurityCode,
    suffix: &'static str,
}

impl TickerSymbol {
    /// 종목코드에 시장 접미사를 붙여 생성합니다.
    pub fn new(code: SecurityCode, market: MarketSelector) -> StockInfoResult<Self> {
        let suffix = market.ticker_suffix()?;
        Ok(Self { code, suffix })
    }

    /// Provider에 전달할 심볼 문자열.
    pub fn symbol(&self) -> String {
        format!("{}{}", self.code, self.suffix)
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.code, self.suffix)
    }
}
