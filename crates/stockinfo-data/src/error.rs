//! 데이터 모듈 오류 타입.

use stockinfo_core::StockInfoError;
use thiserror::Error;

/// 데이터 조회 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 상장 목록을 가져올 수 없음 (연결 실패, 형식 오류, 빈 목록)
    #[error("Listing unavailable: {0}")]
    DataUnavailable(String),

    /// 회사명이 목록에 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 가격 데이터 조회 실패 또는 빈 시계열
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// 잘못된 입력
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StockInfoError> for DataError {
    fn from(err: StockInfoError) -> Self {
        match err {
            StockInfoError::InvalidInput(msg) | StockInfoError::Parse(msg) => {
                DataError::InvalidInput(msg)
            }
            StockInfoError::Config(msg) => DataError::ConfigError(msg),
        }
    }
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        DataError::ProviderError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_conversion() {
        let err: DataError = StockInfoError::InvalidInput("market".to_string()).into();
        assert!(matches!(err, DataError::InvalidInput(_)));

        let err: DataError = StockInfoError::Config("tz".to_string()).into();
        assert!(matches!(err, DataError::ConfigError(_)));
    }
}
