//! 도메인 에러 타입.
//!
//! 입력 검증, 설정, 파싱 단계에서 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockInfoError {
    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 파싱 에러
    #[error("파싱 에러: {0}")]
    Parse(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type StockInfoResult<T> = Result<T, StockInfoError>;

impl From<config::ConfigError> for StockInfoError {
    fn from(err: config::ConfigError) -> Self {
        StockInfoError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StockInfoError::InvalidInput("시장 미지정".to_string());
        assert_eq!(err.to_string(), "잘못된 입력: 시장 미지정");
    }
}
