//! 상장 종목 조회 및 가격 데이터.
//!
//! 이 crate는 다음을 제공합니다:
//! - KIND 상장법인 목록 조회 (회사명 → 종목코드)
//! - 회사명 → Yahoo Finance 티커 변환
//! - Yahoo Finance 일별 가격 데이터 조회

pub mod error;
pub mod provider;

pub use error::{DataError, Result};

pub use provider::{
    KindListingResolver, ListingSource, PriceHistoryProvider, TickerMapper, YahooPriceProvider,
};
