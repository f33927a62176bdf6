//! 데이터 Provider 모듈.
//!
//! ## 상장법인 목록
//! - `KindListingResolver`: KIND 상장법인 목록 (회사명, 종목코드)
//! - `TickerMapper`: 회사명 → Yahoo Finance 티커 심볼
//!
//! ## 가격 데이터
//! - `YahooPriceProvider`: Yahoo Finance 일별 가격 데이터

pub mod listing;
pub mod ticker;
pub mod yahoo;

pub use listing::{decode_document, parse_listing_table, KindListingResolver, ListingSource};
pub use ticker::{lookup_ticker, TickerMapper};
pub use yahoo::{assemble_series, PriceHistoryProvider, QuoteRow, YahooPriceProvider};
