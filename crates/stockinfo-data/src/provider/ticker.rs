//! 회사명 → Yahoo Finance 티커 변환.

use stockinfo_core::{ListingTable, MarketSelector, TickerSymbol};
use tracing::{debug, warn};

use super::listing::ListingSource;
use crate::error::{DataError, Result};

/// 회사명으로 티커 심볼을 찾는 Mapper.
pub struct TickerMapper<S> {
    source: S,
}

impl<S: ListingSource> TickerMapper<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// 상장 목록 공급원.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// 회사명(정확히 일치)과 시장으로 티커 심볼 조회.
    ///
    /// 시장이 지정되지 않으면 목록을 받기 전에 `InvalidInput`으로 실패합니다.
    pub async fn map_to_ticker(
        &self,
        company_name: &str,
        market: MarketSelector,
    ) -> Result<TickerSymbol> {
        market.ticker_suffix()?;

        let table = self.source.resolve(market).await?;
        let ticker = lookup_ticker(&table, company_name, market)?;

        debug!(company = company_name, ticker = %ticker, "티커 변환 완료");
        Ok(ticker)
    }
}

/// 이미 받아 둔 목록에서 티커 심볼 조회.
///
/// 일치하는 행이 여러 개면 목록 순서상 첫 번째를 사용합니다.
pub fn lookup_ticker(
    table: &ListingTable,
    company_name: &str,
    market: MarketSelector,
) -> Result<TickerSymbol> {
    let mut matches = table.exact_matches(company_name);

    let first = matches.next().ok_or_else(|| {
        DataError::NotFound(format!(
            "'{}' 종목을 {} 목록에서 찾을 수 없습니다",
            company_name,
            market.label()
        ))
    })?;

    let duplicates = matches.count();
    if duplicates > 0 {
        warn!(
            company = company_name,
            duplicates,
            code = %first.security_code,
            "동일한 회사명이 여러 개 있어 첫 번째 종목을 사용합니다"
        );
    }

    Ok(TickerSymbol::new(first.security_code.clone(), market)?)
}
