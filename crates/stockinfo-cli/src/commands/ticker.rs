//! 회사명 → 티커 심볼 조회 기능.

use anyhow::Result;
use stockinfo_core::{lookup_span, MarketSelector, TickerSymbol};
use stockinfo_data::{ListingSource, TickerMapper};
use tracing::Instrument;

/// 티커 조회 후 출력.
pub async fn show_ticker<S: ListingSource>(
    company: &str,
    market: MarketSelector,
    mapper: &TickerMapper<S>,
) -> Result<TickerSymbol> {
    let ticker = mapper
        .map_to_ticker(company, market)
        .instrument(lookup_span!("ticker", company, market))
        .await?;

    println!("{} ({}) → {}", company, market.label(), ticker);
    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stockinfo_core::{ListingRow, ListingTable, SecurityCode};
    use stockinfo_data::DataError;

    struct OneRow;

    #[async_trait]
    impl ListingSource for OneRow {
        async fn resolve(&self, _market: MarketSelector) -> stockinfo_data::Result<ListingTable> {
            Ok(vec![ListingRow::new("카카오", SecurityCode::parse("035720").unwrap())]
                .into_iter()
                .collect())
        }
    }

    #[tokio::test]
    async fn test_show_ticker() {
        let mapper = TickerMapper::new(OneRow);

        let ticker = show_ticker("카카오", MarketSelector::Primary, &mapper)
            .await
            .unwrap();
        assert_eq!(ticker.symbol(), "035720.KS");
    }

    #[tokio::test]
    async fn test_show_ticker_unspecified_market() {
        let mapper = TickerMapper::new(OneRow);

        let err = show_ticker("카카오", MarketSelector::Unspecified, &mapper)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::InvalidInput(_))
        ));
    }
}
