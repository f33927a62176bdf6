//! Yahoo Finance 일별 가격 데이터 Provider.
//!
//! 한국 주식은 "035420.KS"(코스피), "035720.KQ"(코스닥) 형식의 심볼로 조회합니다.
//! 조회 종료일은 포함되지 않으므로 호출자가 하루를 더해 전달해야 합니다.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::collections::HashMap;
use stockinfo_core::{PriceBar, PriceSeries, ProviderConfig, TickerSymbol};
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use yahoo_finance_api as yahoo;

use crate::error::{DataError, Result};

/// 가격 이력 Provider trait.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// `[start, end_exclusive)` 기간의 일별 가격 조회.
    ///
    /// 빈 시계열은 `ProviderError`입니다.
    async fn history(
        &self,
        ticker: &TickerSymbol,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<PriceSeries>;
}

/// Yahoo Finance Provider.
pub struct YahooPriceProvider {
    connector: yahoo::YahooConnector,
    timezone: Tz,
    interval: String,
}

impl YahooPriceProvider {
    /// 설정으로 생성.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::ProviderError(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self {
            connector,
            timezone: config.tz()?,
            interval: config.interval.clone(),
        })
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooPriceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn history(
        &self,
        ticker: &TickerSymbol,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<PriceSeries> {
        let symbol = ticker.symbol();
        let start_ts = local_midnight(start, self.timezone)?;
        let end_ts = local_midnight(end_exclusive, self.timezone)?;

        debug!(
            symbol = %symbol,
            interval = %self.interval,
            start = %start,
            end = %end_exclusive,
            "Yahoo Finance API 날짜 범위 호출"
        );

        let response = self
            .connector
            .get_quote_history_interval(&symbol, start_ts, end_ts, &self.interval)
            .await
            .map_err(|e| DataError::ProviderError(format!("Yahoo Finance API 오류 ({}): {}", symbol, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ProviderError(format!("Quote 파싱 오류 ({}): {}", symbol, e)))?;

        // 배당/분할 이벤트는 없을 수 있음
        let dividends: Vec<(i64, f64)> = response
            .dividends()
            .unwrap_or_default()
            .iter()
            .map(|d| (d.date as i64, d.amount))
            .collect();
        let splits: Vec<(i64, f64)> = response
            .splits()
            .unwrap_or_default()
            .iter()
            .filter_map(|s| {
                let ratio = split_ratio(s.numerator as f64, s.denominator as f64);
                if ratio.is_none() {
                    warn!(symbol = %symbol, date = s.date, "분모가 0인 분할 이벤트를 건너뜁니다");
                }
                Some((s.date as i64, ratio?))
            })
            .collect();

        let rows: Vec<QuoteRow> = quotes
            .iter()
            .map(|q| QuoteRow {
                timestamp: q.timestamp as i64,
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                adj_close: q.adjclose,
                volume: q.volume as u64,
            })
            .collect();

        let series = assemble_series(
            ticker,
            self.timezone,
            end_exclusive,
            &rows,
            &dividends,
            &splits,
        )?;

        info!(
            symbol = %symbol,
            rows = series.len(),
            "Yahoo Finance 가격 데이터 조회 완료"
        );

        Ok(series)
    }
}

/// Provider 응답의 한 행 (UNIX 초 단위 시각).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteRow {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// 분할 비율 (분자 / 분모). 분모가 0이거나 결과가 유한하지 않으면 `None`.
fn split_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

/// 응답 행과 배당/분할 이벤트를 거래소 시간대 기준 시계열로 조립.
///
/// 일봉 시각은 거래소 현지 자정으로 맞춥니다 (Yahoo는 장 시작 시각을 줌).
/// 종료일(미포함) 이후의 행은 버리고, 이벤트는 같은 현지 날짜의 행에 붙입니다.
pub fn assemble_series(
    ticker: &TickerSymbol,
    tz: Tz,
    end_exclusive: NaiveDate,
    rows: &[QuoteRow],
    dividends: &[(i64, f64)],
    splits: &[(i64, f64)],
) -> Result<PriceSeries> {
    let by_date = |events: &[(i64, f64)]| -> HashMap<NaiveDate, f64> {
        events
            .iter()
            .filter_map(|(ts, value)| Some((to_local(*ts, tz)?.date_naive(), *value)))
            .collect()
    };
    let dividend_by_date = by_date(dividends);
    let split_by_date = by_date(splits);

    let bars: Vec<PriceBar> = rows
        .iter()
        .filter_map(|row| {
            let date = to_local(row.timestamp, tz)?.date_naive();
            if date >= end_exclusive {
                return None;
            }
            let timestamp = tz
                .from_local_datetime(&date.and_time(NaiveTime::MIN))
                .earliest()?;

            Some(PriceBar {
                timestamp,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                adj_close: row.adj_close,
                volume: row.volume,
                dividends: dividend_by_date.get(&date).copied().unwrap_or(0.0),
                stock_splits: split_by_date.get(&date).copied().unwrap_or(0.0),
            })
        })
        .collect();

    if bars.is_empty() {
        return Err(DataError::ProviderError(format!(
            "{} 기간 내 가격 데이터가 없습니다",
            ticker
        )));
    }

    Ok(PriceSeries::new(ticker.clone(), bars))
}

fn to_local(timestamp: i64, tz: Tz) -> Option<DateTime<Tz>> {
    tz.timestamp_opt(timestamp, 0).single()
}

/// 현지 자정을 Provider 요청 시각으로 변환.
fn local_midnight(date: NaiveDate, tz: Tz) -> Result<OffsetDateTime> {
    let local = tz
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| DataError::InvalidInput(format!("{}의 현지 자정이 없습니다", date)))?;

    OffsetDateTime::from_unix_timestamp(local.timestamp())
        .map_err(|e| DataError::InvalidInput(format!("날짜 범위 오류 {}: {}", date, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Seoul;
    use stockinfo_core::{MarketSelector, SecurityCode};

    fn ticker() -> TickerSymbol {
        TickerSymbol::new(SecurityCode::parse("035420").unwrap(), MarketSelector::Primary).unwrap()
    }

    /// 해당 날짜 09:00 KST (= 00:00 UTC)
    fn ts(y: i32, m: u32, d: u32) -> i64 {
        Seoul
            .with_ymd_and_hms(y, m, d, 9, 0, 0)
            .unwrap()
            .timestamp()
    }

    fn row(timestamp: i64, close: f64) -> QuoteRow {
        QuoteRow {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 1_000,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_assemble_orders_and_localizes() {
        let rows = [row(ts(2021, 12, 31), 378_500.0), row(ts(2021, 12, 30), 380_000.0)];
        let series = assemble_series(&ticker(), Seoul, date(2022, 1, 1), &rows, &[], &[]).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date(2021, 12, 30)));
        assert_eq!(series.last_date(), Some(date(2021, 12, 31)));
        assert_eq!(series.timezone(), Some(Seoul));
        assert_eq!(series.bars()[1].dividends, 0.0);
    }

    #[test]
    fn test_assemble_drops_rows_at_exclusive_end() {
        let rows = [row(ts(2021, 12, 31), 1.0), row(ts(2022, 1, 3), 2.0)];
        let series = assemble_series(&ticker(), Seoul, date(2022, 1, 1), &rows, &[], &[]).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.last_date(), Some(date(2021, 12, 31)));
    }

    #[test]
    fn test_assemble_attaches_events() {
        let rows = [row(ts(2021, 12, 28), 1.0), row(ts(2021, 12, 29), 2.0)];
        let dividends = [(ts(2021, 12, 28), 402.0)];
        let splits = [(ts(2021, 12, 29), 5.0)];

        let series =
            assemble_series(&ticker(), Seoul, date(2022, 1, 1), &rows, &dividends, &splits)
                .unwrap();

        assert_eq!(series.bars()[0].dividends, 402.0);
        assert_eq!(series.bars()[0].stock_splits, 0.0);
        assert_eq!(series.bars()[1].stock_splits, 5.0);
    }

    #[test]
    fn test_daily_bars_normalized_to_local_midnight() {
        // Yahoo는 KRX 일봉을 장 시작(00:00 UTC = 09:00 KST)으로 찍는다
        let open = chrono::Utc
            .with_ymd_and_hms(2019, 1, 2, 0, 0, 0)
            .unwrap()
            .timestamp();
        let series =
            assemble_series(&ticker(), Seoul, date(2019, 1, 3), &[row(open, 1.0)], &[], &[])
                .unwrap();

        let bar = &series.bars()[0];
        assert_eq!(
            bar.timestamp.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
            "2019-01-02 00:00:00+09:00"
        );
        assert_eq!(
            series.to_naive().bars()[0].timestamp,
            date(2019, 1, 2).and_time(NaiveTime::MIN)
        );
    }

    #[test]
    fn test_split_ratio() {
        assert_eq!(split_ratio(5.0, 1.0), Some(5.0));
        assert_eq!(split_ratio(1.0, 2.0), Some(0.5));
        assert_eq!(split_ratio(5.0, 0.0), None);
        assert_eq!(split_ratio(0.0, 0.0), None);
    }

    #[test]
    fn test_empty_series_is_provider_error() {
        let result = assemble_series(&ticker(), Seoul, date(2022, 1, 1), &[], &[], &[]);
        assert!(matches!(result, Err(DataError::ProviderError(_))));
    }

    #[test]
    fn test_local_midnight() {
        let start = local_midnight(date(2019, 1, 1), Seoul).unwrap();
        // 2019-01-01 00:00 KST = 2018-12-31 15:00 UTC
        assert_eq!(start.unix_timestamp(), 1_546_268_400);
    }

    #[tokio::test]
    #[ignore] // 실제 네트워크 테스트는 ignore
    async fn test_fetch_naver_history() {
        let provider = YahooPriceProvider::new(&ProviderConfig::default()).unwrap();
        let series = provider
            .history(&ticker(), date(2021, 12, 1), date(2022, 1, 1))
            .await
            .unwrap();

        println!("NAVER 가격 데이터: {}개", series.len());
        assert_eq!(series.last_date(), Some(date(2021, 12, 30)));
    }
}
