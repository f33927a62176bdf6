//! 일별 가격 시계열.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::types::TickerSymbol;

/// 하루치 가격 데이터.
///
/// `T`는 날짜 인덱스 타입입니다. Provider는 시간대가 있는 시각을 돌려주고,
/// 엑셀 내보내기 전에는 시간대를 제거한 `NaiveDateTime`으로 바꿉니다.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar<T = DateTime<Tz>> {
    pub timestamp: T,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
    /// 해당 일의 배당금 (없으면 0)
    pub dividends: f64,
    /// 해당 일의 주식 분할 비율 (없으면 0)
    pub stock_splits: f64,
}

/// 시간대가 제거된 가격 데이터.
pub type NaivePriceBar = PriceBar<NaiveDateTime>;

impl<T> PriceBar<T> {
    /// 날짜 인덱스만 바꾼 복사본.
    pub fn map_timestamp<U>(&self, f: impl FnOnce(&T) -> U) -> PriceBar<U> {
        PriceBar {
            timestamp: f(&self.timestamp),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            adj_close: self.adj_close,
            volume: self.volume,
            dividends: self.dividends,
            stock_splits: self.stock_splits,
        }
    }
}

/// 종목 하나의 가격 시계열 (날짜 오름차순).
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries<T = DateTime<Tz>> {
    ticker: TickerSymbol,
    bars: Vec<PriceBar<T>>,
}

/// 시간대가 제거된 가격 시계열.
pub type NaivePriceSeries = PriceSeries<NaiveDateTime>;

impl<T: Ord> PriceSeries<T> {
    /// 시계열 생성. 날짜 순으로 정렬됩니다.
    pub fn new(ticker: TickerSymbol, mut bars: Vec<PriceBar<T>>) -> Self {
        bars.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Self { ticker, bars }
    }
}

impl<T> PriceSeries<T> {
    pub fn ticker(&self) -> &TickerSymbol {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar<T>] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 앞쪽 `n`개 행.
    pub fn head(&self, n: usize) -> &[PriceBar<T>] {
        &self.bars[..n.min(self.bars.len())]
    }
}

impl PriceSeries<DateTime<Tz>> {
    /// 날짜 인덱스의 시간대.
    pub fn timezone(&self) -> Option<Tz> {
        self.bars.first().map(|bar| bar.timestamp.timezone())
    }

    /// 시간대를 제거한 시계열.
    ///
    /// 현지 시각은 그대로 두고 시간대 정보만 버립니다.
    pub fn to_naive(&self) -> NaivePriceSeries {
        PriceSeries {
            ticker: self.ticker.clone(),
            bars: self
                .bars
                .iter()
                .map(|bar| bar.map_timestamp(|ts| ts.naive_local()))
                .collect(),
        }
    }

    /// 차트용 (날짜, 종가) 목록.
    pub fn close_points(&self) -> Vec<(NaiveDate, f64)> {
        self.bars
            .iter()
            .map(|bar| (bar.timestamp.date_naive(), bar.close))
            .collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.timestamp.date_naive())
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.timestamp.date_naive())
    }
}
