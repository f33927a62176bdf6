//! 회사명으로 가격 이력을 받아 표시, 차트, 파일 내보내기까지 수행.
//!
//! 기간은 [`DateRange`] 생성 시점에 이미 검증되어 있고,
//! 나머지 단계는 순서대로 실행됩니다.
//! 1. 회사명 → 티커 변환 (KIND 목록)
//! 2. 가격 이력 조회 (종료일 포함)
//! 3. 앞부분 행 출력
//! 4. 종가 차트 저장 (선택)
//! 5. CSV, 엑셀 저장

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use stockinfo_core::{
    lookup_span, DateRange, ExportConfig, MarketSelector, RenderConfig, TickerSymbol,
};
use stockinfo_data::{ListingSource, PriceHistoryProvider, TickerMapper};
use tracing::{info, Instrument};

use crate::chart::write_close_chart;
use crate::display::{company_header, format_price_table};
use crate::export::write_exports;

/// 조회 설정.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// 회사명 (목록과 정확히 일치)
    pub company: String,
    /// 시장
    pub market: MarketSelector,
    /// 조회 기간 (양 끝 포함)
    pub range: DateRange,
    /// 출력 디렉토리
    pub output_dir: PathBuf,
    /// 파일명, 미리보기 행 수
    pub export: ExportConfig,
    /// 차트 설정 (`None`이면 차트 생략)
    pub chart: Option<RenderConfig>,
}

/// 조회 결과 요약.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub ticker: TickerSymbol,
    pub rows: usize,
    /// Provider에 전달한 종료일 (미포함)
    pub requested_end: NaiveDate,
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub chart_path: Option<PathBuf>,
}

/// 전체 파이프라인 실행.
pub async fn run_fetch<S, P>(
    config: &FetchConfig,
    mapper: &TickerMapper<S>,
    provider: &P,
) -> Result<FetchOutcome>
where
    S: ListingSource,
    P: PriceHistoryProvider + ?Sized,
{
    let span = lookup_span!("fetch", config.company.as_str(), config.market);
    fetch_inner(config, mapper, provider).instrument(span).await
}

async fn fetch_inner<S, P>(
    config: &FetchConfig,
    mapper: &TickerMapper<S>,
    provider: &P,
) -> Result<FetchOutcome>
where
    S: ListingSource,
    P: PriceHistoryProvider + ?Sized,
{
    info!(
        company = %config.company,
        market = %config.market,
        start = %config.range.start(),
        end = %config.range.end(),
        "가격 데이터 조회 시작"
    );

    let ticker = mapper.map_to_ticker(&config.company, config.market).await?;

    let requested_end = config.range.provider_end();
    let series = provider
        .history(&ticker, config.range.start(), requested_end)
        .await?;

    info!(
        ticker = %ticker,
        provider = provider.name(),
        rows = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        timezone = ?series.timezone(),
        "가격 데이터 수신"
    );

    println!("{}", company_header(&config.company));
    print!("{}", format_price_table(series.head(config.export.preview_rows)));

    let chart_path = match &config.chart {
        Some(render) => {
            std::fs::create_dir_all(&config.output_dir).with_context(|| {
                format!("Failed to create output dir: {}", config.output_dir.display())
            })?;
            let path = config.output_dir.join(&config.export.chart_file_name);
            write_close_chart(&series, render, &path)?;
            println!("차트 저장: {}", path.display());
            Some(path)
        }
        None => None,
    };

    let paths = write_exports(&series, &config.output_dir, &config.export)?;
    println!("CSV 저장: {}", paths.csv.display());
    println!("엑셀 저장: {}", paths.xlsx.display());

    Ok(FetchOutcome {
        ticker,
        rows: series.len(),
        requested_end,
        csv_path: paths.csv,
        xlsx_path: paths.xlsx,
        chart_path,
    })
}

/// 출력 디렉토리 결정 (인자 우선, 없으면 설정값).
pub fn resolve_output_dir(arg: Option<&Path>, export: &ExportConfig) -> PathBuf {
    arg.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&export.output_dir))
}
