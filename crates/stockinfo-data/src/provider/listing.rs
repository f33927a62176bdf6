//! KIND(한국거래소 기업공시채널) 상장법인 목록.
//!
//! `corpList.do?method=download` 응답은 엑셀 확장자를 달고 오지만 실제로는
//! EUC-KR로 인코딩된 HTML 테이블입니다. 첫 번째 테이블의 첫 행을 헤더로 보고
//! 회사명과 종목코드 두 열만 남깁니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let resolver = KindListingResolver::new(ListingConfig::default())?;
//! let table = resolver.resolve(MarketSelector::Primary).await?;
//! println!("코스피 상장 종목: {}개", table.len());
//! ```

use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use stockinfo_core::{ListingConfig, ListingRow, ListingTable, MarketSelector, SecurityCode};
use tracing::{debug, info};

use crate::error::{DataError, Result};

/// 상장 종목 테이블 공급원.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// 시장별 (회사명, 종목코드) 테이블 조회.
    async fn resolve(&self, market: MarketSelector) -> Result<ListingTable>;
}

/// KIND 상장법인 목록 Resolver.
///
/// 요청마다 목록을 새로 받아오며 캐시하지 않습니다.
pub struct KindListingResolver {
    client: Client,
    config: ListingConfig,
}

impl KindListingResolver {
    /// 설정으로 생성.
    pub fn new(config: ListingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client, config })
    }

    /// 시장별 다운로드 URL.
    pub fn request_url(&self, market: MarketSelector) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("method", self.config.method.as_str()),
                ("marketType", market.kind_market_type()),
            ],
        )
        .map_err(|e| {
            DataError::ConfigError(format!("잘못된 목록 URL {}: {}", self.config.base_url, e))
        })
    }

    /// 목록 문서 다운로드 및 디코딩.
    async fn fetch_document(&self, market: MarketSelector) -> Result<String> {
        let url = self.request_url(market)?;
        debug!(url = %url, market = %market, "KIND 상장법인 목록 요청");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DataError::DataUnavailable(format!("KIND 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(DataError::DataUnavailable(format!(
                "KIND 응답 오류: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DataError::DataUnavailable(format!("응답 읽기 실패: {}", e)))?;

        debug!(bytes = bytes.len(), "KIND 응답 수신");

        Ok(decode_document(&bytes))
    }
}

#[async_trait]
impl ListingSource for KindListingResolver {
    async fn resolve(&self, market: MarketSelector) -> Result<ListingTable> {
        let html = self.fetch_document(market).await?;
        let table = parse_listing_table(&html, &self.config.name_column, &self.config.code_column)?;

        info!(market = %market, rows = table.len(), "상장법인 목록 조회 완료");
        Ok(table)
    }
}

/// 응답 본문 디코딩.
///
/// UTF-8이 아니면 KIND 기본 인코딩인 EUC-KR로 해석합니다.
pub fn decode_document(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, had_errors) = encoding_rs::EUC_KR.decode(bytes);
            if had_errors {
                debug!("EUC-KR 디코딩 중 잘못된 바이트가 대체되었습니다");
            }
            text.into_owned()
        }
    }
}

/// HTML 문서의 첫 번째 테이블을 (회사명, 종목코드) 테이블로 변환.
///
/// 첫 행은 헤더이며, `name_column`/`code_column` 헤더가 없거나
/// 데이터 행이 하나도 없으면 `DataUnavailable`입니다.
pub fn parse_listing_table(
    html: &str,
    name_column: &str,
    code_column: &str,
) -> Result<ListingTable> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let tr_selector = selector("tr")?;
    let cell_selector = selector("th, td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| DataError::DataUnavailable("목록 문서에 테이블이 없습니다".to_string()))?;

    let mut rows = table
        .select(&tr_selector)
        .map(|tr| row_cells(tr, &cell_selector))
        .filter(|cells| !cells.is_empty());

    let header = rows
        .next()
        .ok_or_else(|| DataError::DataUnavailable("목록 테이블이 비어 있습니다".to_string()))?;

    let name_idx = column_index(&header, name_column)?;
    let code_idx = column_index(&header, code_column)?;

    let mut listing = Vec::new();
    for (line, cells) in rows.enumerate() {
        let (Some(name), Some(code)) = (cells.get(name_idx), cells.get(code_idx)) else {
            return Err(DataError::DataUnavailable(format!(
                "{}번째 행의 열 개수가 부족합니다 ({}개)",
                line + 1,
                cells.len()
            )));
        };

        let security_code = SecurityCode::parse(code).map_err(|e| {
            DataError::DataUnavailable(format!("{}번째 행 ({}): {}", line + 1, name, e))
        })?;

        listing.push(ListingRow::new(name.clone(), security_code));
    }

    if listing.is_empty() {
        return Err(DataError::DataUnavailable(
            "목록 테이블에 데이터 행이 없습니다".to_string(),
        ));
    }

    Ok(ListingTable::new(listing))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| DataError::DataUnavailable(format!("셀렉터 파싱 실패 {}: {}", css, e)))
}

fn row_cells(tr: ElementRef<'_>, cell_selector: &Selector) -> Vec<String> {
    tr.select(cell_selector)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}

fn column_index(header: &[String], column: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| {
            DataError::DataUnavailable(format!(
                "'{}' 열이 없습니다 (헤더: {})",
                column,
                header.join(", ")
            ))
        })
}
