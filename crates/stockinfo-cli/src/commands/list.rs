//! 상장 종목 목록 조회 기능.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use stockinfo_core::{ListingRow, MarketSelector};
use stockinfo_data::ListingSource;
use tracing::info;

use crate::display::truncate;

/// 종목 조회 설정.
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// 시장 필터
    pub market: MarketSelector,
    /// 검색 키워드 (회사명 또는 종목코드)
    pub search: Option<String>,
    /// 출력 형식
    pub format: OutputFormat,
    /// 출력 파일 경로
    pub output: Option<PathBuf>,
    /// 최대 결과 수 (0이면 제한 없음)
    pub limit: usize,
}

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 출력용 종목 정보.
#[derive(Debug, Clone, Serialize)]
pub struct ListedSymbol {
    pub name: String,
    pub code: String,
    pub market: String,
    /// 시장이 지정된 경우에만 채워짐
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yahoo_symbol: Option<String>,
}

impl ListedSymbol {
    fn from_row(row: &ListingRow, market: MarketSelector) -> Self {
        let yahoo_symbol = market
            .ticker_suffix()
            .ok()
            .map(|suffix| format!("{}{}", row.security_code, suffix));

        Self {
            name: row.company_name.clone(),
            code: row.security_code.to_string(),
            market: market.label().to_string(),
            yahoo_symbol,
        }
    }
}

/// 종목 목록 조회.
pub async fn list_symbols<S: ListingSource + ?Sized>(
    config: &ListConfig,
    source: &S,
) -> Result<usize> {
    info!(market = %config.market, "Querying listing...");
    let table = source.resolve(config.market).await?;

    let rows: Vec<&ListingRow> = match config.search.as_deref() {
        Some(query) => table.search(query),
        None => table.iter().collect(),
    };

    let symbols: Vec<ListedSymbol> = rows
        .into_iter()
        .take(if config.limit > 0 { config.limit } else { usize::MAX })
        .map(|row| ListedSymbol::from_row(row, config.market))
        .collect();

    info!("Found {} symbols", symbols.len());

    output_symbols(&symbols, config.format, config.output.as_ref())?;

    Ok(symbols.len())
}

/// 종목 목록 출력.
fn output_symbols(
    symbols: &[ListedSymbol],
    format: OutputFormat,
    output_path: Option<&PathBuf>,
) -> Result<()> {
    let content = match format {
        OutputFormat::Table => format_table(symbols),
        OutputFormat::Csv => format_csv(symbols)?,
        OutputFormat::Json => format_json(symbols)?,
    };

    // 파일 또는 stdout에 출력
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// 테이블 형식 출력.
pub fn format_table(symbols: &[ListedSymbol]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<8} {:<40} {:<8} {:<12}\n",
        "CODE", "NAME", "MARKET", "YAHOO_SYMBOL"
    ));
    output.push_str(&"-".repeat(71));
    output.push('\n');

    for symbol in symbols {
        output.push_str(&format!(
            "{:<8} {:<40} {:<8} {:<12}\n",
            symbol.code,
            truncate(&symbol.name, 40),
            symbol.market,
            symbol.yahoo_symbol.as_deref().unwrap_or("-"),
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} symbols", symbols.len()));

    output
}

/// CSV 형식 출력.
pub fn format_csv(symbols: &[ListedSymbol]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "code", "market", "yahoo_symbol"])?;

    for symbol in symbols {
        writer.write_record([
            symbol.name.as_str(),
            symbol.code.as_str(),
            symbol.market.as_str(),
            symbol.yahoo_symbol.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV 버퍼 오류: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV 인코딩 오류")
}

/// JSON 형식 출력.
pub fn format_json(symbols: &[ListedSymbol]) -> Result<String> {
    serde_json::to_string_pretty(symbols).context("Failed to serialize to JSON")
}
