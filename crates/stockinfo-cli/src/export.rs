//! 가격 데이터 내보내기 (CSV, 엑셀).
//!
//! 두 형식 모두 먼저 메모리 버퍼로 만든 뒤 파일로 씁니다.
//! 엑셀은 시간대가 있는 날짜를 받지 못하므로 시간대를 제거한 시계열만 받습니다.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use stockinfo_core::{ExportConfig, NaivePriceSeries, PriceSeries};
use tracing::info;

/// 내보내기 열 이름.
pub const PRICE_COLUMNS: [&str; 8] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Dividends",
    "Stock Splits",
];

/// CSV 날짜 형식 (시간대 오프셋 포함).
const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// 엑셀 날짜 셀 형식.
const XLSX_DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// 저장된 파일 경로.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub xlsx: PathBuf,
}

/// CSV 텍스트 생성.
pub fn to_csv(series: &PriceSeries) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PRICE_COLUMNS)?;

    for bar in series.bars() {
        writer.write_record([
            bar.timestamp.format(CSV_DATE_FORMAT).to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
            bar.dividends.to_string(),
            bar.stock_splits.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV 버퍼 오류: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV 인코딩 오류")
}

/// 엑셀(xlsx) 바이너리 생성.
pub fn to_xlsx(series: &NaivePriceSeries) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(XLSX_DATE_FORMAT);

    let worksheet = workbook.add_worksheet();

    for (col, name) in PRICE_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, bar) in series.bars().iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_datetime_with_format(row, 0, &bar.timestamp, &date_format)?;
        worksheet.write_number(row, 1, bar.open)?;
        worksheet.write_number(row, 2, bar.high)?;
        worksheet.write_number(row, 3, bar.low)?;
        worksheet.write_number(row, 4, bar.close)?;
        worksheet.write_number(row, 5, bar.volume as f64)?;
        worksheet.write_number(row, 6, bar.dividends)?;
        worksheet.write_number(row, 7, bar.stock_splits)?;
    }

    worksheet.set_column_width(0, 20)?;

    let buffer = workbook.save_to_buffer()?;
    Ok(buffer)
}

/// CSV와 엑셀 파일을 출력 디렉토리에 저장.
pub fn write_exports(
    series: &PriceSeries,
    output_dir: &Path,
    config: &ExportConfig,
) -> Result<ExportPaths> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    let csv_path = output_dir.join(&config.csv_file_name);
    let csv_data = to_csv(series)?;
    std::fs::write(&csv_path, csv_data)
        .with_context(|| format!("Failed to write CSV: {}", csv_path.display()))?;

    let xlsx_path = output_dir.join(&config.xlsx_file_name);
    let xlsx_data = to_xlsx(&series.to_naive())?;
    std::fs::write(&xlsx_path, xlsx_data)
        .with_context(|| format!("Failed to write XLSX: {}", xlsx_path.display()))?;

    info!(
        csv = %csv_path.display(),
        xlsx = %xlsx_path.display(),
        rows = series.len(),
        "내보내기 완료"
    );

    Ok(ExportPaths {
        csv: csv_path,
        xlsx: xlsx_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Seoul;
    use stockinfo_core::{MarketSelector, PriceBar, SecurityCode, TickerSymbol};

    fn series() -> PriceSeries {
        let ticker =
            TickerSymbol::new(SecurityCode::parse("035420").unwrap(), MarketSelector::Primary)
                .unwrap();
        let bar = |d: u32, close: f64| PriceBar {
            timestamp: Seoul.with_ymd_and_hms(2019, 1, d, 0, 0, 0).unwrap(),
            open: close - 500.0,
            high: close + 1000.0,
            low: close - 1000.0,
            close,
            adj_close: close,
            volume: 412_345,
            dividends: 0.0,
            stock_splits: 0.0,
        };
        PriceSeries::new(ticker, vec![bar(2, 121_500.0), bar(3, 118_000.0)])
    }

    #[test]
    fn test_csv_keeps_timezone() {
        let csv = to_csv(&series()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Date,Open,High,Low,Close,Volume,Dividends,Stock Splits");
        assert_eq!(
            lines[1],
            "2019-01-02 00:00:00+09:00,121000,122500,120500,121500,412345,0,0"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_xlsx_is_zip_container() {
        let bytes = to_xlsx(&series().to_naive()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_exports() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");

        let paths = write_exports(&series(), &out, &ExportConfig::default()).unwrap();

        assert_eq!(paths.csv.file_name().unwrap(), "stock_data.csv");
        assert_eq!(paths.xlsx.file_name().unwrap(), "stock_data.xlsx");
        assert!(std::fs::read_to_string(&paths.csv)
            .unwrap()
            .contains("+09:00"));
        assert!(std::fs::metadata(&paths.xlsx).unwrap().len() > 0);
    }
}
