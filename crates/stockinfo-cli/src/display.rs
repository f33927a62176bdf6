//! 가격 데이터 화면 출력.

use chrono::DateTime;
use chrono_tz::Tz;
use stockinfo_core::PriceBar;

/// 화면 표시용 날짜 형식.
const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// 회사 헤더 라인.
pub fn company_header(company_name: &str) -> String {
    format!("[{}] 주가 데이터", company_name)
}

/// 가격 행을 고정폭 테이블로 변환.
pub fn format_price_table(bars: &[PriceBar<DateTime<Tz>>]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<26} {:>12} {:>12} {:>12} {:>12} {:>12} {:>10} {:>13}\n",
        "Date", "Open", "High", "Low", "Close", "Volume", "Dividends", "Stock Splits"
    ));
    output.push_str(&"-".repeat(116));
    output.push('\n');

    for bar in bars {
        output.push_str(&format!(
            "{:<26} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12} {:>10.2} {:>13.2}\n",
            bar.timestamp.format(DISPLAY_DATE_FORMAT).to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            bar.dividends,
            bar.stock_splits
        ));
    }

    output
}

/// 문자열 자르기 (UTF-8 안전).
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Seoul;

    #[test]
    fn test_company_header() {
        assert_eq!(company_header("NAVER"), "[NAVER] 주가 데이터");
    }

    #[test]
    fn test_price_table_rows() {
        let bar = PriceBar {
            timestamp: Seoul.with_ymd_and_hms(2019, 1, 2, 0, 0, 0).unwrap(),
            open: 121_000.0,
            high: 122_500.0,
            low: 120_500.0,
            close: 121_500.0,
            adj_close: 121_500.0,
            volume: 412_345,
            dividends: 0.0,
            stock_splits: 0.0,
        };

        let table = format_price_table(&[bar.clone(), bar]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[2].starts_with("2019-01-02 00:00:00+09:00"));
        assert!(lines[2].contains("121500.00"));
        assert!(lines[2].contains("412345"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("삼성전자", 10), "삼성전자");
        assert_eq!(truncate("한국항공우주산업주식회사", 8), "한국항공우...");
    }
}
