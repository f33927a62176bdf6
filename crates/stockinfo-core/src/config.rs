//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → `STOCKINFO__` 환경 변수 순으로 덮어씁니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 상장 종목 목록(KIND) 설정
    pub listing: ListingConfig,
    /// 가격 데이터 Provider 설정
    pub provider: ProviderConfig,
    /// 차트 렌더링 설정
    pub chart: RenderConfig,
    /// 내보내기 설정
    pub export: ExportConfig,
    /// CLI 입력 기본값
    pub defaults: DefaultsConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// KIND 상장법인 목록 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    /// 목록 다운로드 엔드포인트
    pub base_url: String,
    /// `method` 쿼리 파라미터
    pub method: String,
    /// 회사명 열 헤더
    pub name_column: String,
    /// 종목코드 열 헤더
    pub code_column: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://kind.krx.co.kr/corpgeneral/corpList.do".to_string(),
            method: "download".to_string(),
            name_column: "회사명".to_string(),
            code_column: "종목코드".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

/// 가격 데이터 Provider 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// 거래소 시간대 (IANA 이름)
    pub timezone: String,
    /// 캔들 간격
    pub interval: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Seoul".to_string(),
            interval: "1d".to_string(),
        }
    }
}

impl ProviderConfig {
    /// 설정된 시간대를 파싱합니다.
    pub fn tz(&self) -> Result<chrono_tz::Tz, crate::StockInfoError> {
        self.timezone.parse().map_err(|_| {
            crate::StockInfoError::Config(format!("Unknown timezone: {}", self.timezone))
        })
    }
}

/// 차트 렌더링 설정.
///
/// 글꼴, 마이너스 기호 등 표현 관련 상태는 전역이 아니라 이 값으로 렌더러에 전달됩니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 차트 제목
    pub title: String,
    /// X축 라벨
    pub x_label: String,
    /// Y축 라벨
    pub y_label: String,
    /// 글꼴 이름
    pub font_family: String,
    /// 제목 글꼴 크기
    pub title_font_size: u32,
    /// 축 라벨 글꼴 크기
    pub label_font_size: u32,
    /// 눈금 글꼴 크기
    pub tick_font_size: u32,
    /// 가로 크기 (px)
    pub width: u32,
    /// 세로 크기 (px)
    pub height: u32,
    /// 격자 표시 여부
    pub show_grid: bool,
    /// 음수에 유니코드 마이너스(U+2212) 대신 ASCII `-` 사용
    pub ascii_minus: bool,
    /// 선 색상 (RGB)
    pub line_rgb: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "주가(종가) 그래프".to_string(),
            x_label: "기간".to_string(),
            y_label: "주가(원)".to_string(),
            font_family: "Malgun Gothic".to_string(),
            title_font_size: 30,
            label_font_size: 20,
            tick_font_size: 15,
            width: 1500,
            height: 500,
            show_grid: true,
            ascii_minus: true,
            line_rgb: [31, 119, 180],
        }
    }
}

/// 내보내기 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// 출력 디렉토리
    pub output_dir: String,
    /// CSV 파일명
    pub csv_file_name: String,
    /// 엑셀 파일명
    pub xlsx_file_name: String,
    /// 차트 미리보기 파일명
    pub chart_file_name: String,
    /// 화면에 표시할 행 수
    pub preview_rows: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            csv_file_name: "stock_data.csv".to_string(),
            xlsx_file_name: "stock_data.xlsx".to_string(),
            chart_file_name: "stock_chart.svg".to_string(),
            preview_rows: 5,
        }
    }
}

/// CLI 입력 기본값.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// 시장 (kospi, kosdaq)
    pub market: String,
    /// 회사 이름
    pub company: String,
    /// 시작일
    pub start: NaiveDate,
    /// 종료일 (포함)
    pub end: NaiveDate,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            market: "kospi".to_string(),
            company: "NAVER".to_string(),
            start: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2021, 12, 31).unwrap_or_default(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아니며, 없는 키는 기본값으로 채워집니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("STOCKINFO")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
