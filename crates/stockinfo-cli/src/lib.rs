//! KRX 상장 종목 조회 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 회사명 → Yahoo Finance 티커 변환
//! - 가격 이력 조회 및 화면 출력
//! - 종가 차트 (SVG)
//! - CSV, 엑셀 내보내기

pub mod chart;
pub mod commands;
pub mod display;
pub mod export;
