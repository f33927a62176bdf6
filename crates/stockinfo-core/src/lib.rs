//! # Stock Info Core
//!
//! 주식 정보 조회 도구의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 시장 구분, 종목코드, 티커 심볼 타입
//! - 상장 종목 테이블과 가격 시계열
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
