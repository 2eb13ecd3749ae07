//! # Insight Core
//!
//! 주가 분석 대시보드의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 분석 엔진 전반에서 사용되는 기본 타입을 제공합니다:
//! - 가격 시계열 (`PricePoint`, `PriceSeries`) 및 원시 샘플 검증
//! - 52주 범위, 등락률 등 시장 컨텍스트
//! - 설정 관리
//! - 로깅 인프라
//! - 에러 타입

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
