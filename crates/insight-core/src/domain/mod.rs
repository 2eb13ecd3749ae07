//! 도메인 모델.
//!
//! - [`series`]: 가격 시계열과 시장 컨텍스트
//! - [`validator`]: 원시 샘플 검증 및 정규화

pub mod series;
pub mod validator;

pub use series::{MarketContext, PricePoint, PriceSeries, TRADING_DAYS_PER_YEAR};
pub use validator::{RawSample, SeriesValidator, ValidationReport};
