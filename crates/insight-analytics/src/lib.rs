//! 기술적 지표 및 종합 평가 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 기술적 지표 (RSI, SMA, EMA, MACD, 볼린저 밴드)
//! - 규칙 기반 종합 평가 (투자 의견, 신뢰도, 위험도, 목표가, 판단 근거)
//! - 단기 가격 예측
//! - 검증부터 예측까지 묶은 분석 파이프라인
//!
//! 모든 계산은 동기 순수 함수이며, 무작위성은 [`RandomSource`]를 통해서만 들어옵니다.
//!
//! # Re-exports
//!
//! - [`indicators`]: 지표 계산 (IndicatorEngine, IndicatorSnapshot 등)
//! - [`rating`]: 종합 평가 (RatingEngine, RatingResult 등)
//! - [`prediction`]: 가격 예측
//! - [`analyzer`]: 분석 파이프라인

pub mod analyzer;
pub mod indicators;
pub mod prediction;
pub mod random;
pub mod rating;

use insight_core::{MarketContext, Price, PriceSeries};
use rust_decimal::Decimal;

// Indicators 모듈 re-exports
pub use indicators::{
    // 변동성 지표
    BollingerBandsParams,
    BollingerBandsResult,
    EmaParams,
    IndicatorEngine,
    IndicatorParams,
    IndicatorSnapshot,
    MacdParams,
    MacdResult,
    MomentumCalculator,
    // 모멘텀 지표
    RsiParams,
    // 추세 지표
    SmaParams,
    TrendIndicators,
    VolatilityIndicators,
    NEUTRAL_RSI,
};

// Rating 모듈 re-exports
pub use rating::{
    OverallRating, RatingEngine, RatingResult, RiskLevel, RsiZone, Sentiment, SentimentLabel,
    Trend, TrendAlignment,
};

pub use analyzer::{AnalysisReport, Analyzer};
pub use prediction::{predict, Prediction};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};

/// 기본 파라미터로 시계열의 지표 스냅샷을 계산합니다.
pub fn compute_indicators(series: &PriceSeries) -> IndicatorSnapshot {
    IndicatorEngine::new().compute(series)
}

/// 스칼라 시장 정보와 지표 스냅샷으로 종합 평가를 계산합니다.
///
/// # 인자
///
/// * `current_price` - 현재가
/// * `change_percent` - 전일 대비 등락률 (%)
/// * `snapshot` - 지표 스냅샷
/// * `low_52w`, `high_52w` - 52주 최저/최고가
/// * `volume` - 최근 거래량
/// * `rng` - 합성 점수 잡음용 난수 공급원
pub fn compute_rating(
    current_price: Price,
    change_percent: Decimal,
    snapshot: &IndicatorSnapshot,
    low_52w: Price,
    high_52w: Price,
    volume: Decimal,
    rng: &mut dyn RandomSource,
) -> RatingResult {
    let context = MarketContext {
        current_price,
        change_percent,
        low_52w,
        high_52w,
        volume,
    };
    RatingEngine::new().rate(&context, snapshot, rng)
}

/// 현재가와 평가 결과로 가격 예측을 계산합니다.
pub fn compute_prediction(
    current_price: Price,
    snapshot: &IndicatorSnapshot,
    rating: &RatingResult,
    rng: &mut dyn RandomSource,
) -> Prediction {
    predict(current_price, snapshot, rating, rng)
}
