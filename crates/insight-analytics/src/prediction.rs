//! 단기 가격 예측.
//!
//! 현재가에 RSI 기울기와 무작위 섭동을 더해 1일/1주/1개월 후 가격을 추정합니다.
//! 통계 모델이 아닌 표시용 휴리스틱입니다.
//!
//! | 기간 | 식 |
//! |------|-----|
//! | 1일 | p × (1 + U × 0.03) |
//! | 1주 | p × (1 + (RSI - 50) / 1000 + U × 0.05) |
//! | 1개월 | p × (1 + (RSI - 50) / 500 + U × 0.1) |
//!
//! `U`는 기간마다 새로 추출한 `[-0.5, 0.5)` 섭동입니다.

use insight_core::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::{IndicatorSnapshot, NEUTRAL_RSI};
use crate::random::RandomSource;
use crate::rating::{RatingResult, Trend};

const DAY_NOISE: Decimal = dec!(0.03);
const WEEK_NOISE: Decimal = dec!(0.05);
const MONTH_NOISE: Decimal = dec!(0.1);
const WEEK_RSI_DIVISOR: Decimal = dec!(1000);
const MONTH_RSI_DIVISOR: Decimal = dec!(500);

const BULLISH_SENTIMENT: i32 = 60;
const BEARISH_SENTIMENT: i32 = 40;

/// 기간별 예측 가격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// 1일 후
    pub next_day: Decimal,
    /// 1주 후
    pub next_week: Decimal,
    /// 1개월 후
    pub next_month: Decimal,
    /// 신뢰도 (평가 신뢰도와 동일)
    pub confidence: i32,
    /// 심리 점수 기반 추세
    pub trend: Trend,
}

/// 가격 예측을 계산합니다.
///
/// 난수는 1일, 1주, 1개월 순으로 3회 추출합니다.
pub fn predict(
    current_price: Price,
    snapshot: &IndicatorSnapshot,
    rating: &RatingResult,
    rng: &mut dyn RandomSource,
) -> Prediction {
    let rsi_tilt = snapshot.rsi - NEUTRAL_RSI;

    let next_day = current_price * (Decimal::ONE + rng.perturbation() * DAY_NOISE);
    let next_week = current_price
        * (Decimal::ONE + rsi_tilt / WEEK_RSI_DIVISOR + rng.perturbation() * WEEK_NOISE);
    let next_month = current_price
        * (Decimal::ONE + rsi_tilt / MONTH_RSI_DIVISOR + rng.perturbation() * MONTH_NOISE);

    let trend = sentiment_trend(rating.sentiment.score);

    debug!(
        %current_price,
        %next_day,
        %next_week,
        %next_month,
        trend = %trend,
        "Prediction computed"
    );

    Prediction {
        next_day,
        next_week,
        next_month,
        confidence: rating.confidence,
        trend,
    }
}

/// 심리 점수 ≥ 60 강세, ≤ 40 약세, 그 외 중립.
pub fn sentiment_trend(sentiment_score: i32) -> Trend {
    if sentiment_score >= BULLISH_SENTIMENT {
        Trend::Bullish
    } else if sentiment_score <= BEARISH_SENTIMENT {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}
