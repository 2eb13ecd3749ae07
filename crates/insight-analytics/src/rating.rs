//! 종합 평가 엔진.
//!
//! 현재가, 전일 대비 등락률, 지표 스냅샷을 받아 고정된 규칙으로 투자 의견을 산출합니다.
//! 학습된 모델이 아닌 결정적 규칙 기반 점수기입니다.
//!
//! # 점수 규칙 (기준점 50에서 가감)
//!
//! 1. **RSI**: RSI < 30 (과매도) → +20, RSI > 70 (과매수) → -20
//! 2. **이동평균 정배열**: 현재가 > SMA20 > SMA50 > SMA200 → +25,
//!    현재가 < SMA20 < SMA50 < SMA200 → -25
//!
//! 합계가 기술 점수이며 이 단계에서는 범위를 제한하지 않습니다.
//!
//! # 파생 값
//!
//! | 항목 | 규칙 |
//! |------|------|
//! | 투자 의견 | ≥80 강력매수, ≥65 매수, ≥35 보유, ≥20 매도, 그 외 강력매도 |
//! | 위험도 | \|등락률\| > 5 높음, > 2 보통, 그 외 낮음 |
//! | 신뢰도 | 기술 점수를 [20, 95]로 제한 |
//! | 목표가 | 현재가 × (1 + (점수 - 50) / 200) |
//! | 심리 | ≥80 매우 긍정, ≥60 긍정, ≥40 중립, ≥20 부정, 그 외 매우 부정 |
//!
//! `fundamental_score`와 `market_score`는 실제 재무/시장 데이터가 아니라
//! 기술 점수에 잡음을 더한 합성 값입니다 (각각 ×0.9, ×1.1, 잡음 ±5).

use std::fmt;

use insight_core::{DecimalExt, MarketContext, Price};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::{IndicatorSnapshot, TrendIndicators};
use crate::random::RandomSource;

/// 기준 점수.
pub const BASE_SCORE: i32 = 50;
/// RSI 과매도 경계.
pub const RSI_OVERSOLD: Decimal = dec!(30);
/// RSI 과매수 경계.
pub const RSI_OVERBOUGHT: Decimal = dec!(70);

const RSI_WEIGHT: i32 = 20;
const TREND_WEIGHT: i32 = 25;
const CONFIDENCE_MIN: i32 = 20;
const CONFIDENCE_MAX: i32 = 95;
const FUNDAMENTAL_FACTOR: Decimal = dec!(0.9);
const MARKET_FACTOR: Decimal = dec!(1.1);
const NOISE_SCALE: Decimal = dec!(10);
const HIGH_RISK_CHANGE: Decimal = dec!(5);
const MEDIUM_RISK_CHANGE: Decimal = dec!(2);

/// 투자 의견.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallRating {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl OverallRating {
    /// 기술 점수로부터 투자 의견을 결정합니다.
    ///
    /// 각 구간의 하한은 포함이며 위에서부터 처음 일치하는 구간을 사용합니다.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => Self::StrongBuy,
            s if s >= 65 => Self::Buy,
            s if s >= 35 => Self::Hold,
            s if s >= 20 => Self::Sell,
            _ => Self::StrongSell,
        }
    }
}

impl fmt::Display for OverallRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        };
        f.write_str(label)
    }
}

/// 위험도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// 전일 대비 등락률(%)로부터 위험도를 결정합니다.
    pub fn from_change_percent(change_percent: Decimal) -> Self {
        let magnitude = change_percent.abs();
        if magnitude > HIGH_RISK_CHANGE {
            Self::High
        } else if magnitude > MEDIUM_RISK_CHANGE {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

/// 심리 등급 (5단계).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl SentimentLabel {
    /// 심리 점수로부터 등급을 결정합니다.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => Self::VeryPositive,
            s if s >= 60 => Self::Positive,
            s if s >= 40 => Self::Neutral,
            s if s >= 20 => Self::Negative,
            _ => Self::VeryNegative,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::VeryNegative => "Very Negative",
        };
        f.write_str(label)
    }
}

/// 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// RSI 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    /// RSI < 30
    Oversold,
    /// RSI > 70
    Overbought,
    /// 30 ≤ RSI ≤ 70
    Neutral,
}

impl RsiZone {
    /// RSI 값의 구간.
    pub fn of(rsi: Decimal) -> Self {
        if rsi < RSI_OVERSOLD {
            Self::Oversold
        } else if rsi > RSI_OVERBOUGHT {
            Self::Overbought
        } else {
            Self::Neutral
        }
    }
}

/// 현재가와 이동평균들의 배열 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendAlignment {
    /// 현재가 > SMA20 > SMA50 > SMA200
    Up,
    /// 현재가 < SMA20 < SMA50 < SMA200
    Down,
    /// 그 외
    Mixed,
}

impl TrendAlignment {
    /// 스냅샷의 이동평균으로 배열 상태를 판정합니다.
    ///
    /// 평가 엔진이 내부에서 사용하는 판정과 동일합니다.
    pub fn evaluate(price: Price, snapshot: &IndicatorSnapshot) -> Self {
        let trend = TrendIndicators::new();
        let averages = [snapshot.sma20, snapshot.sma50, snapshot.sma200];

        if trend.is_stacked_above(price, &averages) {
            Self::Up
        } else if trend.is_stacked_below(price, &averages) {
            Self::Down
        } else {
            Self::Mixed
        }
    }
}

/// 심리 점수와 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    /// 심리 점수 (기술 점수와 동일)
    pub score: i32,
    /// 심리 등급
    pub label: SentimentLabel,
}

/// 종합 평가 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    /// 투자 의견
    pub overall_rating: OverallRating,
    /// 신뢰도 (20-95)
    pub confidence: i32,
    /// 위험도
    pub risk_level: RiskLevel,
    /// 목표가
    pub price_target: Decimal,
    /// 판단 근거 (항상 5개)
    pub key_factors: Vec<String>,
    /// 심리
    pub sentiment: Sentiment,
    /// 기술 점수
    pub technical_score: i32,
    /// 합성 펀더멘털 점수 (기술 점수 × 0.9 + 잡음)
    pub fundamental_score: i32,
    /// 합성 시장 점수 (기술 점수 × 1.1 + 잡음)
    pub market_score: i32,
}

/// 종합 평가 엔진.
#[derive(Debug, Default)]
pub struct RatingEngine;

impl RatingEngine {
    /// 새 평가 엔진 생성.
    pub fn new() -> Self {
        Self
    }

    /// 지표 스냅샷과 시장 컨텍스트로 종합 평가를 산출합니다.
    ///
    /// 난수는 합성 점수의 잡음에만 쓰입니다 (펀더멘털, 시장 순으로 2회 추출).
    pub fn rate(
        &self,
        context: &MarketContext,
        snapshot: &IndicatorSnapshot,
        rng: &mut dyn RandomSource,
    ) -> RatingResult {
        let price = context.current_price;
        let rsi_zone = RsiZone::of(snapshot.rsi);
        let alignment = TrendAlignment::evaluate(price, snapshot);

        let (technical_score, trend) = self.technical_score(rsi_zone, alignment);

        let overall_rating = OverallRating::from_score(technical_score);
        let risk_level = RiskLevel::from_change_percent(context.change_percent);
        let confidence = technical_score.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
        let price_target = self.price_target(price, technical_score);
        let sentiment = Sentiment {
            score: technical_score,
            label: SentimentLabel::from_score(technical_score),
        };

        let key_factors = self.key_factors(context, snapshot, rsi_zone, trend);

        let fundamental_score = self.synthetic_score(technical_score, FUNDAMENTAL_FACTOR, rng);
        let market_score = self.synthetic_score(technical_score, MARKET_FACTOR, rng);

        debug!(
            technical_score,
            rating = %overall_rating,
            risk = %risk_level,
            trend = %trend,
            "Rating computed"
        );

        RatingResult {
            overall_rating,
            confidence,
            risk_level,
            price_target,
            key_factors,
            sentiment,
            technical_score,
            fundamental_score,
            market_score,
        }
    }

    /// 기술 점수와 파생 추세를 계산합니다.
    ///
    /// 추세는 RSI 규칙으로 먼저 정해지고, 이동평균 배열 규칙이 적용되면 덮어씁니다.
    pub fn technical_score(&self, rsi_zone: RsiZone, alignment: TrendAlignment) -> (i32, Trend) {
        let mut score = BASE_SCORE;
        let mut trend = Trend::Neutral;

        match rsi_zone {
            RsiZone::Oversold => {
                score += RSI_WEIGHT;
                trend = Trend::Bullish;
            }
            RsiZone::Overbought => {
                score -= RSI_WEIGHT;
                trend = Trend::Bearish;
            }
            RsiZone::Neutral => {}
        }

        match alignment {
            TrendAlignment::Up => {
                score += TREND_WEIGHT;
                trend = Trend::Bullish;
            }
            TrendAlignment::Down => {
                score -= TREND_WEIGHT;
                trend = Trend::Bearish;
            }
            TrendAlignment::Mixed => {}
        }

        (score, trend)
    }

    /// 목표가 = 현재가 × (1 + (점수 - 50) / 200)
    pub fn price_target(&self, price: Price, technical_score: i32) -> Price {
        let offset = Decimal::from(technical_score - BASE_SCORE) / dec!(200);
        price * (Decimal::ONE + offset)
    }

    fn synthetic_score(
        &self,
        technical_score: i32,
        factor: Decimal,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        let noise = rng.perturbation() * NOISE_SCALE;
        (Decimal::from(technical_score) * factor + noise).to_rounded_i32()
    }

    /// 판단 근거 5개를 생성합니다.
    ///
    /// RSI 상태, 20일선 대비 위치, 추세, 거래량, 52주 범위 내 위치 순입니다.
    fn key_factors(
        &self,
        context: &MarketContext,
        snapshot: &IndicatorSnapshot,
        rsi_zone: RsiZone,
        trend: Trend,
    ) -> Vec<String> {
        let rsi_state = match rsi_zone {
            RsiZone::Oversold => "oversold conditions",
            RsiZone::Overbought => "overbought conditions",
            RsiZone::Neutral => "neutral momentum",
        };

        let price = context.current_price;
        let sma_position = if price > snapshot.sma20 {
            "above"
        } else if price < snapshot.sma20 {
            "below"
        } else {
            "at"
        };

        let volume_factor = if snapshot.avg_volume > Decimal::ZERO {
            let ratio = context.volume / snapshot.avg_volume;
            let relation = if ratio > Decimal::ONE {
                "above"
            } else if ratio < Decimal::ONE {
                "below"
            } else {
                "in line with"
            };
            format!("Volume is {} average ({:.2}x)", relation, ratio)
        } else {
            "No average volume available for comparison".to_string()
        };

        vec![
            format!("RSI at {:.1} indicates {}", snapshot.rsi, rsi_state),
            format!(
                "Price is {} the 20-day moving average (${:.2})",
                sma_position, snapshot.sma20
            ),
            format!("Overall trend is {}", trend),
            volume_factor,
            format!(
                "Trading at {}% of 52-week range",
                range_position(price, context.low_52w, context.high_52w)
            ),
        ]
    }
}

/// 52주 범위 내 위치 (%, 정수 반올림).
///
/// 고가와 저가가 같으면 50%로 간주합니다.
pub fn range_position(price: Price, low: Price, high: Price) -> i32 {
    if high <= low {
        return 50;
    }
    ((price - low) / (high - low) * dec!(100)).to_rounded_i32()
}
