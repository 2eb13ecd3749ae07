//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표를 제공합니다.
//! - RSI (Relative Strength Index, Wilder 평활)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 데이터가 부족할 때의 중립 RSI 값.
pub const NEUTRAL_RSI: Decimal = dec!(50);

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 1. 처음 period개 변화량으로 평균 상승/하락폭을 시작합니다.
    /// 2. 이후 변화량마다 `avg = (avg × (period - 1) + 현재값) / period`로 평활합니다.
    /// 3. 평균 하락폭이 0이면 `RS = 평균 상승폭 / 1`로 계산합니다.
    ///    (평균 상승폭이 0인 경우를 따로 처리하지 않으므로 RSI가 100이 아닐 수 있음)
    ///
    /// 데이터가 period + 1개 미만이면 중립값 50을 반환합니다.
    ///
    /// # 반환
    /// 0-100 사이의 마지막 시점 RSI 값
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> Decimal {
        let period = params.period;

        if period == 0 || prices.len() < period + 1 {
            return NEUTRAL_RSI;
        }

        let period_decimal = Decimal::from(period);
        let deltas: Vec<Decimal> = prices.windows(2).map(|w| w[1] - w[0]).collect();

        // 초기 평균 (처음 period개 변화량)
        let (gain_sum, loss_sum) = deltas[..period]
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(gain, loss), &d| {
                (gain + gain_of(d), loss + loss_of(d))
            });
        let mut avg_gain = gain_sum / period_decimal;
        let mut avg_loss = loss_sum / period_decimal;

        // Wilder 평활
        let carry = Decimal::from(period - 1);
        for &delta in &deltas[period..] {
            avg_gain = (avg_gain * carry + gain_of(delta)) / period_decimal;
            avg_loss = (avg_loss * carry + loss_of(delta)) / period_decimal;
        }

        let rs = if avg_loss == Decimal::ZERO {
            avg_gain
        } else {
            avg_gain / avg_loss
        };

        dec!(100) - dec!(100) / (Decimal::ONE + rs)
    }
}

fn gain_of(delta: Decimal) -> Decimal {
    delta.max(Decimal::ZERO)
}

fn loss_of(delta: Decimal) -> Decimal {
    (-delta).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> Vec<Decimal> {
        vec![
            dec!(100.0),
            dec!(102.0),
            dec!(101.0),
            dec!(103.0),
            dec!(105.0),
            dec!(104.0),
            dec!(106.0),
            dec!(108.0),
            dec!(107.0),
            dec!(109.0),
            dec!(111.0),
            dec!(110.0),
            dec!(112.0),
            dec!(114.0),
            dec!(113.0),
            dec!(115.0),
        ]
    }

    #[test]
    fn test_rsi_range() {
        let momentum = MomentumCalculator::new();
        let rsi = momentum.rsi(&sample_prices(), RsiParams::default());

        assert!(rsi >= Decimal::ZERO);
        assert!(rsi <= dec!(100));
        // 상승 우위 시장
        assert!(rsi > dec!(50));
    }

    #[test]
    fn test_rsi_neutral_when_insufficient() {
        let momentum = MomentumCalculator::new();

        // period + 1 = 15개 필요
        let prices: Vec<Decimal> = sample_prices().into_iter().take(14).collect();
        assert_eq!(momentum.rsi(&prices, RsiParams::default()), NEUTRAL_RSI);
        assert_eq!(momentum.rsi(&[], RsiParams::default()), NEUTRAL_RSI);
    }

    #[test]
    fn test_rsi_with_zero_loss_uses_gain_as_rs() {
        let momentum = MomentumCalculator::new();

        // 매일 +3 → 평균 상승폭 3, 평균 하락폭 0 → RS = 3 → RSI = 75
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + 3 * i)).collect();
        assert_eq!(momentum.rsi(&prices, RsiParams::default()), dec!(75));

        // 매일 +1 → RS = 1 → RSI = 50
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();
        assert_eq!(momentum.rsi(&prices, RsiParams::default()), dec!(50));
    }

    #[test]
    fn test_rsi_strictly_decreasing_is_zero() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(500 - 2 * i)).collect();

        assert_eq!(momentum.rsi(&prices, RsiParams::default()), Decimal::ZERO);
    }

    #[test]
    fn test_rsi_large_gains_approach_hundred() {
        let momentum = MomentumCalculator::new();
        let prices: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + 1_000 * i)).collect();

        assert!(momentum.rsi(&prices, RsiParams::default()) > dec!(99.8));
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        let momentum = MomentumCalculator::new();

        // period 2: 변화량 +2, -1, +1
        // 초기: gain = (2 + 0) / 2 = 1, loss = (0 + 1) / 2 = 0.5
        // 평활: gain = (1 × 1 + 1) / 2 = 1, loss = (0.5 × 1 + 0) / 2 = 0.25
        // RS = 4 → RSI = 80
        let prices = vec![dec!(10), dec!(12), dec!(11), dec!(12)];
        assert_eq!(momentum.rsi(&prices, RsiParams { period: 2 }), dec!(80));
    }
}
