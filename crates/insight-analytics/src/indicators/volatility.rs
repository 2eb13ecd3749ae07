//! 변동성 지표 (Volatility Indicators).
//!
//! 가격 변동성을 측정하는 지표를 제공합니다.
//! - Bollinger Bands (볼린저 밴드)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::trend::{SmaParams, TrendIndicators};

/// 데이터 부족 시 사용하는 합성 밴드 폭 (±2%).
const SYNTHETIC_BAND_UPPER: Decimal = dec!(1.02);
const SYNTHETIC_BAND_LOWER: Decimal = dec!(0.98);

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 표준편차 배수 (기본: 2.0).
    pub std_dev_multiplier: Decimal,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: dec!(2.0),
        }
    }
}

/// 볼린저 밴드 결과.
///
/// 항상 `upper >= middle >= lower`를 만족합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BollingerBandsResult {
    /// 상단 밴드 (MA + k × σ).
    pub upper: Decimal,
    /// 중간 밴드 (이동평균).
    pub middle: Decimal,
    /// 하단 밴드 (MA - k × σ).
    pub lower: Decimal,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators {
    trend: TrendIndicators,
}

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 볼린저 밴드 계산.
    ///
    /// 상단 밴드 = MA + (k × σ)
    /// 중간 밴드 = MA (이동평균)
    /// 하단 밴드 = MA - (k × σ)
    ///
    /// σ는 최근 period개 가격의 모표준편차입니다.
    /// 데이터가 기간보다 짧으면 표준편차 대신 중간 밴드의 ±2%를 사용합니다.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> BollingerBandsResult {
        let period = params.period;
        let middle = self.trend.sma(prices, SmaParams { period });

        if period == 0 || prices.len() < period {
            return BollingerBandsResult {
                upper: saturating_mul(middle, SYNTHETIC_BAND_UPPER),
                middle,
                lower: saturating_mul(middle, SYNTHETIC_BAND_LOWER),
            };
        }

        let window = &prices[prices.len() - period..];
        let sigma = population_std_dev(window, middle);

        // 배수가 음수로 설정되어도 밴드 순서가 뒤집히지 않도록 절대값 사용
        let deviation = saturating_mul(params.std_dev_multiplier.abs(), sigma);

        BollingerBandsResult {
            upper: middle.checked_add(deviation).unwrap_or(Decimal::MAX),
            middle,
            lower: middle.checked_sub(deviation).unwrap_or(Decimal::MIN),
        }
    }
}

/// 모표준편차.
///
/// 편차를 구간 내 최대 절대값으로 나눈 상대 편차로 분산을 구한 뒤 다시 곱합니다.
/// 상대 편차는 절대값이 2 이하이므로 큰 가격에서도 제곱 합이 넘치지 않습니다.
fn population_std_dev(window: &[Decimal], mean: Decimal) -> Decimal {
    let scale = window
        .iter()
        .map(|p| p.abs())
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(mean.abs());
    if scale.is_zero() || window.is_empty() {
        return Decimal::ZERO;
    }

    let scaled_mean = mean / scale;
    let variance = window
        .iter()
        .map(|&p| {
            let diff = p / scale - scaled_mean;
            diff * diff
        })
        .sum::<Decimal>()
        / Decimal::from(window.len());

    saturating_mul(scale, sqrt_decimal(variance))
}

/// 넘치면 부호에 맞는 최대/최소값으로 고정하는 곱셈.
fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(if a.is_sign_negative() == b.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Decimal 제곱근 (Newton-Raphson).
///
/// 0 이하의 입력은 0을 반환합니다.
pub(crate) fn sqrt_decimal(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let two = dec!(2);
    let tolerance = dec!(0.000000000001);
    let mut x = if value > Decimal::ONE {
        value / two
    } else {
        Decimal::ONE
    };

    for _ in 0..100 {
        let next = (x + value / x) / two;
        if (next - x).abs() <= tolerance {
            return next;
        }
        x = next;
    }

    x
}
