//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)
//!
//! 모든 함수는 시계열의 **마지막 시점** 값 하나를 반환하며,
//! 데이터가 기간보다 짧아도 실패하지 않고 정의된 대체값을 돌려줍니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26). 데이터가 이보다 짧으면 MACD는 0.
    pub slow_period: usize,
    /// 시그널 비율 (기본: 0.9). 시그널 = MACD × 비율.
    pub signal_ratio: Decimal,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_ratio: dec!(0.9),
        }
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub value: Decimal,
    /// 시그널 라인 (MACD × 시그널 비율).
    pub signal: Decimal,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Decimal,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n (최근 n개)
    ///
    /// 데이터가 기간보다 짧으면 마지막 가격을, 비어 있으면 0을 반환합니다.
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> Decimal {
        let period = params.period;

        if period == 0 || prices.len() < period {
            return last_or_zero(prices);
        }

        let window = &prices[prices.len() - period..];
        let divisor = Decimal::from(period);
        match window
            .iter()
            .try_fold(Decimal::ZERO, |acc, &p| acc.checked_add(p))
        {
            Some(sum) => sum / divisor,
            // 합계가 넘치는 큰 가격은 나눈 뒤 더함
            None => window.iter().map(|&p| p / divisor).sum(),
        }
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k))
    /// k = 2 / (period + 1)
    ///
    /// 첫 번째 가격으로 시작하여 전체 시계열에 걸쳐 전파합니다
    /// (처음 period개 평균으로 시작하지 않음).
    /// 데이터가 기간보다 짧으면 마지막 가격을, 비어 있으면 0을 반환합니다.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> Decimal {
        let period = params.period;

        if period == 0 || prices.len() < period {
            return last_or_zero(prices);
        }

        let multiplier = dec!(2) / Decimal::from(period + 1);
        let one_minus = Decimal::ONE - multiplier;

        prices[1..]
            .iter()
            .fold(prices[0], |ema, &price| price * multiplier + ema * one_minus)
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인 × 0.9
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// 시그널 라인은 MACD 이력의 9일 EMA가 아니라 현재 MACD 값의 고정 비율입니다.
    /// 대시보드에 표시되던 값과 같도록 이 단순화를 유지합니다.
    /// 데이터가 장기 기간보다 짧으면 모두 0입니다.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> MacdResult {
        if prices.len() < params.slow_period {
            return MacdResult::default();
        }

        let fast = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        );
        let slow = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        );

        let value = fast - slow;
        let signal = value * params.signal_ratio;

        MacdResult {
            value,
            signal,
            histogram: value - signal,
        }
    }

    /// 가격이 이동평균들 위로 정배열되어 있는지 확인합니다.
    ///
    /// `price > averages[0] > averages[1] > ...` (모두 엄격한 부등호)
    pub fn is_stacked_above(&self, price: Decimal, averages: &[Decimal]) -> bool {
        std::iter::once(&price)
            .chain(averages)
            .zip(averages)
            .all(|(upper, lower)| upper > lower)
    }

    /// 가격이 이동평균들 아래로 역배열되어 있는지 확인합니다.
    ///
    /// `price < averages[0] < averages[1] < ...` (모두 엄격한 부등호)
    pub fn is_stacked_below(&self, price: Decimal, averages: &[Decimal]) -> bool {
        std::iter::once(&price)
            .chain(averages)
            .zip(averages)
            .all(|(lower, upper)| lower < upper)
    }
}

fn last_or_zero(prices: &[Decimal]) -> Decimal {
    prices.last().copied().unwrap_or(Decimal::ZERO)
}
