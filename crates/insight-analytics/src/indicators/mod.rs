//! 기술적 지표 모듈.
//!
//! 가격 시계열로부터 대시보드에 표시되는 기술적 지표를 계산합니다.
//! 모든 함수는 순수 함수이며 공유 가변 상태가 없어 여러 스레드에서 동시에 호출할 수 있습니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **EMA**: 지수 이동평균 (Exponential Moving Average)
//! - **MACD**: 이동평균 수렴/확산 (Moving Average Convergence Divergence)
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (Relative Strength Index)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Bollinger Bands**: 볼린저 밴드
//!
//! # 짧은 시계열
//!
//! 어떤 지표도 데이터 부족으로 실패하지 않습니다. 상장 직후 종목처럼 이력이 짧아도
//! 항상 완전한 스냅샷을 만들 수 있도록 각 지표는 정의된 중립값/합성값으로 대체됩니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! use insight_analytics::indicators::{IndicatorEngine, SmaParams, RsiParams};
//!
//! let engine = IndicatorEngine::new();
//!
//! let sma = engine.sma(&prices, SmaParams { period: 20 });
//! let rsi = engine.rsi(&prices, RsiParams { period: 14 });
//!
//! // 전체 스냅샷
//! let snapshot = engine.compute(&series);
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use insight_core::{AnalysisConfig, PriceSeries};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use momentum::{MomentumCalculator, RsiParams, NEUTRAL_RSI};
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{BollingerBandsParams, BollingerBandsResult, VolatilityIndicators};

/// 단기 이동평균 기간.
pub const SMA_SHORT: usize = 20;
/// 중기 이동평균 기간.
pub const SMA_MEDIUM: usize = 50;
/// 장기 이동평균 기간.
pub const SMA_LONG: usize = 200;

/// 스냅샷 계산 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// RSI 파라미터
    pub rsi: RsiParams,
    /// MACD 파라미터
    pub macd: MacdParams,
    /// 볼린저 밴드 파라미터
    pub bollinger: BollingerBandsParams,
    /// 평균 거래량 계산 구간 (0이면 전체 시계열)
    pub volume_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi: RsiParams::default(),
            macd: MacdParams::default(),
            bollinger: BollingerBandsParams::default(),
            volume_window: 20,
        }
    }
}

impl From<&AnalysisConfig> for IndicatorParams {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            rsi: RsiParams {
                period: config.rsi_period,
            },
            macd: MacdParams::default(),
            bollinger: BollingerBandsParams {
                period: config.bollinger_period,
                std_dev_multiplier: config.bollinger_multiplier,
            },
            volume_window: config.volume_window,
        }
    }
}

/// 한 시점의 지표 스냅샷.
///
/// 요청마다 시계열로부터 새로 계산되며 저장되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    /// RSI (0-100)
    pub rsi: Decimal,
    /// MACD
    pub macd: MacdResult,
    /// 볼린저 밴드
    pub bollinger: BollingerBandsResult,
    /// 20일 단순 이동평균
    pub sma20: Decimal,
    /// 50일 단순 이동평균
    pub sma50: Decimal,
    /// 200일 단순 이동평균
    pub sma200: Decimal,
    /// 최근 거래량
    pub volume: Decimal,
    /// 평균 거래량
    pub avg_volume: Decimal,
}

/// 통합 지표 엔진.
///
/// 모든 기술적 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    params: IndicatorParams,
}

impl IndicatorEngine {
    /// 기본 파라미터로 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지정한 파라미터로 지표 엔진 생성.
    pub fn with_params(params: IndicatorParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// 시계열 전체에 대한 지표 스냅샷을 계산합니다.
    ///
    /// 빈 시계열이면 가격 지표는 0, RSI는 50인 스냅샷을 반환합니다.
    pub fn compute(&self, series: &PriceSeries) -> IndicatorSnapshot {
        let prices = series.prices();
        let volumes = series.volumes();

        let snapshot = IndicatorSnapshot {
            rsi: self.rsi(&prices, self.params.rsi),
            macd: self.macd(&prices, self.params.macd),
            bollinger: self.bollinger_bands(&prices, self.params.bollinger),
            sma20: self.sma(&prices, SmaParams { period: SMA_SHORT }),
            sma50: self.sma(&prices, SmaParams { period: SMA_MEDIUM }),
            sma200: self.sma(&prices, SmaParams { period: SMA_LONG }),
            volume: volumes.last().copied().map(Decimal::from).unwrap_or_default(),
            avg_volume: self.average_volume(&volumes, self.params.volume_window),
        };

        debug!(
            points = prices.len(),
            rsi = %snapshot.rsi,
            sma20 = %snapshot.sma20,
            macd = %snapshot.macd.value,
            "Indicator snapshot computed"
        );

        snapshot
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, prices: &[Decimal], params: SmaParams) -> Decimal {
        self.trend.sma(prices, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> Decimal {
        self.trend.ema(prices, params)
    }

    /// MACD 계산.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> MacdResult {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI 계산.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> Decimal {
        self.momentum.rsi(prices, params)
    }

    // ==================== 변동성 지표 ====================

    /// 볼린저 밴드 계산.
    pub fn bollinger_bands(
        &self,
        prices: &[Decimal],
        params: BollingerBandsParams,
    ) -> BollingerBandsResult {
        self.volatility.bollinger_bands(prices, params)
    }

    // ==================== 거래량 ====================

    /// 최근 `window`개 거래량의 평균.
    ///
    /// `window`가 0이거나 시계열보다 길면 전체 평균, 비어 있으면 0입니다.
    pub fn average_volume(&self, volumes: &[u64], window: usize) -> Decimal {
        if volumes.is_empty() {
            return Decimal::ZERO;
        }

        let start = if window == 0 {
            0
        } else {
            volumes.len().saturating_sub(window)
        };
        let tail = &volumes[start..];

        let sum: Decimal = tail.iter().map(|&v| Decimal::from(v)).sum();
        sum / Decimal::from(tail.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insight_core::PricePoint;
    use rust_decimal_macros::dec;

    fn series_from(prices: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let points = prices.iter().enumerate().map(|(i, &p)| {
            PricePoint::new(
                start + chrono::Duration::days(i as i64),
                p,
                1_000 * (i as u64 + 1),
            )
        });
        PriceSeries::from_points(points).0
    }

    #[test]
    fn test_snapshot_of_empty_series() {
        let engine = IndicatorEngine::new();
        let snapshot = engine.compute(&PriceSeries::default());

        assert_eq!(snapshot.rsi, NEUTRAL_RSI);
        assert_eq!(snapshot.sma20, Decimal::ZERO);
        assert_eq!(snapshot.sma200, Decimal::ZERO);
        assert_eq!(snapshot.macd, MacdResult::default());
        assert_eq!(snapshot.volume, Decimal::ZERO);
        assert_eq!(snapshot.avg_volume, Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_of_single_point() {
        let engine = IndicatorEngine::new();
        let snapshot = engine.compute(&series_from(&[dec!(50)]));

        assert_eq!(snapshot.rsi, NEUTRAL_RSI);
        assert_eq!(snapshot.sma20, dec!(50));
        assert_eq!(snapshot.sma50, dec!(50));
        assert_eq!(snapshot.bollinger.upper, dec!(51));
        assert_eq!(snapshot.bollinger.lower, dec!(49));
        assert_eq!(snapshot.volume, dec!(1000));
        assert_eq!(snapshot.avg_volume, dec!(1000));
    }

    #[test]
    fn test_snapshot_moving_averages() {
        let engine = IndicatorEngine::new();
        let prices: Vec<Decimal> = (1..=60).map(Decimal::from).collect();
        let snapshot = engine.compute(&series_from(&prices));

        // 41..=60 평균 = 50.5, 11..=60 평균 = 35.5
        assert_eq!(snapshot.sma20, dec!(50.5));
        assert_eq!(snapshot.sma50, dec!(35.5));
        // 200일 데이터 부족 → 마지막 가격
        assert_eq!(snapshot.sma200, dec!(60));
    }

    #[test]
    fn test_average_volume_window() {
        let engine = IndicatorEngine::new();
        let volumes = vec![100, 200, 300, 400];

        assert_eq!(engine.average_volume(&volumes, 2), dec!(350));
        assert_eq!(engine.average_volume(&volumes, 0), dec!(250));
        assert_eq!(engine.average_volume(&volumes, 10), dec!(250));
        assert_eq!(engine.average_volume(&[], 20), Decimal::ZERO);
    }

    #[test]
    fn test_params_from_config() {
        let config = AnalysisConfig {
            rsi_period: 21,
            bollinger_period: 10,
            bollinger_multiplier: dec!(2.5),
            volume_window: 0,
            range_window: 252,
        };
        let params = IndicatorParams::from(&config);

        assert_eq!(params.rsi.period, 21);
        assert_eq!(params.bollinger.period, 10);
        assert_eq!(params.bollinger.std_dev_multiplier, dec!(2.5));
        assert_eq!(params.volume_window, 0);
        assert_eq!(params.macd.slow_period, 26);
    }
}
