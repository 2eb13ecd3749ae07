//! 분석 파이프라인.
//!
//! 원시 샘플 검증 → 지표 계산 → 종합 평가 → 가격 예측을 한 번의 호출로 묶습니다.

use insight_core::{
    AnalysisConfig, MarketContext, PriceSeries, RawSample, SeriesValidator, ValidationReport,
    TRADING_DAYS_PER_YEAR,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::indicators::{IndicatorEngine, IndicatorParams, IndicatorSnapshot};
use crate::prediction::{predict, Prediction};
use crate::random::RandomSource;
use crate::rating::{RatingEngine, RatingResult};

/// 종목 하나에 대한 분석 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// 지표 스냅샷
    pub snapshot: IndicatorSnapshot,
    /// 종합 평가
    pub rating: RatingResult,
    /// 가격 예측
    pub prediction: Prediction,
    /// 현재가, 등락률, 52주 범위
    pub context: MarketContext,
    /// 입력 검증 결과
    pub validation: ValidationReport,
}

/// 분석기.
#[derive(Debug)]
pub struct Analyzer {
    validator: SeriesValidator,
    indicators: IndicatorEngine,
    rating: RatingEngine,
    range_window: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            validator: SeriesValidator::new(),
            indicators: IndicatorEngine::new(),
            rating: RatingEngine::new(),
            range_window: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl Analyzer {
    /// 기본 파라미터로 분석기 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정값으로 분석기 생성.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            indicators: IndicatorEngine::with_params(IndicatorParams::from(config)),
            range_window: config.range_window,
            ..Self::default()
        }
    }

    /// 원시 샘플을 검증한 뒤 분석합니다.
    ///
    /// 검증 후 남은 샘플이 없으면 `None`을 반환합니다.
    #[instrument(skip_all, fields(samples = raw.len()))]
    pub fn analyze(
        &self,
        raw: &[RawSample],
        rng: &mut dyn RandomSource,
    ) -> Option<AnalysisReport> {
        let (series, validation) = self.validator.validate(raw);

        if series.is_empty() {
            warn!(
                dropped_price = validation.dropped_price,
                dropped_volume = validation.dropped_volume,
                "No valid samples to analyze"
            );
            return None;
        }

        self.analyze_validated(&series, validation, rng)
    }

    /// 이미 검증된 시계열을 분석합니다.
    pub fn analyze_series(
        &self,
        series: &PriceSeries,
        rng: &mut dyn RandomSource,
    ) -> Option<AnalysisReport> {
        let validation = ValidationReport {
            accepted: series.len(),
            ..ValidationReport::default()
        };
        self.analyze_validated(series, validation, rng)
    }

    fn analyze_validated(
        &self,
        series: &PriceSeries,
        validation: ValidationReport,
        rng: &mut dyn RandomSource,
    ) -> Option<AnalysisReport> {
        let context = series.market_context(self.range_window)?;
        let snapshot = self.indicators.compute(series);
        let rating = self.rating.rate(&context, &snapshot, rng);
        let prediction = predict(context.current_price, &snapshot, &rating, rng);

        info!(
            points = series.len(),
            price = %context.current_price,
            rating = %rating.overall_rating,
            score = rating.technical_score,
            "Analysis complete"
        );

        Some(AnalysisReport {
            snapshot,
            rating,
            prediction,
            context,
            validation,
        })
    }
}
