//! 지표 스냅샷 명령.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use insight_analytics::{IndicatorEngine, IndicatorParams, IndicatorSnapshot};
use insight_core::{AnalysisConfig, SeriesValidator};

use super::analyze::OutputFormat;
use super::loader::load_samples;

/// 파일을 로드하여 지표 스냅샷을 계산합니다.
///
/// 유효한 샘플이 없어도 실패하지 않고 중립 스냅샷을 반환합니다.
pub fn run_indicators(input: &Path, analysis: &AnalysisConfig) -> Result<IndicatorSnapshot> {
    let loaded = load_samples(input)?;
    let (series, _) = SeriesValidator::new().validate(&loaded.samples);

    let engine = IndicatorEngine::with_params(IndicatorParams::from(analysis));
    Ok(engine.compute(&series))
}

/// 스냅샷을 지정한 형식의 문자열로 변환합니다.
pub fn render(snapshot: &IndicatorSnapshot, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }

    let mut out = String::new();
    writeln!(out, "RSI        {:>12.2}", snapshot.rsi)?;
    writeln!(out, "MACD       {:>12.4}", snapshot.macd.value)?;
    writeln!(out, "  signal   {:>12.4}", snapshot.macd.signal)?;
    writeln!(out, "  hist     {:>12.4}", snapshot.macd.histogram)?;
    writeln!(out, "BB upper   {:>12.2}", snapshot.bollinger.upper)?;
    writeln!(out, "BB middle  {:>12.2}", snapshot.bollinger.middle)?;
    writeln!(out, "BB lower   {:>12.2}", snapshot.bollinger.lower)?;
    writeln!(out, "SMA20      {:>12.2}", snapshot.sma20)?;
    writeln!(out, "SMA50      {:>12.2}", snapshot.sma50)?;
    writeln!(out, "SMA200     {:>12.2}", snapshot.sma200)?;
    writeln!(out, "Volume     {:>12}", snapshot.volume)?;
    writeln!(out, "Avg volume {:>12.0}", snapshot.avg_volume)?;
    Ok(out)
}
