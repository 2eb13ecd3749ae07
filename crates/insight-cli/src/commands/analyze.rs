//! 종합 분석 명령.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use anyhow::{bail, Result};
use insight_analytics::{AnalysisReport, Analyzer, RandomSource, SeededRandom, ThreadRandom};
use insight_core::AnalysisConfig;
use tracing::info;

use super::loader::load_samples;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid format: {}. Use: pretty, json", s)),
        }
    }
}

/// 분석 명령 설정.
#[derive(Debug, Clone)]
pub struct AnalyzeCliConfig {
    /// 가격 이력 파일
    pub input: PathBuf,
    /// 출력 형식
    pub format: OutputFormat,
    /// 난수 시드 (없으면 매 실행마다 다른 잡음)
    pub seed: Option<u64>,
    /// 분석 엔진 설정
    pub analysis: AnalysisConfig,
}

/// 파일을 로드하여 분석합니다.
pub fn run_analyze(config: &AnalyzeCliConfig) -> Result<AnalysisReport> {
    let loaded = load_samples(&config.input)?;

    let mut rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let analyzer = Analyzer::from_config(&config.analysis);
    let Some(report) = analyzer.analyze(&loaded.samples, rng.as_mut()) else {
        bail!(
            "No valid price samples in {} ({} rows read)",
            config.input.display(),
            loaded.samples.len()
        );
    };

    info!(
        rating = %report.rating.overall_rating,
        confidence = report.rating.confidence,
        "Analysis finished"
    );

    Ok(report)
}

/// 분석 결과를 지정한 형식의 문자열로 변환합니다.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Pretty => Ok(render_pretty(report)?),
    }
}

/// 사람이 읽기 쉬운 형식의 보고서.
pub fn render_pretty(report: &AnalysisReport) -> Result<String, fmt::Error> {
    let context = &report.context;
    let snapshot = &report.snapshot;
    let rating = &report.rating;
    let prediction = &report.prediction;

    let mut out = String::new();

    writeln!(out, "📊 분석 결과")?;
    writeln!(out, "현재가: {:.2} ({:+.2}%)", context.current_price, context.change_percent)?;
    writeln!(out, "52주 범위: {:.2} ~ {:.2}", context.low_52w, context.high_52w)?;
    writeln!(out)?;

    writeln!(out, "[기술적 지표]")?;
    writeln!(out, "RSI(14): {:.2}", snapshot.rsi)?;
    writeln!(
        out,
        "MACD: {:.4} / 시그널 {:.4} / 히스토그램 {:.4}",
        snapshot.macd.value, snapshot.macd.signal, snapshot.macd.histogram
    )?;
    writeln!(
        out,
        "볼린저 밴드: {:.2} / {:.2} / {:.2}",
        snapshot.bollinger.upper, snapshot.bollinger.middle, snapshot.bollinger.lower
    )?;
    writeln!(
        out,
        "SMA20/50/200: {:.2} / {:.2} / {:.2}",
        snapshot.sma20, snapshot.sma50, snapshot.sma200
    )?;
    writeln!(out, "거래량: {} (평균 {:.0})", snapshot.volume, snapshot.avg_volume)?;
    writeln!(out)?;

    writeln!(out, "[종합 평가]")?;
    writeln!(out, "투자 의견: {}", rating.overall_rating)?;
    writeln!(out, "신뢰도: {}%", rating.confidence)?;
    writeln!(out, "위험도: {}", rating.risk_level)?;
    writeln!(out, "목표가: {:.2}", rating.price_target)?;
    writeln!(
        out,
        "심리: {} ({})",
        rating.sentiment.label, rating.sentiment.score
    )?;
    writeln!(
        out,
        "점수: 기술 {} / 펀더멘털 {} / 시장 {}",
        rating.technical_score, rating.fundamental_score, rating.market_score
    )?;
    for factor in &rating.key_factors {
        writeln!(out, "  - {}", factor)?;
    }
    writeln!(out)?;

    writeln!(out, "[가격 예측]")?;
    writeln!(out, "1일: {:.2}", prediction.next_day)?;
    writeln!(out, "1주: {:.2}", prediction.next_week)?;
    writeln!(out, "1개월: {:.2}", prediction.next_month)?;
    writeln!(out, "추세: {} (신뢰도 {}%)", prediction.trend, prediction.confidence)?;

    if report.validation.has_rejections() {
        writeln!(out)?;
        writeln!(
            out,
            "⚠️  제외된 샘플: 가격 {} / 거래량 {} / 중복 {}",
            report.validation.dropped_price,
            report.validation.dropped_volume,
            report.validation.duplicates
        )?;
    }

    Ok(out)
}
