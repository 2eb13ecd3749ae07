//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정 파일(TOML)은 선택 사항이며, `INSIGHT__` 접두사 환경 변수로 덮어쓸 수 있습니다.
//!
//! ```text
//! INSIGHT__ANALYSIS__RSI_PERIOD=21
//! INSIGHT__LOGGING__FORMAT=json
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InsightError, InsightResult};
use crate::logging::LogFormat;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 분석 엔진 설정
    pub analysis: AnalysisConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// 분석 엔진 설정.
///
/// 지표 계산에 쓰이는 기간 값들입니다. 평가 규칙의 임계값은 고정이며 설정 대상이 아닙니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// RSI 기간
    pub rsi_period: usize,
    /// 볼린저 밴드 기간
    pub bollinger_period: usize,
    /// 볼린저 밴드 표준편차 배수
    pub bollinger_multiplier: Decimal,
    /// 평균 거래량 계산 구간 (0이면 전체 시계열)
    pub volume_window: usize,
    /// 52주 고가/저가 계산 구간 (거래일 수)
    pub range_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_multiplier: dec!(2),
            volume_window: 20,
            range_window: 252,
        }
    }
}

impl AppConfig {
    /// 지정한 파일과 환경 변수에서 설정을 로드합니다. 파일이 없으면 에러입니다.
    pub fn load<P: AsRef<Path>>(path: P) -> InsightResult<Self> {
        Self::build(Some(path.as_ref()), true)
    }

    /// 설정 파일이 있으면 로드하고, 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load_optional(path: Option<&Path>) -> InsightResult<Self> {
        Self::build(path, false)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> InsightResult<Self> {
        Self::load_optional(Some(Path::new("config/default.toml")))
    }

    fn build(path: Option<&Path>, required: bool) -> InsightResult<Self> {
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(required));
        }

        // 환경 변수로 오버라이드
        builder = builder.add_source(
            config::Environment::with_prefix("INSIGHT")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정값을 검증합니다.
    pub fn validate(&self) -> InsightResult<()> {
        let analysis = &self.analysis;

        if analysis.rsi_period == 0 {
            return Err(InsightError::InvalidInput(
                "analysis.rsi_period must be positive".to_string(),
            ));
        }
        if analysis.bollinger_period == 0 {
            return Err(InsightError::InvalidInput(
                "analysis.bollinger_period must be positive".to_string(),
            ));
        }
        if analysis.bollinger_multiplier <= Decimal::ZERO {
            return Err(InsightError::InvalidInput(format!(
                "analysis.bollinger_multiplier must be positive, got {}",
                analysis.bollinger_multiplier
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_analysis_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.bollinger_period, 20);
        assert_eq!(config.bollinger_multiplier, dec!(2));
        assert_eq!(config.volume_window, 20);
        assert_eq!(config.range_window, 252);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            AppConfig::load_optional(Some(Path::new("does/not/exist/insight.toml"))).unwrap();
        assert_eq!(config.analysis.rsi_period, 14);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let parsed: AppConfig = from_json(
            r#"{"analysis": {"rsi_period": 21}, "logging": {"format": "json"}}"#,
        );
        assert_eq!(parsed.analysis.rsi_period, 21);
        assert_eq!(parsed.analysis.bollinger_period, 20);
        assert_eq!(parsed.logging.format, LogFormat::Json);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = AppConfig::load("does/not/exist/insight.toml").unwrap_err();
        assert!(matches!(err, InsightError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_periods() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.analysis.rsi_period = 0;
        let err = config.validate().unwrap_err();
        assert!(err.is_user_error());

        let mut config = AppConfig::default();
        config.analysis.bollinger_multiplier = dec!(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nformat = \"yaml\"").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, InsightError::Config(_)));
    }

    fn from_json(json: &str) -> AppConfig {
        serde_json::from_str(json).unwrap()
    }
}
