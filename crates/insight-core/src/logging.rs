//! tracing 구독자 초기화.
//!
//! 출력 형식은 세 가지입니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 로그 집계용 JSON 형식
//! - **compact**: 한 줄 형식
//!
//! 라이브러리 코드는 이벤트만 기록하며, 구독자 초기화는 바이너리가 담당합니다.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::{InsightError, InsightResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    #[default]
    Pretty,
    /// JSON 형식
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

/// 설정의 `logging` 섹션으로 전역 구독자를 설치합니다.
///
/// `RUST_LOG`가 있으면 설정의 레벨보다 우선합니다.
/// 로그는 stderr로 출력되므로 stdout의 분석 결과(JSON 등)와 섞이지 않습니다.
pub fn init_logging(config: &LoggingConfig) -> InsightResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InsightError::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let base = fmt::layer().with_writer(std::io::stderr);
    let layer = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| InsightError::Config(format!("logging already initialized: {}", e)))?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}
