//! 분석 시스템의 에러 타입.
//!
//! 지표/평가 엔진 자체는 모든 입력에 대해 정의된 값을 반환하므로 에러가 없습니다.
//! 이 모듈의 에러는 설정 로드, 설정값 검증, 로깅 초기화 등 엔진을 둘러싼 계층에서 사용됩니다.

use thiserror::Error;

/// 분석 시스템 에러.
#[derive(Debug, Error)]
pub enum InsightError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 분석 작업을 위한 Result 타입.
pub type InsightResult<T> = Result<T, InsightError>;

impl InsightError {
    /// 사용자 입력을 고치면 해결되는 에러인지 확인합니다.
    pub fn is_user_error(&self) -> bool {
        matches!(self, InsightError::InvalidInput(_))
    }
}

impl From<config::ConfigError> for InsightError {
    fn from(err: config::ConfigError) -> Self {
        InsightError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error() {
        let err = InsightError::InvalidInput("bad price".to_string());
        assert!(err.is_user_error());

        let err = InsightError::Config("missing file".to_string());
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_from_config_error() {
        let err: InsightError = config::ConfigError::NotFound("analysis".to_string()).into();
        assert!(matches!(err, InsightError::Config(_)));
        assert!(err.to_string().contains("analysis"));
    }
}
