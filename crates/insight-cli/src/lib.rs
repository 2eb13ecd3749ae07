//! 분석 엔진 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 가격 이력 파일(CSV/JSON) 로드
//! - 종합 분석 실행 및 결과 출력
//! - 지표 스냅샷 출력

pub mod commands;
