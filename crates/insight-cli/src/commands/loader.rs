//! 가격 이력 파일 로드.
//!
//! 데이터 수집 계층이 저장한 파일을 읽어 정제 전 샘플([`RawSample`])로 변환합니다.
//!
//! | 형식 | 구조 |
//! |------|------|
//! | CSV | 헤더 `date,price,volume`, 빈 칸은 누락값 |
//! | JSON | `[{"date": "2024-01-02", "price": "101.5", "volume": 1200}, ...]` |
//!
//! CSV에서 해석할 수 없는 행은 건너뛰고 [`RowError`]로 보고합니다.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use insight_core::RawSample;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

/// 입력 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// 확장자로 형식을 판단하고, 알 수 없으면 내용의 첫 글자로 판단합니다.
    pub fn detect(path: &Path, content: &str) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ if content.trim_start().starts_with('[') => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// 건너뛴 CSV 행.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 파일 내 줄 번호 (헤더가 1행)
    pub line: usize,
    /// 사유
    pub message: String,
}

/// 로드 결과.
#[derive(Debug, Clone, Default)]
pub struct LoadedSamples {
    /// 해석된 샘플
    pub samples: Vec<RawSample>,
    /// 해석에 실패한 행
    pub row_errors: Vec<RowError>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    price: Option<String>,
    volume: Option<i64>,
}

/// 파일에서 샘플을 로드합니다.
pub fn load_samples(path: &Path) -> Result<LoadedSamples> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let loaded = match InputFormat::detect(path, &content) {
        InputFormat::Csv => parse_csv(content.as_bytes())?,
        InputFormat::Json => LoadedSamples {
            samples: parse_json(&content)?,
            row_errors: Vec::new(),
        },
    };

    info!(
        path = %path.display(),
        samples = loaded.samples.len(),
        skipped_rows = loaded.row_errors.len(),
        "Input loaded"
    );

    Ok(loaded)
}

/// CSV를 해석합니다.
///
/// 가격 칸은 문자열 그대로 [`Decimal`]로 변환하여 부동소수점 오차가 끼지 않습니다.
pub fn parse_csv<R: Read>(reader: R) -> Result<LoadedSamples> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader.headers().context("Failed to read CSV headers")?;

    let mut loaded = LoadedSamples::default();

    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        // 헤더가 1행
        let line = idx + 2;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "Skipping malformed CSV row");
                loaded.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        let price = match row.price.as_deref().map(Decimal::from_str).transpose() {
            Ok(price) => price,
            Err(e) => {
                warn!(line, error = %e, "Skipping CSV row with invalid price");
                loaded.row_errors.push(RowError {
                    line,
                    message: format!("Invalid price: {}", e),
                });
                continue;
            }
        };

        loaded
            .samples
            .push(RawSample::new(row.date, price, row.volume));
    }

    Ok(loaded)
}

/// JSON 배열을 해석합니다.
pub fn parse_json(content: &str) -> Result<Vec<RawSample>> {
    serde_json::from_str(content).context("Failed to parse JSON price history")
}
