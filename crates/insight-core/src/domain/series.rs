//! 가격 시계열 타입.
//!
//! 이 모듈은 분석 엔진의 입력이 되는 시계열 타입을 정의합니다:
//! - `PricePoint` - 일자별 종가와 거래량
//! - `PriceSeries` - 검증을 통과한 시계열 (날짜 오름차순, 중복 없음, 가격 > 0)
//! - `MarketContext` - 현재가, 등락률, 52주 범위 등 평가에 필요한 스칼라 정보

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::validator::{SeriesValidator, ValidationReport};
use crate::types::{Percentage, Price, Volume};

/// 1년 거래일 수 (52주 고가/저가 계산 구간).
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// 일자별 가격 데이터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 종가 (항상 0보다 큼)
    pub price: Price,
    /// 거래량
    pub volume: Volume,
}

impl PricePoint {
    /// 새 가격 데이터를 생성합니다.
    pub fn new(date: NaiveDate, price: Price, volume: Volume) -> Self {
        Self {
            date,
            price,
            volume,
        }
    }
}

/// 검증된 가격 시계열.
///
/// 항상 날짜 오름차순이며 중복 날짜가 없고 모든 가격이 0보다 큽니다.
/// 검증 결과 비어 있을 수 있으므로 길이 0, 1인 시계열도 다룰 수 있어야 합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 이미 검증된 데이터로 시계열을 생성합니다 (validator 전용).
    pub(crate) fn from_validated(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// 가격 데이터 목록에서 시계열을 생성합니다.
    ///
    /// 검증 규칙(정렬, 중복 제거, 비양수 가격 제거)이 그대로 적용됩니다.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> (Self, ValidationReport) {
        SeriesValidator::new().normalize_points(points)
    }

    /// 데이터 개수.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 전체 데이터.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 가장 최근 데이터.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// 종가 목록 (시간 순).
    pub fn prices(&self) -> Vec<Price> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// 거래량 목록 (시간 순, 종가와 인덱스가 일치).
    pub fn volumes(&self) -> Vec<Volume> {
        self.points.iter().map(|p| p.volume).collect()
    }

    /// 직전 거래일 대비 등락률(%)을 계산합니다.
    ///
    /// 데이터가 2개 미만이면 0을 반환합니다.
    pub fn change_percent(&self) -> Percentage {
        match self.points.as_slice() {
            [.., prev, last] => (last.price - prev.price) / prev.price * Decimal::from(100),
            _ => Decimal::ZERO,
        }
    }

    /// 최근 `window`개 종가 중 최저가와 최고가를 반환합니다.
    ///
    /// `window`가 0이거나 시계열보다 길면 전체 구간을 사용합니다.
    pub fn price_range(&self, window: usize) -> Option<(Price, Price)> {
        let start = if window == 0 {
            0
        } else {
            self.points.len().saturating_sub(window)
        };

        let tail = &self.points[start..];
        let low = tail.iter().map(|p| p.price).min()?;
        let high = tail.iter().map(|p| p.price).max()?;
        Some((low, high))
    }

    /// 평가 엔진에 전달할 시장 컨텍스트를 만듭니다.
    ///
    /// 빈 시계열이면 `None`을 반환합니다.
    pub fn market_context(&self, range_window: usize) -> Option<MarketContext> {
        let last = self.last()?;
        let (low_52w, high_52w) = self.price_range(range_window)?;

        Some(MarketContext {
            current_price: last.price,
            change_percent: self.change_percent(),
            low_52w,
            high_52w,
            volume: Decimal::from(last.volume),
        })
    }
}

/// 평가 엔진에 필요한 스칼라 시장 정보.
///
/// 원래는 데이터 수집 계층이 시세 API로부터 채우는 값이며,
/// `PriceSeries::market_context`로 시계열에서 직접 유도할 수도 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    /// 현재가
    pub current_price: Price,
    /// 전일 대비 등락률 (%)
    pub change_percent: Percentage,
    /// 52주 최저가
    pub low_52w: Price,
    /// 52주 최고가
    pub high_52w: Price,
    /// 최근 거래량
    pub volume: Decimal,
}
