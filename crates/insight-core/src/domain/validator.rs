//! 원시 시세 샘플 검증 및 정규화.
//!
//! 데이터 수집 계층이 넘겨주는 샘플에는 누락되거나 0 이하인 가격/거래량이 섞여 있을 수 있습니다.
//! 검증기는 이를 걸러 `PriceSeries`를 만듭니다.
//!
//! # 필터링 정책
//!
//! 가격과 거래량은 **인덱스 단위로 함께** 걸러집니다. 샘플 하나는 통째로 유지되거나
//! 통째로 버려지므로, 종가와 거래량 배열의 정렬이 어긋나지 않습니다.
//!
//! - 가격이 없거나 0 이하 → 버림
//! - 거래량이 없거나 음수 → 버림 (거래량 0은 유지)
//! - 같은 날짜가 여러 번 나오면 나중 샘플이 우선
//!
//! 결과가 비어 있어도 에러가 아닙니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::series::{PricePoint, PriceSeries};

/// 데이터 수집 계층에서 받은 정제 전 샘플.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// 거래일
    pub date: NaiveDate,
    /// 종가 (누락 가능)
    #[serde(default)]
    pub price: Option<Decimal>,
    /// 거래량 (누락 가능)
    #[serde(default)]
    pub volume: Option<i64>,
}

impl RawSample {
    /// 새 샘플을 생성합니다.
    pub fn new(date: NaiveDate, price: Option<Decimal>, volume: Option<i64>) -> Self {
        Self {
            date,
            price,
            volume,
        }
    }
}

/// 검증 결과 요약.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// 시계열에 포함된 샘플 수
    pub accepted: usize,
    /// 가격 누락/비양수로 버려진 샘플 수
    pub dropped_price: usize,
    /// 거래량 누락/음수로 버려진 샘플 수
    pub dropped_volume: usize,
    /// 중복 날짜로 대체된 샘플 수
    pub duplicates: usize,
}

impl ValidationReport {
    /// 버려지거나 대체된 샘플이 있는지 확인합니다.
    pub fn has_rejections(&self) -> bool {
        self.dropped_price + self.dropped_volume + self.duplicates > 0
    }
}

/// 시계열 검증기.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesValidator;

impl SeriesValidator {
    /// 새 검증기를 생성합니다.
    pub fn new() -> Self {
        Self
    }

    /// 원시 샘플을 검증하여 시계열을 만듭니다.
    pub fn validate(&self, samples: &[RawSample]) -> (PriceSeries, ValidationReport) {
        let mut report = ValidationReport::default();
        let mut points = Vec::with_capacity(samples.len());

        for sample in samples {
            let price = match sample.price {
                Some(p) if p > Decimal::ZERO => p,
                _ => {
                    debug!(date = %sample.date, price = ?sample.price, "Dropping sample: invalid price");
                    report.dropped_price += 1;
                    continue;
                }
            };

            let volume = match sample.volume.and_then(|v| u64::try_from(v).ok()) {
                Some(v) => v,
                None => {
                    debug!(date = %sample.date, volume = ?sample.volume, "Dropping sample: invalid volume");
                    report.dropped_volume += 1;
                    continue;
                }
            };

            points.push(PricePoint::new(sample.date, price, volume));
        }

        let (series, mut normalized) = self.normalize_points(points);
        normalized.dropped_price += report.dropped_price;
        normalized.dropped_volume += report.dropped_volume;

        if normalized.has_rejections() {
            warn!(
                accepted = normalized.accepted,
                dropped_price = normalized.dropped_price,
                dropped_volume = normalized.dropped_volume,
                duplicates = normalized.duplicates,
                "Price samples rejected during validation"
            );
        }

        (series, normalized)
    }

    /// 가격 데이터를 날짜순으로 정렬하고 중복/비양수 가격을 제거합니다.
    pub fn normalize_points(
        &self,
        points: impl IntoIterator<Item = PricePoint>,
    ) -> (PriceSeries, ValidationReport) {
        let mut report = ValidationReport::default();
        let mut by_date: BTreeMap<NaiveDate, PricePoint> = BTreeMap::new();

        for point in points {
            if point.price <= Decimal::ZERO {
                report.dropped_price += 1;
                continue;
            }

            if by_date.insert(point.date, point).is_some() {
                report.duplicates += 1;
            }
        }

        let points: Vec<PricePoint> = by_date.into_values().collect();
        report.accepted = points.len();

        (PriceSeries::from_validated(points), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_drops_non_positive_and_missing_prices() {
        let samples = vec![
            RawSample::new(day(1), Some(dec!(100)), Some(1_000)),
            RawSample::new(day(2), Some(dec!(0)), Some(1_000)),
            RawSample::new(day(3), Some(dec!(-5)), Some(1_000)),
            RawSample::new(day(4), None, Some(1_000)),
            RawSample::new(day(5), Some(dec!(101)), Some(1_200)),
        ];

        let (series, report) = SeriesValidator::new().validate(&samples);

        assert_eq!(series.len(), 2);
        assert_eq!(series.prices(), vec![dec!(100), dec!(101)]);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.dropped_price, 3);
        assert!(report.has_rejections());
    }

    #[test]
    fn test_joint_filtering_keeps_price_and_volume_aligned() {
        let samples = vec![
            RawSample::new(day(1), Some(dec!(100)), Some(500)),
            RawSample::new(day(2), Some(dec!(101)), None),
            RawSample::new(day(3), Some(dec!(102)), Some(-1)),
            RawSample::new(day(4), Some(dec!(103)), Some(0)),
        ];

        let (series, report) = SeriesValidator::new().validate(&samples);

        // 거래량이 잘못된 샘플은 가격까지 함께 제거된다
        assert_eq!(series.prices(), vec![dec!(100), dec!(103)]);
        assert_eq!(series.volumes(), vec![500, 0]);
        assert_eq!(report.dropped_volume, 2);
    }

    #[test]
    fn test_sorts_and_deduplicates_dates() {
        let samples = vec![
            RawSample::new(day(3), Some(dec!(103)), Some(1)),
            RawSample::new(day(1), Some(dec!(101)), Some(1)),
            RawSample::new(day(2), Some(dec!(102)), Some(1)),
            RawSample::new(day(2), Some(dec!(202)), Some(2)),
        ];

        let (series, report) = SeriesValidator::new().validate(&samples);

        let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        // 나중 샘플이 우선
        assert_eq!(series.points()[1].price, dec!(202));
        assert_eq!(report.duplicates, 1);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let samples = vec![RawSample::new(day(1), Some(dec!(0)), Some(10))];
        let (series, report) = SeriesValidator::new().validate(&samples);

        assert!(series.is_empty());
        assert_eq!(report.accepted, 0);

        let (series, report) = SeriesValidator::new().validate(&[]);
        assert!(series.is_empty());
        assert!(!report.has_rejections());
    }

    #[test]
    fn test_raw_sample_deserializes_with_missing_fields() {
        let json = r#"[{"date":"2024-03-01","price":"100.5","volume":10},{"date":"2024-03-02"}]"#;
        let samples: Vec<RawSample> = serde_json::from_str(json).unwrap();

        assert_eq!(samples[0].price, Some(dec!(100.5)));
        assert_eq!(samples[1].price, None);
        assert_eq!(samples[1].volume, None);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn raw_sample() -> impl Strategy<Value = RawSample> {
            (
                1u32..28,
                proptest::option::of(-1_000i64..100_000),
                proptest::option::of(-10i64..1_000_000),
            )
                .prop_map(|(d, cents, volume)| {
                    RawSample::new(day(d), cents.map(|c| Decimal::new(c, 2)), volume)
                })
        }

        proptest! {
            #[test]
            fn validated_series_is_strictly_ordered_and_positive(
                samples in proptest::collection::vec(raw_sample(), 0..60)
            ) {
                let (series, report) = SeriesValidator::new().validate(&samples);

                prop_assert_eq!(report.accepted, series.len());
                prop_assert_eq!(
                    report.accepted + report.dropped_price + report.dropped_volume + report.duplicates,
                    samples.len()
                );
                for point in series.points() {
                    prop_assert!(point.price > Decimal::ZERO);
                }
                for pair in series.points().windows(2) {
                    prop_assert!(pair[0].date < pair[1].date);
                }
            }
        }
    }
}
