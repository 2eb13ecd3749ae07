//! 지표 및 평가 규칙의 속성 기반 테스트.

use proptest::prelude::*;
use rust_decimal::Decimal;

use insight_analytics::{
    BollingerBandsParams, EmaParams, IndicatorEngine, MacdParams, MacdResult, OverallRating,
    RsiParams, SmaParams,
};

/// 0.01 ~ 10,000.00 사이 가격 목록.
fn prices(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1i64..1_000_000, 0..max_len)
        .prop_map(|cents| cents.into_iter().map(|c| Decimal::new(c, 2)).collect())
}

/// 시작가와 양의 증분으로 만든 순증가 가격 목록.
fn increasing_prices(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Decimal>> {
    (1i64..100_000, prop::collection::vec(1i64..1_000, len)).prop_map(|(start, steps)| {
        let mut price = Decimal::new(start, 2);
        let mut out = vec![price];
        for step in steps {
            price += Decimal::new(step, 2);
            out.push(price);
        }
        out
    })
}

proptest! {
    #[test]
    fn sma_and_ema_fall_back_to_last_price(prices in prices(40), period in 1usize..60) {
        prop_assume!(prices.len() < period);
        let engine = IndicatorEngine::new();
        let expected = prices.last().copied().unwrap_or_default();

        prop_assert_eq!(engine.sma(&prices, SmaParams { period }), expected);
        prop_assert_eq!(engine.ema(&prices, EmaParams { period }), expected);
    }

    #[test]
    fn rsi_stays_in_range(prices in prices(80), period in 1usize..30) {
        let engine = IndicatorEngine::new();
        let rsi = engine.rsi(&prices, RsiParams { period });

        prop_assert!(rsi >= Decimal::ZERO);
        prop_assert!(rsi <= Decimal::from(100));
    }

    #[test]
    fn rsi_of_decreasing_series_is_zero(mut prices in increasing_prices(15..60)) {
        prices.reverse();
        let engine = IndicatorEngine::new();

        prop_assert_eq!(engine.rsi(&prices, RsiParams::default()), Decimal::ZERO);
    }

    #[test]
    fn bollinger_bands_are_ordered(prices in prices(60), period in 1usize..30) {
        prop_assume!(!prices.is_empty());
        let engine = IndicatorEngine::new();
        let bands = engine.bollinger_bands(
            &prices,
            BollingerBandsParams { period, ..BollingerBandsParams::default() },
        );

        prop_assert!(bands.upper >= bands.middle);
        prop_assert!(bands.middle >= bands.lower);
    }

    #[test]
    fn bollinger_bands_stay_ordered_for_huge_prices(
        units in prop::collection::vec(1_000_000_000_000u64..u64::MAX, 1..40),
        period in 1usize..30,
    ) {
        let prices: Vec<Decimal> = units.into_iter().map(Decimal::from).collect();
        let bands = IndicatorEngine::new().bollinger_bands(
            &prices,
            BollingerBandsParams { period, ..BollingerBandsParams::default() },
        );

        prop_assert!(bands.upper >= bands.middle);
        prop_assert!(bands.middle >= bands.lower);
    }

    #[test]
    fn macd_is_zero_only_for_short_series(prices in increasing_prices(0..60)) {
        let engine = IndicatorEngine::new();
        let macd = engine.macd(&prices, MacdParams::default());

        if prices.len() < 26 {
            prop_assert_eq!(macd, MacdResult::default());
        } else {
            // 순증가 시계열에서는 단기 EMA가 장기 EMA보다 큼
            prop_assert!(macd.value > Decimal::ZERO);
            prop_assert!(macd.histogram > Decimal::ZERO);
        }
    }

    #[test]
    fn every_score_maps_to_exactly_one_rating(score in -200i32..300) {
        let bands = [
            (OverallRating::StrongBuy, score >= 80),
            (OverallRating::Buy, (65..80).contains(&score)),
            (OverallRating::Hold, (35..65).contains(&score)),
            (OverallRating::Sell, (20..35).contains(&score)),
            (OverallRating::StrongSell, score < 20),
        ];

        let matching: Vec<_> = bands.iter().filter(|(_, hit)| *hit).collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].0, OverallRating::from_score(score));
    }
}
