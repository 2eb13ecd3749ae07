//! 평가 엔진용 난수 공급원.
//!
//! 합성 점수(fundamental/market)의 잡음과 가격 예측의 섭동은 모두 이 트레이트를 통해서만
//! 난수를 얻습니다. 운영 환경에서는 [`ThreadRandom`]을, 테스트에서는 [`FixedRandom`]이나
//! 시드가 고정된 [`SeededRandom`]을 주입해 결과를 재현할 수 있습니다.

use insight_core::decimal_from_f64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// 균등 분포 난수 공급원.
pub trait RandomSource {
    /// `[0, 1)` 구간의 균등 난수.
    fn next_unit(&mut self) -> f64;

    /// `[-0.5, 0.5)` 구간의 섭동값 (`next_unit() - 0.5`).
    ///
    /// 0.5를 반환하는 공급원이라면 섭동은 정확히 0입니다.
    fn perturbation(&mut self) -> Decimal {
        decimal_from_f64(self.next_unit() - 0.5)
    }
}

/// 스레드 로컬 난수 생성기를 사용하는 운영용 공급원.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// 시드가 고정된 재현 가능한 공급원.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// 주어진 시드로 생성.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// 항상 같은 값을 반환하는 공급원.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    value: f64,
}

impl FixedRandom {
    /// 고정값 공급원 생성. 값은 `[0, 1)` 구간으로 제한됩니다.
    pub fn new(value: f64) -> Self {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0 - f64::EPSILON)
        } else {
            0.5
        };
        Self { value }
    }

    /// 섭동이 0이 되는 중립 공급원 (항상 0.5).
    pub fn neutral() -> Self {
        Self::new(0.5)
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.value
    }
}
