//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 가격과 지표 값은 모두 `Decimal`로 표현합니다.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 거래량 타입 (주 단위, 음수 불가).
pub type Volume = u64;

/// 퍼센트 타입 (5.25 = 5.25%).
pub type Percentage = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 멀어지는 방향).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 가장 가까운 정수로 반올림하여 `i32`로 변환합니다.
    ///
    /// 범위를 벗어나면 `i32` 경계값으로 포화됩니다.
    fn to_rounded_i32(&self) -> i32;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_rounded_i32(&self) -> i32 {
        let rounded = self.round_half_up(0);
        rounded.to_i32().unwrap_or(if rounded.is_sign_negative() {
            i32::MIN
        } else {
            i32::MAX
        })
    }
}

/// `f64`를 Decimal로 변환합니다. NaN/무한대는 0으로 처리합니다.
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(dec!(49.5).round_half_up(0), dec!(50));
        assert_eq!(dec!(-49.5).round_half_up(0), dec!(-50));
        assert_eq!(dec!(1.234).round_half_up(2), dec!(1.23));
    }

    #[test]
    fn test_to_rounded_i32() {
        assert_eq!(dec!(60.5).to_rounded_i32(), 61);
        assert_eq!(dec!(60.49).to_rounded_i32(), 60);
        assert_eq!(dec!(-4.5).to_rounded_i32(), -5);
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64(0.0), Decimal::ZERO);
        assert_eq!(decimal_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_from_f64(0.25), dec!(0.25));
    }
}
