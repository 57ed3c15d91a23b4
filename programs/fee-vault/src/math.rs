use anchor_lang::prelude::*;

use crate::{constants::BASIS_POINT_SCALE, errors::VaultError};

/// Rounding direction for integer division.
///
/// Rounding always favors the vault and its fee recipients: `Floor`
/// when the user receives, `Ceil` when the user pays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

/// Computes `value * numerator / denominator` with a u128 intermediate.
///
/// Fails with `MathOverflow` rather than wrapping when the product or
/// the result does not fit.
pub fn mul_div(value: u64, numerator: u128, denominator: u128, rounding: Rounding) -> Result<u64> {
    let product = (value as u128)
        .checked_mul(numerator)
        .ok_or(error!(VaultError::MathOverflow))?;

    let quotient = product
        .checked_div(denominator)
        .ok_or(error!(VaultError::MathOverflow))?;

    let quotient = match rounding {
        Rounding::Ceil if product % denominator != 0 => quotient + 1,
        _ => quotient,
    };

    u64::try_from(quotient).map_err(|_| error!(VaultError::MathOverflow))
}

/// Fee added on top of a raw amount: `ceil(amount * fee_bps / BASIS)`
pub fn fee_on_raw(amount: u64, fee_bps: u32) -> Result<u64> {
    mul_div(
        amount,
        fee_bps as u128,
        BASIS_POINT_SCALE as u128,
        Rounding::Ceil,
    )
}

/// Fee contained in a gross amount: `ceil(amount * fee_bps / (fee_bps + BASIS))`
pub fn fee_on_total(amount: u64, fee_bps: u32) -> Result<u64> {
    fee_portion_of_total(amount, fee_bps, fee_bps)
}

/// One category's portion of the fee contained in a gross amount that was
/// charged at `total_bps` overall.
///
/// `ceil(amount * portion_bps / (total_bps + BASIS))`. Equals
/// `fee_on_total(amount, portion_bps)` when the category is the only one
/// charging.
pub fn fee_portion_of_total(amount: u64, portion_bps: u32, total_bps: u32) -> Result<u64> {
    let denominator = (total_bps as u128)
        .checked_add(BASIS_POINT_SCALE as u128)
        .ok_or(error!(VaultError::MathOverflow))?;

    mul_div(amount, portion_bps as u128, denominator, Rounding::Ceil)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_rounding() {
        assert_eq!(mul_div(10, 1, 3, Rounding::Floor).unwrap(), 3);
        assert_eq!(mul_div(10, 1, 3, Rounding::Ceil).unwrap(), 4);
        // Exact division never rounds up
        assert_eq!(mul_div(9, 1, 3, Rounding::Ceil).unwrap(), 3);
        assert_eq!(mul_div(0, 7, 3, Rounding::Ceil).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_overflow() {
        // Result does not fit in u64
        assert!(mul_div(u64::MAX, 2, 1, Rounding::Floor).is_err());
        // Intermediate product does not fit in u128
        assert!(mul_div(u64::MAX, u128::MAX / 2, 1, Rounding::Floor).is_err());
        assert!(mul_div(1, 1, 0, Rounding::Floor).is_err());
    }

    #[test]
    fn test_fee_on_raw() {
        // 1% of 10000
        assert_eq!(fee_on_raw(10_000, 100).unwrap(), 100);
        // 1% of 9950 = 99.5 -> 100
        assert_eq!(fee_on_raw(9_950, 100).unwrap(), 100);
        assert_eq!(fee_on_raw(1, 1).unwrap(), 1);
        assert_eq!(fee_on_raw(10_000, 0).unwrap(), 0);
    }

    #[test]
    fn test_fee_on_total() {
        // 10000 * 100 / 10100 = 99.0099 -> 100
        assert_eq!(fee_on_total(10_000, 100).unwrap(), 100);
        // 10100 * 100 / 10100 = 100 exactly
        assert_eq!(fee_on_total(10_100, 100).unwrap(), 100);
        assert_eq!(fee_on_total(10_000, 0).unwrap(), 0);
        assert_eq!(fee_on_total(0, 5_000).unwrap(), 0);
    }

    #[test]
    fn test_fee_on_total_inverts_fee_on_raw() {
        for net in [1u64, 99, 9_900, 123_457, 1_000_000_007] {
            for bps in [1u32, 100, 999, 5_000, 7_000] {
                let fee = fee_on_raw(net, bps).unwrap();
                assert_eq!(fee_on_total(net + fee, bps).unwrap(), fee);
            }
        }
    }

    #[test]
    fn test_fee_portion_of_total_single_category() {
        assert_eq!(
            fee_portion_of_total(10_000, 100, 100).unwrap(),
            fee_on_total(10_000, 100).unwrap()
        );
        assert_eq!(fee_portion_of_total(10_000, 0, 2_000).unwrap(), 0);
    }

    #[test]
    fn test_fee_portions_track_combined_fee() {
        // 20% combined, split 10% / 10%
        let total = fee_on_total(10_000, 2_000).unwrap();
        let half = fee_portion_of_total(10_000, 1_000, 2_000).unwrap();
        assert_eq!(total, 1_667);
        assert_eq!(half, 834);
        assert!(half * 2 <= total + 2);
    }
}
