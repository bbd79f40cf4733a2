use anchor_lang::prelude::*;
use crate::errors::AmmError;
use crate::constants::*;

/// Integer square root using Babylonian method (floor)
pub fn sqrt(y: u128) -> Result<u64> {
    if y == 0 {
        return Ok(0);
    }

    // (y + 1) / 2 without overflowing at u128::MAX
    let mut z = y / 2 + (y & 1);
    let mut x = y;

    while z < x {
        x = z;
        z = (y / z + z) / 2;
    }

    u64::try_from(x).map_err(|_| error!(AmmError::Overflow))
}

/// floor(x * y / d), exact even when x * y exceeds u128
///
/// Falls back to splitting y into 32-bit halves, which needs x and d below 2^96.
pub fn mul_div_floor(x: u128, y: u64, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    match x.checked_mul(y as u128) {
        Some(product) => Some(product / d),
        None => split_mul_div(x, y, d),
    }
}

fn split_mul_div(x: u128, y: u64, d: u128) -> Option<u128> {
    if x >> 96 != 0 || d >> 96 != 0 {
        return None;
    }

    let y_hi = (y >> 32) as u128;
    let y_lo = (y & 0xFFFF_FFFF) as u128;

    // x * y = (q_hi * d + r_hi) * 2^32 + x * y_lo
    let hi = x * y_hi;
    let (q_hi, r_hi) = (hi / d, hi % d);
    let rest = (r_hi << 32).checked_add(x * y_lo)?;

    q_hi.checked_mul(1u128 << 32)?.checked_add(rest / d)
}

/// Calculate output amount for a swap
///
/// Formula: amount_out = (amount_in_with_fee * reserve_out) / (reserve_in * 1000 + amount_in_with_fee)
/// where amount_in_with_fee = amount_in * 997
pub fn get_amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
    require!(amount_in > 0, AmmError::ZeroAmount);
    require!(reserve_in > 0 && reserve_out > 0, AmmError::InsufficientLiquidity);

    let amount_in_with_fee = (amount_in as u128)
        .checked_mul(FEE_NUMERATOR as u128)
        .ok_or(AmmError::Overflow)?;

    let denominator = (reserve_in as u128)
        .checked_mul(FEE_DENOMINATOR as u128)
        .ok_or(AmmError::Overflow)?
        .checked_add(amount_in_with_fee)
        .ok_or(AmmError::Overflow)?;

    let amount_out = mul_div_floor(amount_in_with_fee, reserve_out, denominator)
        .ok_or(AmmError::Overflow)?;

    require!(amount_out > 0, AmmError::InsufficientOutput);

    u64::try_from(amount_out).map_err(|_| error!(AmmError::Overflow))
}

/// Portion of the input retained by the pool as fee (for statistics)
pub fn fee_amount(amount_in: u64) -> u64 {
    let priced = (amount_in as u128) * (FEE_NUMERATOR as u128) / (FEE_DENOMINATOR as u128);
    // priced <= amount_in since FEE_NUMERATOR < FEE_DENOMINATOR
    amount_in - priced as u64
}

/// Calculate liquidity shares for the first deposit into an empty pool
///
/// Requires amount_a == amount_b * 2, mints sqrt(amount_a * amount_b)
pub fn calculate_bootstrap_liquidity(amount_a: u64, amount_b: u64) -> Result<u128> {
    require!(amount_a > 0 && amount_b > 0, AmmError::ZeroAmount);

    let expected_a = (amount_b as u128)
        .checked_mul(BOOTSTRAP_PRICE_RATIO as u128)
        .ok_or(AmmError::Overflow)?;
    require!(
        amount_a as u128 == expected_a,
        AmmError::InvalidBootstrapRatio
    );

    let product = (amount_a as u128)
        .checked_mul(amount_b as u128)
        .ok_or(AmmError::Overflow)?;

    let liquidity = sqrt(product)? as u128;

    require!(liquidity > 0, AmmError::ZeroLiquidity);

    Ok(liquidity)
}

/// Calculate liquidity shares to mint for subsequent deposits
///
/// Formula: min(
///   amount_a * total_shares / reserve_a,
///   amount_b * total_shares / reserve_b
/// )
pub fn calculate_liquidity_to_mint(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u128,
) -> Result<u128> {
    require!(amount_a > 0 && amount_b > 0, AmmError::ZeroAmount);
    require!(reserve_a > 0 && reserve_b > 0, AmmError::NoLiquidity);
    require!(total_shares > 0, AmmError::NoLiquidity);

    // Exact proportionality: amount_a / amount_b == reserve_a / reserve_b
    let lhs = (amount_a as u128)
        .checked_mul(reserve_b as u128)
        .ok_or(AmmError::Overflow)?;
    let rhs = (amount_b as u128)
        .checked_mul(reserve_a as u128)
        .ok_or(AmmError::Overflow)?;
    require!(lhs == rhs, AmmError::InvalidRatio);

    let liquidity_a = mul_div_floor(total_shares, amount_a, reserve_a as u128)
        .ok_or(AmmError::Overflow)?;

    let liquidity_b = mul_div_floor(total_shares, amount_b, reserve_b as u128)
        .ok_or(AmmError::Overflow)?;

    // Return minimum to prevent dilution
    let liquidity = std::cmp::min(liquidity_a, liquidity_b);

    require!(liquidity > 0, AmmError::ZeroLiquidity);

    Ok(liquidity)
}

/// Calculate token amounts to return when burning liquidity
///
/// Formula:
///   amount_a = reserve_a * liquidity / total_shares
///   amount_b = reserve_b * liquidity / total_shares
pub fn calculate_amounts_for_liquidity(
    liquidity: u128,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u128,
) -> Result<(u64, u64)> {
    require!(liquidity > 0, AmmError::ZeroLiquidity);
    require!(total_shares > 0, AmmError::NoLiquidity);
    require!(liquidity <= total_shares, AmmError::InsufficientShares);

    let amount_a = mul_div_floor(liquidity, reserve_a, total_shares)
        .ok_or(AmmError::Overflow)?;

    let amount_b = mul_div_floor(liquidity, reserve_b, total_shares)
        .ok_or(AmmError::Overflow)?;

    require!(amount_a > 0 && amount_b > 0, AmmError::ZeroOutput);

    let amount_a = u64::try_from(amount_a).map_err(|_| error!(AmmError::Overflow))?;
    let amount_b = u64::try_from(amount_b).map_err(|_| error!(AmmError::Overflow))?;

    Ok((amount_a, amount_b))
}

/// Verify invariant k does not decrease after swap
pub fn verify_invariant(
    old_reserve_a: u64,
    old_reserve_b: u64,
    new_reserve_a: u64,
    new_reserve_b: u64,
) -> Result<()> {
    let k_old = (old_reserve_a as u128) * (old_reserve_b as u128);
    let k_new = (new_reserve_a as u128) * (new_reserve_b as u128);

    require!(k_new >= k_old, AmmError::InvariantViolation);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_amm_error;
    use proptest::prelude::*;

    #[test]
    fn sqrt_floors() {
        assert_eq!(sqrt(0).unwrap(), 0);
        assert_eq!(sqrt(1).unwrap(), 1);
        assert_eq!(sqrt(2).unwrap(), 1);
        assert_eq!(sqrt(3).unwrap(), 1);
        assert_eq!(sqrt(4).unwrap(), 2);
        assert_eq!(sqrt(2_000_000_000_000).unwrap(), 1_414_213);
        let max = (u64::MAX as u128) * (u64::MAX as u128);
        assert_eq!(sqrt(max).unwrap(), u64::MAX);
        assert_eq!(sqrt(u128::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn mul_div_past_u128() {
        assert_eq!(mul_div_floor(10, 7, 3), Some(23));
        assert_eq!(mul_div_floor(1, 1, 0), None);
        // 2^90 * 2^63 / 2^80
        assert_eq!(mul_div_floor(1 << 90, 1 << 63, 1 << 80), Some(1 << 73));
        assert_eq!(mul_div_floor(1 << 100, u64::MAX, 3), None);
    }

    #[test]
    fn bootstrap_mints_geometric_mean() {
        let liquidity = calculate_bootstrap_liquidity(2_000_000, 1_000_000).unwrap();
        assert_eq!(liquidity, 1_414_213);

        // smallest legal deposit
        assert_eq!(calculate_bootstrap_liquidity(2, 1).unwrap(), 1);
    }

    #[test]
    fn bootstrap_rejects_other_ratios() {
        assert_amm_error(
            calculate_bootstrap_liquidity(1_000_000, 1_000_000),
            AmmError::InvalidBootstrapRatio,
        );
        assert_amm_error(
            calculate_bootstrap_liquidity(2_000_001, 1_000_000),
            AmmError::InvalidBootstrapRatio,
        );
        assert_amm_error(calculate_bootstrap_liquidity(0, 0), AmmError::ZeroAmount);
    }

    #[test]
    fn bootstrap_ratio_does_not_overflow_on_large_b() {
        // amount_b * 2 exceeds u64, so no u64 amount_a can match it
        assert_amm_error(
            calculate_bootstrap_liquidity(u64::MAX, u64::MAX / 2 + 1),
            AmmError::InvalidBootstrapRatio,
        );
    }

    #[test]
    fn proportional_deposit_mints_min_share() {
        // Pool: 2000 A, 1000 B, 1414 shares; deposit 10%
        let liquidity = calculate_liquidity_to_mint(200, 100, 2_000, 1_000, 1_414).unwrap();
        assert_eq!(liquidity, 141);
    }

    #[test]
    fn off_ratio_deposit_rejected() {
        assert_amm_error(
            calculate_liquidity_to_mint(201, 100, 2_000, 1_000, 1_414),
            AmmError::InvalidRatio,
        );
    }

    #[test]
    fn dust_deposit_mints_nothing() {
        // 2 A + 1 B against a deep pool with few shares rounds to zero
        assert_amm_error(
            calculate_liquidity_to_mint(2, 1, 2_000_000, 1_000_000, 1_000),
            AmmError::ZeroLiquidity,
        );
    }

    #[test]
    fn burn_returns_pro_rata_amounts() {
        let (a, b) = calculate_amounts_for_liquidity(100, 1_000, 2_000, 500).unwrap();
        assert_eq!((a, b), (200, 400));
    }

    #[test]
    fn burn_rejects_dust_and_excess() {
        assert_amm_error(
            calculate_amounts_for_liquidity(0, 1_000, 2_000, 500),
            AmmError::ZeroLiquidity,
        );
        assert_amm_error(
            calculate_amounts_for_liquidity(501, 1_000, 2_000, 500),
            AmmError::InsufficientShares,
        );
        assert_amm_error(
            calculate_amounts_for_liquidity(1, 1, 2_000, 500),
            AmmError::ZeroOutput,
        );
    }

    #[test]
    fn swap_quote_matches_fee_formula() {
        // 500_000 * 997 * 1_000_000 / (2_000_000 * 1000 + 500_000 * 997)
        assert_eq!(get_amount_out(500_000, 2_000_000, 1_000_000).unwrap(), 199_519);
    }

    #[test]
    fn swap_quote_rejections() {
        assert_amm_error(get_amount_out(0, 10, 10), AmmError::ZeroAmount);
        assert_amm_error(get_amount_out(5, 0, 10), AmmError::InsufficientLiquidity);
        assert_amm_error(get_amount_out(5, 10, 0), AmmError::InsufficientLiquidity);
        // 1 * 997 * 1 / (1_000_000 * 1000 + 997) == 0
        assert_amm_error(get_amount_out(1, 1_000_000, 1), AmmError::InsufficientOutput);
    }

    #[test]
    fn swap_quote_handles_full_width_inputs() {
        let out = get_amount_out(u64::MAX, u64::MAX, u64::MAX).unwrap();
        assert!(out < u64::MAX);
    }

    #[test]
    fn fee_amount_rounds_in_favour_of_pool() {
        assert_eq!(fee_amount(1_000), 3);
        assert_eq!(fee_amount(500_000), 1_500);
        assert_eq!(fee_amount(1), 1);
    }

    #[test]
    fn invariant_check() {
        assert!(verify_invariant(100, 100, 110, 91).is_ok());
        assert_amm_error(verify_invariant(100, 100, 110, 90), AmmError::InvariantViolation);
    }

    proptest! {
        #[test]
        fn swap_never_decreases_product(
            reserve_in in 1u64..(1u64 << 62),
            reserve_out in 1u64..(1u64 << 62),
            amount_in in 1u64..(1u64 << 62),
        ) {
            if let Ok(amount_out) = get_amount_out(amount_in, reserve_in, reserve_out) {
                prop_assert!(amount_out < reserve_out);

                let unfeed_max = (amount_in as u128) * (reserve_out as u128) / (reserve_in as u128);
                prop_assert!(amount_out as u128 <= unfeed_max);

                let k_old = (reserve_in as u128) * (reserve_out as u128);
                let k_new = (reserve_in as u128 + amount_in as u128)
                    * (reserve_out as u128 - amount_out as u128);
                prop_assert!(k_new >= k_old);
            }
        }

        #[test]
        fn split_mul_div_agrees_with_direct(
            x in 0u128..(1u128 << 64),
            y in any::<u64>(),
            d in 1u128..(1u128 << 64),
        ) {
            prop_assert_eq!(split_mul_div(x, y, d), Some(x * y as u128 / d));
        }

        #[test]
        fn minted_shares_never_exceed_either_side(
            reserve_b in 1u64..(1u64 << 40),
            deposit_b in 1u64..(1u64 << 20),
            total_shares in 1u128..(1u128 << 60),
        ) {
            let reserve_a = reserve_b * 2;
            let deposit_a = deposit_b * 2;
            if let Ok(minted) = calculate_liquidity_to_mint(
                deposit_a, deposit_b, reserve_a, reserve_b, total_shares,
            ) {
                prop_assert!(minted <= deposit_a as u128 * total_shares / reserve_a as u128);
                prop_assert!(minted <= deposit_b as u128 * total_shares / reserve_b as u128);
            }
        }
    }
}
