use soroban_sdk::Env;

use crate::error::{CoverageResult, ErrorCode};
use crate::math::bn::U256;
use crate::{math_error, validate};

/// Computes `floor(value * numerator / denominator)` with a 256-bit intermediate product.
///
/// All inputs must be non-negative and `denominator` strictly positive.
pub fn get_proportion(
    env: &Env,
    value: i128,
    numerator: i128,
    denominator: i128,
) -> CoverageResult<i128> {
    validate!(
        env,
        value >= 0 && numerator >= 0 && denominator > 0,
        ErrorCode::MathError,
        "proportion inputs out of range"
    )?;

    if numerator == denominator {
        return Ok(value);
    }

    let product = U256::from(value.unsigned_abs())
        .checked_mul(U256::from(numerator.unsigned_abs()))
        .ok_or_else(math_error!(env))?;

    product
        .checked_div(U256::from(denominator.unsigned_abs()))
        .ok_or_else(math_error!(env))?
        .to_i128(env)
}
