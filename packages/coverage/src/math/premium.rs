use soroban_sdk::Env;

use crate::constants::PREMIUM_RATE_PRECISION;
use crate::error::{CoverageResult, ErrorCode};
use crate::math::helpers::get_proportion;
use crate::math::safe_math::SafeMath;
use crate::validate;

/// `covered_funds * premium_rate / PREMIUM_RATE_PRECISION`, rounded down.
pub fn premium_per_tick(env: &Env, covered_funds: i128, premium_rate: i128) -> CoverageResult<i128> {
    get_proportion(env, covered_funds, premium_rate, PREMIUM_RATE_PRECISION)
}

/// Premium owed for the ticks elapsed since `last_settled_tick`.
pub fn accrued_debt(
    env: &Env,
    premium_per_tick: i128,
    last_settled_tick: u64,
    current_tick: u64,
) -> CoverageResult<i128> {
    validate!(
        env,
        current_tick >= last_settled_tick,
        ErrorCode::MathError,
        "tick {} precedes last settlement at {}",
        current_tick,
        last_settled_tick
    )?;

    let elapsed = current_tick.safe_sub(last_settled_tick, env)?;

    premium_per_tick.safe_mul(i128::from(elapsed), env)
}
