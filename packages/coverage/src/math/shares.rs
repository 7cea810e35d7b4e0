use soroban_sdk::Env;

use crate::error::{CoverageResult, ErrorCode};
use crate::math::helpers::get_proportion;
use crate::validate;

/// Shares minted for depositing `amount` into a pool holding `total_pooled_funds`
/// backed by `total_share_supply` shares. The first deposit mints one share per unit.
pub fn amount_to_shares(
    env: &Env,
    amount: i128,
    total_share_supply: i128,
    total_pooled_funds: i128,
) -> CoverageResult<i128> {
    if total_share_supply == 0 {
        return Ok(amount);
    }

    validate!(
        env,
        total_pooled_funds > 0,
        ErrorCode::ValidationError,
        "pool funds drained while {} shares remain outstanding",
        total_share_supply
    )?;

    get_proportion(env, amount, total_share_supply, total_pooled_funds)
}

/// Redeemable value of `shares`, rounded down.
pub fn shares_to_amount(
    env: &Env,
    shares: i128,
    total_share_supply: i128,
    total_pooled_funds: i128,
) -> CoverageResult<i128> {
    validate!(
        env,
        shares <= total_share_supply,
        ErrorCode::MathError,
        "shares {} exceed total share supply {}",
        shares,
        total_share_supply
    )?;

    if total_share_supply == 0 {
        return Ok(0);
    }

    get_proportion(env, total_pooled_funds, shares, total_share_supply)
}
