use coverage::{
    error::{ CoverageResult, ErrorCode },
    math::{ safe_math::SafeMath, shares::{ amount_to_shares, shares_to_amount } },
    validate,
};
use soroban_sdk::{ log, Env };

use crate::storage::{ Pool, WithdrawRequest };

/// Mints shares for `amount` against the current pool price and returns them.
pub fn add_stake(
    env: &Env,
    pool: &mut Pool,
    free_shares: &mut i128,
    amount: i128
) -> CoverageResult<i128> {
    validate!(env, amount > 0, ErrorCode::ValidationError, "stake amount must be positive")?;

    let n_shares = amount_to_shares(
        env,
        amount,
        pool.total_share_supply,
        pool.total_pooled_funds
    )?;

    validate!(
        env,
        n_shares > 0,
        ErrorCode::ValidationError,
        "stake of {} is too small to mint a share",
        amount
    )?;

    pool.total_pooled_funds = pool.total_pooled_funds.safe_add(amount, env)?;
    pool.total_share_supply = pool.total_share_supply.safe_add(n_shares, env)?;
    *free_shares = free_shares.safe_add(n_shares, env)?;

    Ok(n_shares)
}

/// Escrows `n_shares` out of the free balance into a new withdrawal request.
pub fn request_remove_stake(
    env: &Env,
    free_shares: &mut i128,
    existing: Option<&WithdrawRequest>,
    n_shares: i128,
    now: u64,
    timelock: u64
) -> CoverageResult<WithdrawRequest> {
    validate!(env, n_shares > 0, ErrorCode::ValidationError, "withdraw shares must be positive")?;

    validate!(
        env,
        existing.is_none(),
        ErrorCode::WithdrawActive,
        "a withdrawal request is already pending"
    )?;

    validate!(
        env,
        n_shares <= *free_shares,
        ErrorCode::InsufficientFunds,
        "withdraw shares exceed free shares {} > {}",
        n_shares,
        *free_shares
    )?;

    *free_shares = free_shares.safe_sub(n_shares, env)?;

    log!(env, "n_shares {} escrowed at tick {}", n_shares, now);

    Ok(WithdrawRequest {
        share_amount: n_shares,
        request_tick: now,
        timelock,
    })
}

/// Returns escrowed shares to the free balance while the timelock is still running.
pub fn cancel_request_remove_stake(
    env: &Env,
    free_shares: &mut i128,
    request: &WithdrawRequest,
    now: u64
) -> CoverageResult {
    validate!(
        env,
        !request.is_vested(now),
        ErrorCode::TimelockExpired,
        "timelock of {} ticks elapsed, request can only be claimed",
        request.timelock
    )?;

    *free_shares = free_shares.safe_add(request.share_amount, env)?;

    Ok(())
}

/// Burns vested escrowed shares and returns their value at the current pool price.
pub fn remove_stake(
    env: &Env,
    pool: &mut Pool,
    request: &WithdrawRequest,
    now: u64
) -> CoverageResult<i128> {
    validate!(
        env,
        request.is_vested(now),
        ErrorCode::TimelockActive,
        "request vests at tick {}",
        request.request_tick.saturating_add(request.timelock)
    )?;

    let amount = shares_to_amount(
        env,
        request.share_amount,
        pool.total_share_supply,
        pool.total_pooled_funds
    )?;

    pool.total_share_supply = pool.total_share_supply.safe_sub(request.share_amount, env)?;
    pool.total_pooled_funds = pool.total_pooled_funds.safe_sub(amount, env)?;

    Ok(amount)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use soroban_sdk::Env;

    use super::*;

    #[test]
    fn add_stake_to_empty_pool_mints_one_to_one() {
        let env = Env::default();
        let mut pool = Pool::default();
        let mut shares = 0;

        assert_eq!(add_stake(&env, &mut pool, &mut shares, 500), Ok(500));
        assert_eq!(pool, Pool { total_pooled_funds: 500, total_share_supply: 500 });
        assert_eq!(shares, 500);
    }

    #[test]
    fn add_stake_rejects_dust_that_mints_nothing() {
        let env = Env::default();
        let mut pool = Pool { total_pooled_funds: 505, total_share_supply: 500 };
        let mut shares = 0;

        assert_eq!(
            add_stake(&env, &mut pool, &mut shares, 1),
            Err(ErrorCode::ValidationError)
        );
        assert_eq!(pool, Pool { total_pooled_funds: 505, total_share_supply: 500 });
    }

    #[test]
    fn request_cannot_exceed_free_shares() {
        let env = Env::default();
        let mut shares = 10;

        assert_eq!(
            request_remove_stake(&env, &mut shares, None, 11, 0, 5),
            Err(ErrorCode::InsufficientFunds)
        );
        assert_eq!(shares, 10);
    }

    #[test]
    fn cancel_boundary_is_exclusive_of_timelock() {
        let env = Env::default();
        let mut shares = 0;
        let request = WithdrawRequest { share_amount: 10, request_tick: 100, timelock: 5 };

        assert_eq!(
            cancel_request_remove_stake(&env, &mut shares, &request, 105),
            Err(ErrorCode::TimelockExpired)
        );
        assert_eq!(cancel_request_remove_stake(&env, &mut shares, &request, 104), Ok(()));
        assert_eq!(shares, 10);
    }

    #[test]
    fn remove_stake_pays_out_at_claim_time_price() {
        let env = Env::default();
        let mut pool = Pool { total_pooled_funds: 600, total_share_supply: 500 };
        let request = WithdrawRequest { share_amount: 250, request_tick: 0, timelock: 0 };

        assert_eq!(remove_stake(&env, &mut pool, &request, 0), Ok(300));
        assert_eq!(pool, Pool { total_pooled_funds: 300, total_share_supply: 250 });
    }
}
