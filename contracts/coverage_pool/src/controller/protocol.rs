use coverage::{
    error::{ CoverageResult, ErrorCode },
    math::{ premium, safe_math::SafeMath },
    validate,
};
use soroban_sdk::Env;

use crate::storage::{ CoverageProfile, Pool };

impl CoverageProfile {
    pub fn premium_per_tick(&self, env: &Env) -> CoverageResult<i128> {
        premium::premium_per_tick(env, self.covered_funds, self.premium_rate)
    }

    pub fn accrued_debt(&self, env: &Env, now: u64) -> CoverageResult<i128> {
        premium::accrued_debt(
            env,
            self.premium_per_tick(env)?,
            self.premium_last_settled_tick,
            now
        )
    }

    /// Allocates up to the profile cap out of `total_pooled_funds`.
    ///
    /// Caps are compared against the whole pool for each profile independently,
    /// so the sum of allocations across profiles may exceed the pool.
    pub fn allocate(&mut self, total_pooled_funds: i128) {
        self.covered_funds = self.max_funds_covered.min(total_pooled_funds.max(0));
    }
}

/// Creates or updates a profile from admin-supplied terms.
///
/// `last_settled_tick` of `None` seeds the current tick for a new profile and
/// keeps the existing baseline on update. An explicit tick is accepted as long
/// as it is not in the future.
pub fn apply_terms(
    env: &Env,
    existing: Option<CoverageProfile>,
    max_funds_covered: i128,
    premium_rate: i128,
    last_settled_tick: Option<u64>,
    registry_index: u32,
    now: u64
) -> CoverageResult<CoverageProfile> {
    validate!(
        env,
        max_funds_covered > 0,
        ErrorCode::ValidationError,
        "max funds covered must be positive"
    )?;
    validate!(env, premium_rate > 0, ErrorCode::ValidationError, "premium rate must be positive")?;

    let settled_tick = match (last_settled_tick, &existing) {
        (Some(tick), _) => tick,
        (None, Some(profile)) => profile.premium_last_settled_tick,
        (None, None) => now,
    };
    validate!(
        env,
        settled_tick <= now,
        ErrorCode::ValidationError,
        "last settled tick {} is ahead of current tick {}",
        settled_tick,
        now
    )?;

    let profile = match existing {
        Some(profile) =>
            CoverageProfile {
                max_funds_covered,
                premium_rate,
                premium_last_settled_tick: settled_tick,
                ..profile
            },
        None =>
            CoverageProfile {
                max_funds_covered,
                premium_rate,
                premium_last_settled_tick: settled_tick,
                profile_balance: 0,
                covered_funds: 0,
                registry_index,
            },
    };

    Ok(profile)
}

/// Moves the accrued debt from the profile balance into the pool and
/// restarts accrual at `now`. Returns the settled debt.
pub fn settle_debt(
    env: &Env,
    profile: &mut CoverageProfile,
    pool: &mut Pool,
    now: u64
) -> CoverageResult<i128> {
    let debt = profile.accrued_debt(env, now)?;

    validate!(
        env,
        profile.profile_balance >= debt,
        ErrorCode::InsufficientFunds,
        "profile balance {} cannot cover accrued debt {}",
        profile.profile_balance,
        debt
    )?;

    profile.profile_balance = profile.profile_balance.safe_sub(debt, env)?;
    profile.premium_last_settled_tick = now;
    pool.total_pooled_funds = pool.total_pooled_funds.safe_add(debt, env)?;

    Ok(debt)
}

/// Settles as much accrued debt as the profile balance covers, for a profile
/// that is leaving the registry. Returns `(settled, written_off)`.
pub fn settle_debt_on_removal(
    env: &Env,
    profile: &mut CoverageProfile,
    pool: &mut Pool,
    now: u64
) -> CoverageResult<(i128, i128)> {
    let debt = profile.accrued_debt(env, now)?;
    let settled = debt.min(profile.profile_balance);
    let written_off = debt.safe_sub(settled, env)?;

    profile.profile_balance = profile.profile_balance.safe_sub(settled, env)?;
    profile.premium_last_settled_tick = now;
    pool.total_pooled_funds = pool.total_pooled_funds.safe_add(settled, env)?;

    Ok((settled, written_off))
}

/// Charges a claim of `amount` against the pool.
pub fn apply_payout(
    env: &Env,
    profile: &CoverageProfile,
    pool: &mut Pool,
    amount: i128
) -> CoverageResult {
    validate!(env, amount > 0, ErrorCode::ValidationError, "payout amount must be positive")?;

    validate!(
        env,
        amount <= profile.covered_funds,
        ErrorCode::InsufficientCoverage,
        "payout {} exceeds covered funds {}",
        amount,
        profile.covered_funds
    )?;

    pool.total_pooled_funds = pool.total_pooled_funds.safe_sub(amount, env)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use coverage::constants::ONE_PERCENT_PREMIUM_RATE;
    use pretty_assertions::assert_eq;
    use soroban_sdk::Env;

    use super::*;

    fn profile(covered_funds: i128, profile_balance: i128, last_settled: u64) -> CoverageProfile {
        CoverageProfile {
            max_funds_covered: 500,
            premium_rate: ONE_PERCENT_PREMIUM_RATE,
            premium_last_settled_tick: last_settled,
            profile_balance,
            covered_funds,
            registry_index: 0,
        }
    }

    #[test]
    fn allocate_is_capped_by_pool_and_terms() {
        let mut covered = profile(0, 0, 0);

        covered.allocate(100);
        assert_eq!(covered.covered_funds, 100);

        covered.allocate(5_000);
        assert_eq!(covered.covered_funds, 500);

        covered.allocate(0);
        assert_eq!(covered.covered_funds, 0);
    }

    #[test]
    fn apply_terms_rejects_future_settlement_tick() {
        let env = Env::default();

        assert_eq!(
            apply_terms(&env, None, 500, ONE_PERCENT_PREMIUM_RATE, Some(11), 0, 10),
            Err(ErrorCode::ValidationError)
        );
    }

    #[test]
    fn apply_terms_keeps_balance_and_index_on_update() {
        let env = Env::default();
        let existing = CoverageProfile { registry_index: 3, ..profile(500, 42, 1) };

        let updated = apply_terms(&env, Some(existing), 900, 2, None, 7, 10).unwrap();

        assert_eq!(
            updated,
            CoverageProfile {
                max_funds_covered: 900,
                premium_rate: 2,
                premium_last_settled_tick: 1,
                profile_balance: 42,
                covered_funds: 500,
                registry_index: 3,
            }
        );
    }

    #[test]
    fn settle_debt_moves_premium_into_pool() {
        let env = Env::default();
        let mut covered = profile(500, 500, 0);
        let mut pool = Pool { total_pooled_funds: 500, total_share_supply: 500 };

        assert_eq!(settle_debt(&env, &mut covered, &mut pool, 1), Ok(5));
        assert_eq!(covered.profile_balance, 495);
        assert_eq!(covered.premium_last_settled_tick, 1);
        assert_eq!(pool.total_pooled_funds, 505);
        assert_eq!(covered.accrued_debt(&env, 1), Ok(0));
    }

    #[test]
    fn settle_debt_requires_sufficient_balance() {
        let env = Env::default();
        let mut covered = profile(500, 4, 0);
        let mut pool = Pool { total_pooled_funds: 500, total_share_supply: 500 };

        assert_eq!(
            settle_debt(&env, &mut covered, &mut pool, 1),
            Err(ErrorCode::InsufficientFunds)
        );
        assert_eq!(pool.total_pooled_funds, 500);
    }

    #[test]
    fn removal_writes_off_debt_the_balance_cannot_cover() {
        let env = Env::default();
        let mut covered = profile(500, 12, 0);
        let mut pool = Pool { total_pooled_funds: 500, total_share_supply: 500 };

        assert_eq!(settle_debt_on_removal(&env, &mut covered, &mut pool, 4), Ok((12, 8)));
        assert_eq!(covered.profile_balance, 0);
        assert_eq!(pool.total_pooled_funds, 512);
    }

    #[test]
    fn removal_settles_in_full_when_balance_suffices() {
        let env = Env::default();
        let mut covered = profile(500, 100, 0);
        let mut pool = Pool { total_pooled_funds: 500, total_share_supply: 500 };

        assert_eq!(settle_debt_on_removal(&env, &mut covered, &mut pool, 4), Ok((20, 0)));
        assert_eq!(covered.profile_balance, 80);
        assert_eq!(pool.total_pooled_funds, 520);
    }

    #[test]
    fn apply_payout_is_bounded_by_covered_funds() {
        let env = Env::default();
        let covered = profile(500, 0, 0);
        let mut pool = Pool { total_pooled_funds: 500, total_share_supply: 500 };

        assert_eq!(
            apply_payout(&env, &covered, &mut pool, 501),
            Err(ErrorCode::InsufficientCoverage)
        );
        assert_eq!(apply_payout(&env, &covered, &mut pool, 500), Ok(()));
        assert_eq!(pool, Pool { total_pooled_funds: 0, total_share_supply: 500 });
    }
}
