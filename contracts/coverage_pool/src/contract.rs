use coverage::{
    constants::{ INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD },
    error::ErrorCode,
};
use soroban_sdk::{
    contract,
    contractimpl,
    contractmeta,
    log,
    panic_with_error,
    Address,
    BytesN,
    Env,
    Vec,
};

use crate::{
    coverage_pool::CoveragePoolTrait,
    events::CoveragePoolEvents,
    interfaces::{ LedgerClock, TokenVault },
    ledger::CoverageLedger,
    storage::{ self, utils, Config, CoverageProfile, Pool, WithdrawRequest },
};

contractmeta!(
    key = "Description",
    val = "Staking pool that underwrites coverage for multiple protocols against usage-based premiums"
);

#[contract]
pub struct CoveragePool;

fn ledger(env: &Env) -> Result<CoverageLedger<'_, LedgerClock<'_>, TokenVault<'_>>, ErrorCode> {
    let config = storage::get_config(env)?;
    env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

    Ok(CoverageLedger::new(env, LedgerClock::new(env), TokenVault::new(env, &config.asset)))
}

fn require_admin(env: &Env, sender: &Address) -> Result<(), ErrorCode> {
    sender.require_auth();
    let config = storage::get_config(env)?;
    utils::require_admin(env, &config, sender)
}

#[contractimpl]
/// Implementation of the Coverage Pool trait over the ledger-sequence clock and the configured asset
impl CoveragePoolTrait for CoveragePool {
    fn initialize(env: Env, admin: Address, asset: Address, timelock: u64) {
        if utils::is_initialized(&env) {
            log!(&env, "Coverage Pool: Initialize: initializing contract twice is not allowed");
            panic_with_error!(&env, ErrorCode::AlreadyInitialized);
        }

        utils::set_initialized(&env);

        storage::save_config(&env, &Config {
            admin: admin.clone(),
            asset: asset.clone(),
            timelock,
        });
        storage::save_pool(&env, &Pool::default());
        storage::save_registry(&env, &Vec::new(&env));

        env.storage().instance().extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        CoveragePoolEvents::initialize(&env, admin, asset, timelock);
    }

    fn set_timelock(env: Env, sender: Address, timelock: u64) -> Result<(), ErrorCode> {
        require_admin(&env, &sender)?;

        let mut config = storage::get_config(&env)?;
        config.timelock = timelock;
        storage::save_config(&env, &config);

        CoveragePoolEvents::timelock_updated(&env, timelock);

        Ok(())
    }

    fn register_or_update_protocol(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        max_funds_covered: i128,
        premium_rate: i128,
        last_settled_tick: Option<u64>
    ) -> Result<(), ErrorCode> {
        require_admin(&env, &sender)?;

        ledger(&env)?.register_or_update(
            &protocol,
            max_funds_covered,
            premium_rate,
            last_settled_tick
        )
    }

    fn remove_protocol(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        index_hint: u32,
        receiver: Address
    ) -> Result<i128, ErrorCode> {
        require_admin(&env, &sender)?;

        ledger(&env)?.remove_protocol(&protocol, index_hint, &receiver)
    }

    fn insurance_payout(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        amount: i128,
        recipient: Address
    ) -> Result<(), ErrorCode> {
        require_admin(&env, &sender)?;

        ledger(&env)?.insurance_payout(&protocol, amount, &recipient)
    }

    fn stake(env: Env, sender: Address, amount: i128) -> Result<i128, ErrorCode> {
        sender.require_auth();

        ledger(&env)?.stake(&sender, amount)
    }

    fn withdraw_stake(env: Env, sender: Address, shares: i128) -> Result<(), ErrorCode> {
        sender.require_auth();

        ledger(&env)?.withdraw_stake(&sender, shares)
    }

    fn cancel_withdraw(env: Env, sender: Address) -> Result<(), ErrorCode> {
        sender.require_auth();

        ledger(&env)?.cancel_withdraw(&sender)
    }

    fn claim_funds(env: Env, owner: Address) -> Result<i128, ErrorCode> {
        ledger(&env)?.claim_funds(&owner)
    }

    fn add_profile_balance(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        amount: i128
    ) -> Result<(), ErrorCode> {
        sender.require_auth();

        ledger(&env)?.add_profile_balance(&sender, &protocol, amount)
    }

    fn pay_off_debt(env: Env, protocol: BytesN<32>) -> Result<i128, ErrorCode> {
        ledger(&env)?.pay_off_debt(&protocol)
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Result<Config, ErrorCode> {
        storage::get_config(&env)
    }

    fn query_pool(env: Env) -> Pool {
        storage::get_pool(&env)
    }

    fn get_funds(env: Env, owner: Address) -> Result<i128, ErrorCode> {
        ledger(&env)?.get_funds(&owner)
    }

    fn get_total_staked_funds(env: Env) -> i128 {
        storage::get_pool(&env).total_pooled_funds
    }

    fn share_balance(env: Env, owner: Address) -> i128 {
        storage::get_shares(&env, &owner)
    }

    fn query_withdraw_request(env: Env, owner: Address) -> Option<WithdrawRequest> {
        storage::get_withdraw_request(&env, &owner)
    }

    fn accrued_debt(env: Env, protocol: BytesN<32>) -> Result<i128, ErrorCode> {
        ledger(&env)?.accrued_debt(&protocol)
    }

    fn premium_per_tick(env: Env, protocol: BytesN<32>) -> Result<i128, ErrorCode> {
        ledger(&env)?.premium_per_tick(&protocol)
    }

    fn covered_funds(env: Env, protocol: BytesN<32>) -> i128 {
        storage::get_profile(&env, &protocol).map_or(0, |profile| profile.covered_funds)
    }

    fn profile_balance(env: Env, protocol: BytesN<32>) -> i128 {
        storage::get_profile(&env, &protocol).map_or(0, |profile| profile.profile_balance)
    }

    fn protocol_covered(env: Env, protocol: BytesN<32>) -> bool {
        storage::get_profile(&env, &protocol).is_some()
    }

    fn premium_last_settled_tick(env: Env, protocol: BytesN<32>) -> u64 {
        storage::get_profile(&env, &protocol).map_or(0, |profile| profile.premium_last_settled_tick)
    }

    fn query_protocols(env: Env) -> Vec<BytesN<32>> {
        storage::get_registry(&env)
    }

    fn query_profile(env: Env, protocol: BytesN<32>) -> Option<CoverageProfile> {
        storage::get_profile(&env, &protocol)
    }
}
