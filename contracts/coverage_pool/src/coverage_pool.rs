use coverage::error::ErrorCode;
use soroban_sdk::{ Address, BytesN, Env, Vec };

use crate::storage::{ Config, CoverageProfile, Pool, WithdrawRequest };

pub trait CoveragePoolTrait {
    // ################################################################
    //                             ADMIN
    // ################################################################

    fn initialize(env: Env, admin: Address, asset: Address, timelock: u64);

    fn set_timelock(env: Env, sender: Address, timelock: u64) -> Result<(), ErrorCode>;

    /// `last_settled_tick` of `None` starts accrual at the current tick for a new
    /// protocol and keeps the existing baseline when updating one.
    fn register_or_update_protocol(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        max_funds_covered: i128,
        premium_rate: i128,
        last_settled_tick: Option<u64>
    ) -> Result<(), ErrorCode>;

    /// Returns the profile balance refunded to `receiver`.
    fn remove_protocol(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        index_hint: u32,
        receiver: Address
    ) -> Result<i128, ErrorCode>;

    fn insurance_payout(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        amount: i128,
        recipient: Address
    ) -> Result<(), ErrorCode>;

    // ################################################################
    //                             USER
    // ################################################################

    /// Returns the minted shares.
    fn stake(env: Env, sender: Address, amount: i128) -> Result<i128, ErrorCode>;

    fn withdraw_stake(env: Env, sender: Address, shares: i128) -> Result<(), ErrorCode>;

    fn cancel_withdraw(env: Env, sender: Address) -> Result<(), ErrorCode>;

    /// Settles a vested withdrawal of `owner`. Anyone may call it; funds always go to `owner`.
    fn claim_funds(env: Env, owner: Address) -> Result<i128, ErrorCode>;

    // ################################################################
    //                            PROTOCOL
    // ################################################################

    fn add_profile_balance(
        env: Env,
        sender: Address,
        protocol: BytesN<32>,
        amount: i128
    ) -> Result<(), ErrorCode>;

    /// Returns the settled debt.
    fn pay_off_debt(env: Env, protocol: BytesN<32>) -> Result<i128, ErrorCode>;

    // ################################################################
    //                             QUERIES
    // ################################################################

    fn query_config(env: Env) -> Result<Config, ErrorCode>;

    fn query_pool(env: Env) -> Pool;

    fn get_funds(env: Env, owner: Address) -> Result<i128, ErrorCode>;

    fn get_total_staked_funds(env: Env) -> i128;

    fn share_balance(env: Env, owner: Address) -> i128;

    fn query_withdraw_request(env: Env, owner: Address) -> Option<WithdrawRequest>;

    fn accrued_debt(env: Env, protocol: BytesN<32>) -> Result<i128, ErrorCode>;

    fn premium_per_tick(env: Env, protocol: BytesN<32>) -> Result<i128, ErrorCode>;

    fn covered_funds(env: Env, protocol: BytesN<32>) -> i128;

    fn profile_balance(env: Env, protocol: BytesN<32>) -> i128;

    fn protocol_covered(env: Env, protocol: BytesN<32>) -> bool;

    fn premium_last_settled_tick(env: Env, protocol: BytesN<32>) -> u64;

    fn query_protocols(env: Env) -> Vec<BytesN<32>>;

    fn query_profile(env: Env, protocol: BytesN<32>) -> Option<CoverageProfile>;
}
