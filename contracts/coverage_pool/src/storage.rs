use coverage::{
    constants::{ PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD },
    error::{ CoverageResult, ErrorCode },
};
use soroban_sdk::{ contracttype, log, Address, BytesN, Env, Vec };

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Initialized,
    Config,
    Pool,
    Registry,
    Profile(BytesN<32>),
    Shares(Address),
    Withdrawal(Address),
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Token every stake, premium and payout is denominated in
    pub asset: Address,
    /// Ticks a withdrawal request must wait before it can be claimed
    pub timelock: u64,
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_config(env: &Env) -> CoverageResult<Config> {
    match env.storage().instance().get(&DataKey::Config) {
        Some(config) => Ok(config),
        None => {
            log!(env, "Coverage Pool: config not set, contract is not initialized");
            Err(ErrorCode::NotInitialized)
        }
    }
}

// ################################################################
//                              Pool
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pool {
    pub total_pooled_funds: i128,
    pub total_share_supply: i128,
}

pub fn save_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&DataKey::Pool, pool);
}

pub fn get_pool(env: &Env) -> Pool {
    env.storage().instance().get(&DataKey::Pool).unwrap_or_default()
}

// ################################################################
//                        Coverage Profiles
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoverageProfile {
    pub max_funds_covered: i128,
    /// Fraction of covered funds owed per tick, scaled by `PREMIUM_RATE_PRECISION`
    pub premium_rate: i128,
    pub premium_last_settled_tick: u64,
    pub profile_balance: i128,
    pub covered_funds: i128,
    /// Position of the protocol in the registry
    pub registry_index: u32,
}

pub fn get_registry(env: &Env) -> Vec<BytesN<32>> {
    env.storage()
        .instance()
        .get(&DataKey::Registry)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_registry(env: &Env, registry: &Vec<BytesN<32>>) {
    env.storage().instance().set(&DataKey::Registry, registry);
}

pub fn get_profile(env: &Env, protocol: &BytesN<32>) -> Option<CoverageProfile> {
    let key = DataKey::Profile(protocol.clone());
    let profile = env.storage().persistent().get(&key);
    if profile.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }

    profile
}

pub fn save_profile(env: &Env, protocol: &BytesN<32>, profile: &CoverageProfile) {
    let key = DataKey::Profile(protocol.clone());
    env.storage().persistent().set(&key, profile);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn remove_profile(env: &Env, protocol: &BytesN<32>) {
    env.storage().persistent().remove(&DataKey::Profile(protocol.clone()));
}

// ################################################################
//                              Stake
// ################################################################

/// Free (not escrowed) shares held by `owner`
pub fn get_shares(env: &Env, owner: &Address) -> i128 {
    let key = DataKey::Shares(owner.clone());
    match env.storage().persistent().get(&key) {
        Some(shares) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
            shares
        }
        None => 0,
    }
}

pub fn save_shares(env: &Env, owner: &Address, shares: i128) {
    let key = DataKey::Shares(owner.clone());
    env.storage().persistent().set(&key, &shares);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawRequest {
    /// Shares held in escrow until the request is cancelled or claimed
    pub share_amount: i128,
    pub request_tick: u64,
    /// Timelock in effect when the request was made
    pub timelock: u64,
}

impl WithdrawRequest {
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.request_tick)
    }

    pub fn is_vested(&self, now: u64) -> bool {
        self.elapsed(now) >= self.timelock
    }
}

pub fn get_withdraw_request(env: &Env, owner: &Address) -> Option<WithdrawRequest> {
    let key = DataKey::Withdrawal(owner.clone());
    let request = env.storage().persistent().get(&key);
    if request.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }

    request
}

pub fn save_withdraw_request(env: &Env, owner: &Address, request: &WithdrawRequest) {
    let key = DataKey::Withdrawal(owner.clone());
    env.storage().persistent().set(&key, request);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn remove_withdraw_request(env: &Env, owner: &Address) {
    env.storage().persistent().remove(&DataKey::Withdrawal(owner.clone()));
}

pub mod utils {
    use super::*;

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().get(&DataKey::Initialized).unwrap_or(false)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
    }

    pub fn require_admin(env: &Env, config: &Config, sender: &Address) -> CoverageResult {
        if config.admin != *sender {
            log!(env, "Coverage Pool: You are not authorized!");
            return Err(ErrorCode::NotAuthorized);
        }

        Ok(())
    }
}
