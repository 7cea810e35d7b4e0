use soroban_sdk::{ Address, BytesN, Env, Symbol };

pub struct CoveragePoolEvents {}

impl CoveragePoolEvents {
    // Admin Events

    /// Emitted when the pool is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[asset: Address, timelock: u64]`
    pub fn initialize(env: &Env, admin: Address, asset: Address, timelock: u64) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (asset, timelock));
    }

    /// Emitted when the admin changes the withdrawal timelock
    ///
    /// - topics - `["timelock_updated"]`
    /// - data - `[timelock: u64]`
    pub fn timelock_updated(env: &Env, timelock: u64) {
        let topics = (Symbol::new(env, "timelock_updated"),);
        env.events().publish(topics, timelock);
    }

    // Stake Events

    /// - topics - `["stake", owner: Address]`
    /// - data - `[amount: i128, shares: i128]`
    pub fn stake(env: &Env, owner: Address, amount: i128, shares: i128) {
        let topics = (Symbol::new(env, "stake"), owner);
        env.events().publish(topics, (amount, shares));
    }

    /// - topics - `["withdraw_requested", owner: Address]`
    /// - data - `[shares: i128, request_tick: u64, timelock: u64]`
    pub fn withdraw_requested(env: &Env, owner: Address, shares: i128, request_tick: u64, timelock: u64) {
        let topics = (Symbol::new(env, "withdraw_requested"), owner);
        env.events().publish(topics, (shares, request_tick, timelock));
    }

    /// - topics - `["withdraw_cancelled", owner: Address]`
    /// - data - `[shares: i128]`
    pub fn withdraw_cancelled(env: &Env, owner: Address, shares: i128) {
        let topics = (Symbol::new(env, "withdraw_cancelled"), owner);
        env.events().publish(topics, shares);
    }

    /// Emitted when a vested withdrawal is settled
    ///
    /// - topics - `["funds_claimed", owner: Address]`
    /// - data - `[shares: i128, amount: i128]`
    pub fn funds_claimed(env: &Env, owner: Address, shares: i128, amount: i128) {
        let topics = (Symbol::new(env, "funds_claimed"), owner);
        env.events().publish(topics, (shares, amount));
    }

    // Coverage Events

    /// - topics - `["profile_updated", protocol: BytesN<32>]`
    /// - data - `[max_funds_covered: i128, premium_rate: i128, premium_last_settled_tick: u64, covered_funds: i128]`
    pub fn profile_updated(
        env: &Env,
        protocol: BytesN<32>,
        max_funds_covered: i128,
        premium_rate: i128,
        premium_last_settled_tick: u64,
        covered_funds: i128
    ) {
        let topics = (Symbol::new(env, "profile_updated"), protocol);
        env.events().publish(topics, (
            max_funds_covered,
            premium_rate,
            premium_last_settled_tick,
            covered_funds,
        ));
    }

    /// - topics - `["profile_removed", protocol: BytesN<32>, receiver: Address]`
    /// - data - `[settled_debt: i128, written_off_debt: i128, refund: i128]`
    pub fn profile_removed(
        env: &Env,
        protocol: BytesN<32>,
        receiver: Address,
        settled_debt: i128,
        written_off_debt: i128,
        refund: i128
    ) {
        let topics = (Symbol::new(env, "profile_removed"), protocol, receiver);
        env.events().publish(topics, (settled_debt, written_off_debt, refund));
    }

    /// - topics - `["profile_balance_added", protocol: BytesN<32>, payer: Address]`
    /// - data - `[amount: i128, profile_balance: i128]`
    pub fn profile_balance_added(
        env: &Env,
        protocol: BytesN<32>,
        payer: Address,
        amount: i128,
        profile_balance: i128
    ) {
        let topics = (Symbol::new(env, "profile_balance_added"), protocol, payer);
        env.events().publish(topics, (amount, profile_balance));
    }

    /// - topics - `["debt_paid", protocol: BytesN<32>]`
    /// - data - `[debt: i128, tick: u64]`
    pub fn debt_paid(env: &Env, protocol: BytesN<32>, debt: i128, tick: u64) {
        let topics = (Symbol::new(env, "debt_paid"), protocol);
        env.events().publish(topics, (debt, tick));
    }

    /// - topics - `["insurance_payout", protocol: BytesN<32>, recipient: Address]`
    /// - data - `[amount: i128]`
    pub fn insurance_payout(env: &Env, protocol: BytesN<32>, recipient: Address, amount: i128) {
        let topics = (Symbol::new(env, "insurance_payout"), protocol, recipient);
        env.events().publish(topics, amount);
    }
}
