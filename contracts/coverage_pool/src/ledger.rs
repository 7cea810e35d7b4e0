use coverage::{
    error::{ CoverageResult, ErrorCode },
    math::{ safe_math::SafeMath, shares::shares_to_amount },
    validate,
};
use soroban_sdk::{ log, Address, BytesN, Env, Vec };

use crate::{
    controller::{ protocol, stake },
    events::CoveragePoolEvents,
    interfaces::{ AssetTransfer, TickSource },
    storage::{ self, CoverageProfile, WithdrawRequest },
};

/// Coverage-pool accounting over the contract's storage.
///
/// Every operation validates and computes its effects in memory before the
/// first storage write. Inbound transfers are taken before state is committed,
/// outbound transfers are sent after it.
pub struct CoverageLedger<'a, C: TickSource, A: AssetTransfer> {
    env: &'a Env,
    clock: C,
    assets: A,
}

impl<'a, C: TickSource, A: AssetTransfer> CoverageLedger<'a, C, A> {
    pub fn new(env: &'a Env, clock: C, assets: A) -> Self {
        CoverageLedger { env, clock, assets }
    }

    // ################################################################
    //                              Stake
    // ################################################################

    pub fn stake(&self, owner: &Address, amount: i128) -> CoverageResult<i128> {
        let mut pool = storage::get_pool(self.env);
        let mut free_shares = storage::get_shares(self.env, owner);

        let n_shares = stake::add_stake(self.env, &mut pool, &mut free_shares, amount)?;

        self.assets.credit_in(owner, amount)?;

        storage::save_shares(self.env, owner, free_shares);
        storage::save_pool(self.env, &pool);
        self.reallocate(pool.total_pooled_funds)?;

        log!(self.env, "Coverage Pool: staked {} for {} shares", amount, n_shares);
        CoveragePoolEvents::stake(self.env, owner.clone(), amount, n_shares);

        Ok(n_shares)
    }

    pub fn withdraw_stake(&self, owner: &Address, n_shares: i128) -> CoverageResult {
        let now = self.clock.current_tick();
        let timelock = storage::get_config(self.env)?.timelock;
        let existing = storage::get_withdraw_request(self.env, owner);
        let mut free_shares = storage::get_shares(self.env, owner);

        let request = stake::request_remove_stake(
            self.env,
            &mut free_shares,
            existing.as_ref(),
            n_shares,
            now,
            timelock
        )?;

        storage::save_shares(self.env, owner, free_shares);
        storage::save_withdraw_request(self.env, owner, &request);

        CoveragePoolEvents::withdraw_requested(
            self.env,
            owner.clone(),
            request.share_amount,
            request.request_tick,
            request.timelock
        );

        Ok(())
    }

    pub fn cancel_withdraw(&self, owner: &Address) -> CoverageResult {
        let now = self.clock.current_tick();
        let request = self.load_withdraw_request(owner)?;
        let mut free_shares = storage::get_shares(self.env, owner);

        stake::cancel_request_remove_stake(self.env, &mut free_shares, &request, now)?;

        storage::save_shares(self.env, owner, free_shares);
        storage::remove_withdraw_request(self.env, owner);

        log!(self.env, "Coverage Pool: withdrawal of {} shares cancelled", request.share_amount);
        CoveragePoolEvents::withdraw_cancelled(self.env, owner.clone(), request.share_amount);

        Ok(())
    }

    pub fn claim_funds(&self, owner: &Address) -> CoverageResult<i128> {
        let now = self.clock.current_tick();
        let request = self.load_withdraw_request(owner)?;
        let mut pool = storage::get_pool(self.env);

        let amount = stake::remove_stake(self.env, &mut pool, &request, now)?;

        storage::remove_withdraw_request(self.env, owner);
        storage::save_pool(self.env, &pool);
        self.reallocate(pool.total_pooled_funds)?;

        if amount > 0 {
            self.assets.pay_out(owner, amount)?;
        }

        log!(self.env, "Coverage Pool: claimed {} for {} shares", amount, request.share_amount);
        CoveragePoolEvents::funds_claimed(self.env, owner.clone(), request.share_amount, amount);

        Ok(amount)
    }

    // ################################################################
    //                        Coverage Registry
    // ################################################################

    pub fn register_or_update(
        &self,
        protocol_id: &BytesN<32>,
        max_funds_covered: i128,
        premium_rate: i128,
        last_settled_tick: Option<u64>
    ) -> CoverageResult {
        let now = self.clock.current_tick();
        let pool = storage::get_pool(self.env);
        let mut registry = storage::get_registry(self.env);
        let existing = storage::get_profile(self.env, protocol_id);
        let is_new = existing.is_none();

        let mut profile = protocol::apply_terms(
            self.env,
            existing,
            max_funds_covered,
            premium_rate,
            last_settled_tick,
            registry.len(),
            now
        )?;
        profile.allocate(pool.total_pooled_funds);

        if is_new {
            registry.push_back(protocol_id.clone());
            storage::save_registry(self.env, &registry);
        }
        storage::save_profile(self.env, protocol_id, &profile);

        log!(self.env, "Coverage Pool: protocol terms set, covering {}", profile.covered_funds);
        CoveragePoolEvents::profile_updated(
            self.env,
            protocol_id.clone(),
            profile.max_funds_covered,
            profile.premium_rate,
            profile.premium_last_settled_tick,
            profile.covered_funds
        );

        Ok(())
    }

    /// Settles outstanding debt as far as the profile balance allows, writes off
    /// the rest, drops the protocol from the registry and refunds the leftover
    /// balance to `receiver`.
    pub fn remove_protocol(
        &self,
        protocol_id: &BytesN<32>,
        index_hint: u32,
        receiver: &Address
    ) -> CoverageResult<i128> {
        let now = self.clock.current_tick();
        let mut profile = self.load_profile(protocol_id)?;
        let mut registry = storage::get_registry(self.env);

        validate!(
            self.env,
            index_hint == profile.registry_index &&
                registry.get(index_hint).as_ref() == Some(protocol_id),
            ErrorCode::ValidationError,
            "index hint {} does not match registry index {}",
            index_hint,
            profile.registry_index
        )?;

        let mut pool = storage::get_pool(self.env);
        let (settled_debt, written_off) = protocol::settle_debt_on_removal(
            self.env,
            &mut profile,
            &mut pool,
            now
        )?;
        let refund = profile.profile_balance;

        self.swap_remove(&mut registry, index_hint)?;
        storage::save_registry(self.env, &registry);
        storage::remove_profile(self.env, protocol_id);
        storage::save_pool(self.env, &pool);
        self.reallocate(pool.total_pooled_funds)?;

        if refund > 0 {
            self.assets.pay_out(receiver, refund)?;
        }

        log!(
            self.env,
            "Coverage Pool: protocol removed, settled {} wrote off {} refunded {}",
            settled_debt,
            written_off,
            refund
        );
        CoveragePoolEvents::profile_removed(
            self.env,
            protocol_id.clone(),
            receiver.clone(),
            settled_debt,
            written_off,
            refund
        );

        Ok(refund)
    }

    // ################################################################
    //                              Debt
    // ################################################################

    pub fn add_profile_balance(
        &self,
        payer: &Address,
        protocol_id: &BytesN<32>,
        amount: i128
    ) -> CoverageResult {
        validate!(
            self.env,
            amount > 0,
            ErrorCode::ValidationError,
            "profile balance top up must be positive"
        )?;

        let mut profile = self.load_profile(protocol_id)?;
        profile.profile_balance = profile.profile_balance.safe_add(amount, self.env)?;

        self.assets.credit_in(payer, amount)?;

        storage::save_profile(self.env, protocol_id, &profile);

        log!(self.env, "Coverage Pool: profile balance topped up by {}", amount);
        CoveragePoolEvents::profile_balance_added(
            self.env,
            protocol_id.clone(),
            payer.clone(),
            amount,
            profile.profile_balance
        );

        Ok(())
    }

    pub fn pay_off_debt(&self, protocol_id: &BytesN<32>) -> CoverageResult<i128> {
        let now = self.clock.current_tick();
        let mut profile = self.load_profile(protocol_id)?;
        let mut pool = storage::get_pool(self.env);

        let debt = protocol::settle_debt(self.env, &mut profile, &mut pool, now)?;

        storage::save_profile(self.env, protocol_id, &profile);
        storage::save_pool(self.env, &pool);
        self.reallocate(pool.total_pooled_funds)?;

        log!(self.env, "Coverage Pool: settled debt of {} at tick {}", debt, now);
        CoveragePoolEvents::debt_paid(self.env, protocol_id.clone(), debt, now);

        Ok(debt)
    }

    // ################################################################
    //                             Claims
    // ################################################################

    pub fn insurance_payout(
        &self,
        protocol_id: &BytesN<32>,
        amount: i128,
        recipient: &Address
    ) -> CoverageResult {
        let profile = self.load_profile(protocol_id)?;
        let mut pool = storage::get_pool(self.env);

        protocol::apply_payout(self.env, &profile, &mut pool, amount)?;

        storage::save_pool(self.env, &pool);
        self.reallocate(pool.total_pooled_funds)?;

        self.assets.pay_out(recipient, amount)?;

        log!(self.env, "Coverage Pool: paid out {} to {}", amount, recipient.clone());
        CoveragePoolEvents::insurance_payout(
            self.env,
            protocol_id.clone(),
            recipient.clone(),
            amount
        );

        Ok(())
    }

    // ################################################################
    //                             Queries
    // ################################################################

    /// Redeemable value of the owner's free shares. Escrowed shares are excluded.
    pub fn get_funds(&self, owner: &Address) -> CoverageResult<i128> {
        let pool = storage::get_pool(self.env);
        shares_to_amount(
            self.env,
            storage::get_shares(self.env, owner),
            pool.total_share_supply,
            pool.total_pooled_funds
        )
    }

    pub fn accrued_debt(&self, protocol_id: &BytesN<32>) -> CoverageResult<i128> {
        match storage::get_profile(self.env, protocol_id) {
            Some(profile) => profile.accrued_debt(self.env, self.clock.current_tick()),
            None => Ok(0),
        }
    }

    pub fn premium_per_tick(&self, protocol_id: &BytesN<32>) -> CoverageResult<i128> {
        match storage::get_profile(self.env, protocol_id) {
            Some(profile) => profile.premium_per_tick(self.env),
            None => Ok(0),
        }
    }

    // ################################################################
    //                             Helpers
    // ################################################################

    fn load_profile(&self, protocol_id: &BytesN<32>) -> CoverageResult<CoverageProfile> {
        match storage::get_profile(self.env, protocol_id) {
            Some(profile) => Ok(profile),
            None => {
                log!(self.env, "Coverage Pool: protocol is not covered");
                Err(ErrorCode::NotCovered)
            }
        }
    }

    fn load_withdraw_request(&self, owner: &Address) -> CoverageResult<WithdrawRequest> {
        match storage::get_withdraw_request(self.env, owner) {
            Some(request) => Ok(request),
            None => {
                log!(self.env, "Coverage Pool: no withdrawal request pending for {}", owner.clone());
                Err(ErrorCode::WithdrawNotActive)
            }
        }
    }

    /// Recomputes the allocation of every registered profile, writing only
    /// the profiles whose allocation changed.
    ///
    /// Cost is linear in the registry, which lives in instance storage and is
    /// bounded by the instance entry size limit.
    fn reallocate(&self, total_pooled_funds: i128) -> CoverageResult {
        for protocol_id in storage::get_registry(self.env).iter() {
            let mut profile = self.load_profile(&protocol_id)?;
            let previous = profile.covered_funds;
            profile.allocate(total_pooled_funds);
            if profile.covered_funds != previous {
                storage::save_profile(self.env, &protocol_id, &profile);
            }
        }

        Ok(())
    }

    /// Removes `index` by moving the last registry entry into its slot.
    fn swap_remove(&self, registry: &mut Vec<BytesN<32>>, index: u32) -> CoverageResult {
        let last_index = registry.len().safe_sub(1, self.env)?;

        if index != last_index {
            let moved_id = registry.get(last_index).ok_or(ErrorCode::ValidationError)?;
            let mut moved = self.load_profile(&moved_id)?;
            moved.registry_index = index;
            storage::save_profile(self.env, &moved_id, &moved);
            registry.set(index, moved_id);
        }
        registry.pop_back();

        Ok(())
    }
}

