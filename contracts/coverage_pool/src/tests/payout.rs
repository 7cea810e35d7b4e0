use coverage::error::ErrorCode;
use pretty_assertions::assert_eq;
use soroban_sdk::{ testutils::Address as _, Address };

use super::setup::{ protocol_id, CoverageTest, ONE_PERCENT };
use crate::storage::Pool;

#[test]
fn payout_exceeding_coverage_fails() {
    let test = CoverageTest::setup();
    let protocol = protocol_id(&test.env, 1);
    let recipient = Address::generate(&test.env);
    test.staker(500);
    test.register(&protocol, 500, ONE_PERCENT);

    assert_eq!(
        test.pool.try_insurance_payout(&test.admin, &protocol, &501, &recipient),
        Err(Ok(ErrorCode::InsufficientCoverage))
    );
    assert_eq!(test.pool.get_total_staked_funds(), 500);
    assert_eq!(test.token.balance(&recipient), 0);
}

#[test]
fn payout_can_drain_the_whole_stake() {
    let test = CoverageTest::setup();
    let protocol = protocol_id(&test.env, 1);
    let recipient = Address::generate(&test.env);
    let owner = test.staker(250);
    test.register(&protocol, 500, ONE_PERCENT);
    assert_eq!(test.pool.covered_funds(&protocol), 250);

    test.pool.insurance_payout(&test.admin, &protocol, &250, &recipient);

    assert_eq!(test.token.balance(&recipient), 250);
    assert_eq!(test.pool.query_pool(), Pool { total_pooled_funds: 0, total_share_supply: 250 });
    assert_eq!(test.pool.covered_funds(&protocol), 0);
    assert_eq!(test.pool.profile_balance(&protocol), 0);
    assert_eq!(test.pool.get_funds(&owner), 0);
    assert_eq!(test.vault_balance(), 0);
}

#[test]
fn stake_into_pool_drained_by_payout_fails() {
    let test = CoverageTest::setup();
    let protocol = protocol_id(&test.env, 1);
    let recipient = Address::generate(&test.env);
    test.staker(250);
    test.register(&protocol, 500, ONE_PERCENT);
    test.pool.insurance_payout(&test.admin, &protocol, &250, &recipient);
    let late = test.funded_account(100);

    assert_eq!(test.pool.try_stake(&late, &100), Err(Ok(ErrorCode::ValidationError)));
}

#[test]
fn losses_are_shared_pro_rata() {
    let test = CoverageTest::setup();
    let protocol = protocol_id(&test.env, 1);
    let recipient = Address::generate(&test.env);
    let large = test.staker(300);
    let small = test.staker(200);
    test.register(&protocol, 500, ONE_PERCENT);

    test.pool.insurance_payout(&test.admin, &protocol, &100, &recipient);

    assert_eq!(test.pool.get_funds(&large), 240);
    assert_eq!(test.pool.get_funds(&small), 160);
    assert_eq!(test.pool.get_total_staked_funds(), 400);
}

#[test]
fn payout_reallocates_every_profile() {
    let test = CoverageTest::setup();
    let first = protocol_id(&test.env, 1);
    let second = protocol_id(&test.env, 2);
    let recipient = Address::generate(&test.env);
    test.staker(1_000);
    test.register(&first, 900, ONE_PERCENT);
    test.register(&second, 300, ONE_PERCENT);

    test.pool.insurance_payout(&test.admin, &first, &800, &recipient);

    assert_eq!(test.pool.covered_funds(&first), 200);
    assert_eq!(test.pool.covered_funds(&second), 200);
}

#[test]
fn payout_leaves_accrued_debt_outstanding() {
    let test = CoverageTest::setup();
    let protocol = protocol_id(&test.env, 1);
    let recipient = Address::generate(&test.env);
    test.staker(500);
    test.register(&protocol, 500, ONE_PERCENT);
    test.advance(10);

    test.pool.insurance_payout(&test.admin, &protocol, &100, &recipient);

    // debt is recomputed from the reduced allocation over the unsettled window
    assert_eq!(test.pool.covered_funds(&protocol), 400);
    assert_eq!(test.pool.accrued_debt(&protocol), 40);
    assert_eq!(test.pool.premium_last_settled_tick(&protocol), test.tick() - 10);
}

#[test]
fn payout_requires_admin_and_a_registered_protocol() {
    let test = CoverageTest::setup();
    let protocol = protocol_id(&test.env, 1);
    let recipient = Address::generate(&test.env);
    test.staker(500);
    test.register(&protocol, 500, ONE_PERCENT);

    assert_eq!(
        test.pool.try_insurance_payout(&recipient, &protocol, &100, &recipient),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    assert_eq!(
        test.pool.try_insurance_payout(&test.admin, &protocol_id(&test.env, 2), &100, &recipient),
        Err(Ok(ErrorCode::NotCovered))
    );
    assert_eq!(
        test.pool.try_insurance_payout(&test.admin, &protocol, &0, &recipient),
        Err(Ok(ErrorCode::ValidationError))
    );
    assert_eq!(test.pool.get_total_staked_funds(), 500);
}
