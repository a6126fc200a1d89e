extern crate std;

use identity_earning_power::IdentityEarningPowerCalculator;
use soroban_sdk::{testutils::Address as _, Address};

use crate::{
    test::{setup, setup_with_oracle, MAX_BUMP_TIP, MAX_CLAIM_FEE, SCORE_THRESHOLD},
    ContractError,
};

// ── Admin role ───────────────────────────────────────────────────────────────

#[test]
fn test_admin_transfer() {
    let t = setup();
    let new_admin = Address::generate(&t.env);

    t.client.set_admin(&t.admin, &new_admin);
    assert_eq!(t.client.get_config().admin, new_admin);

    // The previous admin loses every privilege.
    let result = t.client.try_set_max_bump_tip(&t.admin, &1);
    assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
    t.client.set_max_bump_tip(&new_admin, &1);
}

#[test]
fn test_admin_cannot_be_ledger_itself() {
    let t = setup();
    let result = t.client.try_set_admin(&t.admin, &t.client.address);
    assert_eq!(result, Err(Ok(ContractError::InvalidAddress)));
}

#[test]
fn test_non_admin_is_rejected_everywhere() {
    let t = setup();
    let intruder = Address::generate(&t.env);

    assert_eq!(
        t.client.try_set_admin(&intruder, &intruder),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        t.client.try_set_earning_power_calculator(&intruder, &intruder),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        t.client.try_set_max_bump_tip(&intruder, &0),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        t.client.try_set_reward_notifier(&intruder, &intruder, &true),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        t.client.try_set_claim_fee_parameters(&intruder, &0, &None),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        t.client.try_set_total_stake_cap(&intruder, &0),
        Err(Ok(ContractError::Unauthorized))
    );
}

#[test]
fn test_admin_calls_need_signature() {
    let t = setup();
    t.env.set_auths(&[]);

    assert!(t.client.try_set_max_bump_tip(&t.admin, &1).is_err());
    assert_eq!(t.client.get_config().max_bump_tip, MAX_BUMP_TIP);
}

// ── Parameters ───────────────────────────────────────────────────────────────

#[test]
fn test_set_max_bump_tip() {
    let t = setup();

    t.client.set_max_bump_tip(&t.admin, &5_000);
    assert_eq!(t.client.get_config().max_bump_tip, 5_000);

    let result = t.client.try_set_max_bump_tip(&t.admin, &-1);
    assert_eq!(result, Err(Ok(ContractError::InvalidAmount)));
}

#[test]
fn test_set_reward_notifier_toggles() {
    let t = setup();
    let funder = Address::generate(&t.env);

    assert!(!t.client.is_reward_notifier(&funder));
    t.client.set_reward_notifier(&t.admin, &funder, &true);
    assert!(t.client.is_reward_notifier(&funder));
    t.client.set_reward_notifier(&t.admin, &funder, &false);
    assert!(!t.client.is_reward_notifier(&funder));
}

#[test]
fn test_claim_fee_parameters_are_validated() {
    let t = setup();
    let collector = Address::generate(&t.env);

    let result =
        t.client
            .try_set_claim_fee_parameters(&t.admin, &(MAX_CLAIM_FEE + 1), &Some(collector.clone()));
    assert_eq!(result, Err(Ok(ContractError::InvalidClaimFeeParameters)));

    let result = t
        .client
        .try_set_claim_fee_parameters(&t.admin, &-1, &Some(collector.clone()));
    assert_eq!(result, Err(Ok(ContractError::InvalidClaimFeeParameters)));

    let result = t.client.try_set_claim_fee_parameters(&t.admin, &1, &None);
    assert_eq!(result, Err(Ok(ContractError::InvalidClaimFeeParameters)));

    t.client
        .set_claim_fee_parameters(&t.admin, &MAX_CLAIM_FEE, &Some(collector.clone()));
    let fee = t.client.get_config().claim_fee;
    assert_eq!(fee.fee_amount, MAX_CLAIM_FEE);
    assert_eq!(fee.fee_collector, Some(collector));

    // Turning the fee off needs no collector.
    t.client.set_claim_fee_parameters(&t.admin, &0, &None);
    assert_eq!(t.client.get_config().claim_fee.fee_amount, 0);
}

#[test]
fn test_swapping_calculator_applies_to_new_touches() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &(SCORE_THRESHOLD - 1));
    let (owner, id) = t.stake(100, &delegatee);
    assert_eq!(t.client.get_deposit(&id).earning_power, 0);

    let identity = t.env.register(IdentityEarningPowerCalculator, ());
    t.client.set_earning_power_calculator(&t.admin, &identity);
    assert_eq!(t.client.get_config().earning_power_calculator, identity);

    // Cached until the deposit is touched again.
    assert_eq!(t.client.get_deposit(&id).earning_power, 0);
    t.stake_token.mint(&owner, &1);
    t.client.stake_more(&owner, &id, &1);
    assert_eq!(t.client.get_deposit(&id).earning_power, 101);
    assert_eq!(t.client.total_earning_power(), 101);
}

// ── Stake cap ────────────────────────────────────────────────────────────────

#[test]
fn test_total_stake_cap() {
    let t = setup();
    let delegatee = t.delegatee();
    t.client.set_total_stake_cap(&t.admin, &1_000);
    assert_eq!(t.client.get_config().total_stake_cap, 1_000);

    let (owner, id) = t.stake(600, &delegatee);

    let depositor = t.depositor(500);
    let result = t.client.try_stake(&depositor, &500, &delegatee);
    assert_eq!(result, Err(Ok(ContractError::CapExceeded)));

    t.stake_token.mint(&owner, &401);
    let result = t.client.try_stake_more(&owner, &id, &401);
    assert_eq!(result, Err(Ok(ContractError::CapExceeded)));

    // Exactly at the cap is fine.
    t.client.stake_more(&owner, &id, &400);
    assert_eq!(t.client.total_staked(), 1_000);

    // Withdrawals are never blocked by the cap.
    t.client.set_total_stake_cap(&t.admin, &0);
    t.client.withdraw(&owner, &id, &1_000);
    assert_eq!(t.client.total_staked(), 0);
}

#[test]
fn test_negative_stake_cap_is_rejected() {
    let t = setup();
    let result = t.client.try_set_total_stake_cap(&t.admin, &-1);
    assert_eq!(result, Err(Ok(ContractError::InvalidAmount)));
}
