extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::{
    rewards::{REWARD_DURATION, SCALE_FACTOR},
    test::{setup, setup_with_oracle, MAX_BUMP_TIP, REWARD, SCORE_THRESHOLD, UPDATE_DELAY},
    ContractError,
};

const ELIGIBLE: u64 = SCORE_THRESHOLD + 20;
const INELIGIBLE: u64 = SCORE_THRESHOLD - 20;

// ── Tip bounds ───────────────────────────────────────────────────────────────

#[test]
fn test_tip_above_maximum_is_rejected() {
    let t = setup();
    let delegatee = t.delegatee();
    let (_, id) = t.stake(100, &delegatee);
    let bumper = Address::generate(&t.env);

    let result = t
        .client
        .try_bump_earning_power(&id, &bumper, &(MAX_BUMP_TIP + 1));
    assert_eq!(result, Err(Ok(ContractError::InvalidTip)));

    let result = t.client.try_bump_earning_power(&id, &bumper, &-1);
    assert_eq!(result, Err(Ok(ContractError::InvalidTip)));
}

#[test]
fn test_bump_without_change_is_unqualified() {
    let t = setup();
    let delegatee = t.delegatee();
    let (_, id) = t.stake(100, &delegatee);
    let bumper = Address::generate(&t.env);

    let result = t.client.try_bump_earning_power(&id, &bumper, &0);
    assert_eq!(result, Err(Ok(ContractError::Unqualified)));
}

#[test]
fn test_bump_unknown_deposit() {
    let t = setup();
    let bumper = Address::generate(&t.env);

    let result = t.client.try_bump_earning_power(&7, &bumper, &0);
    assert_eq!(result, Err(Ok(ContractError::DepositNotFound)));
}

// ── Increases ────────────────────────────────────────────────────────────────

#[test]
fn test_increase_needs_unclaimed_rewards_to_cover_tip() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &INELIGIBLE);
    let (_, id) = t.stake(100, &delegatee);
    assert_eq!(t.client.get_deposit(&id).earning_power, 0);

    t.notify(REWARD);
    t.advance(1_000);
    calculator.update_delegatee_score(&oracle, &delegatee, &ELIGIBLE);

    // Zero earning power earned nothing, so no tip can be paid.
    let bumper = Address::generate(&t.env);
    let result = t.client.try_bump_earning_power(&id, &bumper, &1);
    assert_eq!(result, Err(Ok(ContractError::InsufficientUnclaimedRewards)));

    t.client.bump_earning_power(&id, &bumper, &0);
    assert_eq!(t.client.get_deposit(&id).earning_power, 100);
    assert_eq!(t.client.total_earning_power(), 100);
}

#[test]
fn test_bumped_deposit_starts_earning() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &INELIGIBLE);
    let (owner, id) = t.stake(100, &delegatee);

    t.notify(REWARD);
    calculator.update_delegatee_score(&oracle, &delegatee, &ELIGIBLE);
    t.client
        .bump_earning_power(&id, &Address::generate(&t.env), &0);
    t.advance(REWARD_DURATION);

    assert!(t.client.unclaimed_reward(&id) > 0);
    assert_eq!(t.client.depositor_total_earning_power(&owner), 100);
}

// ── Decreases ────────────────────────────────────────────────────────────────

#[test]
fn test_decrease_waits_for_update_delay() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &ELIGIBLE);
    let (_, id) = t.stake(100, &delegatee);
    t.notify(REWARD);
    t.advance(REWARD_DURATION / 3);

    calculator.update_delegatee_score(&oracle, &delegatee, &INELIGIBLE);
    let bumper = Address::generate(&t.env);

    let result = t.client.try_bump_earning_power(&id, &bumper, &0);
    assert_eq!(result, Err(Ok(ContractError::Unqualified)));

    t.advance(UPDATE_DELAY);
    t.client.bump_earning_power(&id, &bumper, &0);
    assert_eq!(t.client.get_deposit(&id).earning_power, 0);
    assert_eq!(t.client.total_earning_power(), 0);
}

#[test]
fn test_decrease_pays_tip_from_deposit_rewards() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &ELIGIBLE);
    let (_, id) = t.stake(100, &delegatee);
    t.notify(REWARD);
    t.advance(REWARD_DURATION / 3);

    calculator.update_delegatee_score(&oracle, &delegatee, &INELIGIBLE);
    t.advance(UPDATE_DELAY);

    let before = t.client.unclaimed_reward(&id);
    let bumper = Address::generate(&t.env);
    t.client.bump_earning_power(&id, &bumper, &MAX_BUMP_TIP);

    assert_eq!(t.reward_token.balance(&bumper), MAX_BUMP_TIP);
    assert_eq!(t.client.unclaimed_reward(&id), before - MAX_BUMP_TIP);

    // With zero earning power the deposit stops accruing.
    t.advance(1_000);
    assert_eq!(t.client.unclaimed_reward(&id), before - MAX_BUMP_TIP);
}

#[test]
fn test_decrease_keeps_margin_for_future_bump() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &ELIGIBLE);
    let (_, id) = t.stake(100, &delegatee);

    calculator.update_delegatee_score(&oracle, &delegatee, &INELIGIBLE);
    t.advance(UPDATE_DELAY);

    // No rewards at all: even a free bump would leave less than the max tip.
    let bumper = Address::generate(&t.env);
    let result = t.client.try_bump_earning_power(&id, &bumper, &0);
    assert_eq!(result, Err(Ok(ContractError::InsufficientUnclaimedRewards)));
    assert_eq!(t.client.get_deposit(&id).earning_power, 100);
}

#[test]
fn test_decrease_tip_cannot_eat_into_margin() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &ELIGIBLE);
    let (_, id) = t.stake(100, &delegatee);

    calculator.update_delegatee_score(&oracle, &delegatee, &INELIGIBLE);
    t.advance(UPDATE_DELAY);

    // One token per second shared by 100 units of earning power.
    t.notify(REWARD_DURATION as i128);
    t.advance(1_500);
    assert_eq!(t.client.unclaimed_reward(&id), 1_500);

    let bumper = Address::generate(&t.env);
    let result = t.client.try_bump_earning_power(&id, &bumper, &501);
    assert_eq!(result, Err(Ok(ContractError::InsufficientUnclaimedRewards)));

    t.client.bump_earning_power(&id, &bumper, &500);

    let deposit = t.client.get_deposit(&id);
    assert_eq!(deposit.earning_power, 0);
    assert_eq!(
        deposit.scaled_unclaimed_reward / SCALE_FACTOR,
        1_500 - 500
    );
    assert_eq!(t.reward_token.balance(&bumper), 500);
}
