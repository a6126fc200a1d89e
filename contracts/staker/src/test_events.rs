extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events as _},
    vec, Address, Env, IntoVal, Val, Vec,
};

use crate::{
    events::{
        ClaimerAlteredEvent, DelegateeAlteredEvent, EarningPowerBumpedEvent,
        StakeDepositedEvent, SurrogateDeployedEvent,
    },
    rewards::REWARD_DURATION,
    test::{setup, setup_with_oracle, Setup, MAX_BUMP_TIP, REWARD, SCORE_THRESHOLD, UPDATE_DELAY},
};

type Event = (Address, Vec<Val>, Val);

/// Events the ledger itself published during the last invocation.
fn ledger_events(t: &Setup) -> soroban_sdk::testutils::ContractEvents {
    t.env.events().all().filter_by_contract(&t.client.address)
}

fn event<T, D>(t: &Setup, topics: T, data: D) -> Event
where
    T: IntoVal<Env, Vec<Val>>,
    D: IntoVal<Env, Val>,
{
    (
        t.client.address.clone(),
        topics.into_val(&t.env),
        data.into_val(&t.env),
    )
}

fn surrogate_deployed(t: &Setup, delegatee: &Address) -> Event {
    let now = t.env.ledger().timestamp();
    event(
        t,
        (symbol_short!("SURROGATE"), delegatee.clone()),
        SurrogateDeployedEvent {
            delegatee: delegatee.clone(),
            surrogate: t.client.surrogates(delegatee).unwrap(),
            timestamp: now,
        },
    )
}

fn deposit_opened(
    t: &Setup,
    id: u64,
    depositor: &Address,
    amount: i128,
    delegatee: &Address,
) -> [Event; 3] {
    let now = t.env.ledger().timestamp();
    [
        event(
            t,
            (symbol_short!("STAKED"), depositor.clone()),
            StakeDepositedEvent {
                deposit_id: id,
                owner: depositor.clone(),
                amount,
                deposit_balance: amount,
                earning_power: amount,
                timestamp: now,
            },
        ),
        event(
            t,
            (symbol_short!("CLAIMER"), depositor.clone()),
            ClaimerAlteredEvent {
                deposit_id: id,
                old_claimer: None,
                new_claimer: depositor.clone(),
                earning_power: amount,
                timestamp: now,
            },
        ),
        event(
            t,
            (symbol_short!("DELEGATEE"), delegatee.clone()),
            DelegateeAlteredEvent {
                deposit_id: id,
                old_delegatee: None,
                new_delegatee: delegatee.clone(),
                earning_power: amount,
                timestamp: now,
            },
        ),
    ]
}

#[test]
fn test_stake_events_describe_new_deposit() {
    let t = setup();
    let delegatee = t.delegatee();
    let depositor = t.depositor(250);

    let id = t.client.stake(&depositor, &250, &delegatee);
    // Captured first: every later client call, views included, replaces them.
    let published = ledger_events(&t);

    let [staked, claimer, delegated] = deposit_opened(&t, id, &depositor, 250, &delegatee);
    let expected: Vec<Event> = vec![
        &t.env,
        surrogate_deployed(&t, &delegatee),
        staked,
        claimer,
        delegated,
    ];
    assert_eq!(published, expected);
}

#[test]
fn test_surrogate_deployed_event_only_on_first_use() {
    let t = setup();
    let delegatee = t.delegatee();
    t.stake(100, &delegatee);

    let depositor = t.depositor(40);
    let id = t.client.stake(&depositor, &40, &delegatee);
    let published = ledger_events(&t);

    let [staked, claimer, delegated] = deposit_opened(&t, id, &depositor, 40, &delegatee);
    let expected: Vec<Event> = vec![&t.env, staked, claimer, delegated];
    assert_eq!(published, expected);
}

#[test]
fn test_alter_delegatee_to_new_delegatee_deploys_surrogate() {
    let t = setup();
    let first = t.delegatee();
    let second = t.delegatee();
    let (owner, id) = t.stake(60, &first);

    t.client.alter_delegatee(&owner, &id, &second);
    let published = ledger_events(&t);

    let now = t.env.ledger().timestamp();
    let expected: Vec<Event> = vec![
        &t.env,
        surrogate_deployed(&t, &second),
        event(
            &t,
            (symbol_short!("DELEGATEE"), second.clone()),
            DelegateeAlteredEvent {
                deposit_id: id,
                old_delegatee: Some(first.clone()),
                new_delegatee: second.clone(),
                earning_power: 60,
                timestamp: now,
            },
        ),
    ];
    assert_eq!(published, expected);
}

#[test]
fn test_bump_publishes_earning_power_change() {
    let (t, calculator, oracle) = setup_with_oracle();
    let delegatee = t.delegatee();
    calculator.update_delegatee_score(&oracle, &delegatee, &(SCORE_THRESHOLD + 20));
    let (_, id) = t.stake(100, &delegatee);
    t.notify(REWARD);
    t.advance(REWARD_DURATION / 3);

    calculator.update_delegatee_score(&oracle, &delegatee, &(SCORE_THRESHOLD - 20));
    t.advance(UPDATE_DELAY);

    let bumper = Address::generate(&t.env);
    t.client.bump_earning_power(&id, &bumper, &MAX_BUMP_TIP);
    let published = ledger_events(&t);

    let expected: Vec<Event> = vec![
        &t.env,
        event(
            &t,
            (symbol_short!("BUMPED"), bumper.clone()),
            EarningPowerBumpedEvent {
                deposit_id: id,
                old_earning_power: 100,
                new_earning_power: 0,
                tip_receiver: bumper.clone(),
                tip: MAX_BUMP_TIP,
                timestamp: t.env.ledger().timestamp(),
            },
        ),
    ];
    assert_eq!(published, expected);
}

#[test]
fn test_rejected_bump_publishes_nothing() {
    let t = setup();
    let delegatee = t.delegatee();
    let (_, id) = t.stake(100, &delegatee);

    let result = t
        .client
        .try_bump_earning_power(&id, &Address::generate(&t.env), &0);
    assert!(result.is_err());
    assert!(t.env.events().all().events().is_empty());
}
