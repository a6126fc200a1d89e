#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub earning_power_calculator: Address,
    pub surrogate_factory: Address,
    pub max_bump_tip: i128,
    pub max_claim_fee: i128,
    pub timestamp: u64,
}

/// Fired when stake is added to a new or existing deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDepositedEvent {
    pub deposit_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub deposit_balance: i128,
    pub earning_power: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub deposit_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub deposit_balance: i128,
    pub earning_power: i128,
    pub timestamp: u64,
}

/// `old_delegatee` is `None` when the deposit is being created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateeAlteredEvent {
    pub deposit_id: u64,
    pub old_delegatee: Option<Address>,
    pub new_delegatee: Address,
    pub earning_power: i128,
    pub timestamp: u64,
}

/// `old_claimer` is `None` when the deposit is being created.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimerAlteredEvent {
    pub deposit_id: u64,
    pub old_claimer: Option<Address>,
    pub new_claimer: Address,
    pub earning_power: i128,
    pub timestamp: u64,
}

/// `amount` is the net payout; `fee` went to the fee collector.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub deposit_id: u64,
    pub claimer: Address,
    pub amount: i128,
    pub fee: i128,
    pub earning_power: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardNotifiedEvent {
    pub notifier: Address,
    pub amount: i128,
    pub scaled_reward_rate: i128,
    pub reward_end_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarningPowerBumpedEvent {
    pub deposit_id: u64,
    pub old_earning_power: i128,
    pub new_earning_power: i128,
    pub tip_receiver: Address,
    pub tip: i128,
    pub timestamp: u64,
}

/// Generic "parameter changed" payload for address-valued settings.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressSetEvent {
    pub old: Address,
    pub new: Address,
    pub timestamp: u64,
}

/// Generic "parameter changed" payload for amount-valued settings.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmountSetEvent {
    pub old: i128,
    pub new: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardNotifierSetEvent {
    pub account: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimFeeParametersSetEvent {
    pub old_fee_amount: i128,
    pub new_fee_amount: i128,
    pub old_fee_collector: Option<Address>,
    pub new_fee_collector: Option<Address>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurrogateDeployedEvent {
    pub delegatee: Address,
    pub surrogate: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    earning_power_calculator: Address,
    surrogate_factory: Address,
    max_bump_tip: i128,
    max_claim_fee: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_token,
            earning_power_calculator,
            surrogate_factory,
            max_bump_tip,
            max_claim_fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_deposited(
    env: &Env,
    deposit_id: u64,
    owner: Address,
    amount: i128,
    deposit_balance: i128,
    earning_power: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), owner.clone()),
        StakeDepositedEvent {
            deposit_id,
            owner,
            amount,
            deposit_balance,
            earning_power,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_stake_withdrawn(
    env: &Env,
    deposit_id: u64,
    owner: Address,
    amount: i128,
    deposit_balance: i128,
    earning_power: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), owner.clone()),
        StakeWithdrawnEvent {
            deposit_id,
            owner,
            amount,
            deposit_balance,
            earning_power,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delegatee_altered(
    env: &Env,
    deposit_id: u64,
    old_delegatee: Option<Address>,
    new_delegatee: Address,
    earning_power: i128,
) {
    env.events().publish(
        (symbol_short!("DELEGATEE"), new_delegatee.clone()),
        DelegateeAlteredEvent {
            deposit_id,
            old_delegatee,
            new_delegatee,
            earning_power,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimer_altered(
    env: &Env,
    deposit_id: u64,
    old_claimer: Option<Address>,
    new_claimer: Address,
    earning_power: i128,
) {
    env.events().publish(
        (symbol_short!("CLAIMER"), new_claimer.clone()),
        ClaimerAlteredEvent {
            deposit_id,
            old_claimer,
            new_claimer,
            earning_power,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(
    env: &Env,
    deposit_id: u64,
    claimer: Address,
    amount: i128,
    fee: i128,
    earning_power: i128,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), claimer.clone()),
        RewardClaimedEvent {
            deposit_id,
            claimer,
            amount,
            fee,
            earning_power,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_notified(
    env: &Env,
    notifier: Address,
    amount: i128,
    scaled_reward_rate: i128,
    reward_end_time: u64,
) {
    env.events().publish(
        (symbol_short!("NOTIFIED"), notifier.clone()),
        RewardNotifiedEvent {
            notifier,
            amount,
            scaled_reward_rate,
            reward_end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_earning_power_bumped(
    env: &Env,
    deposit_id: u64,
    old_earning_power: i128,
    new_earning_power: i128,
    tip_receiver: Address,
    tip: i128,
) {
    env.events().publish(
        (symbol_short!("BUMPED"), tip_receiver.clone()),
        EarningPowerBumpedEvent {
            deposit_id,
            old_earning_power,
            new_earning_power,
            tip_receiver,
            tip,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_set(env: &Env, old: Address, new: Address) {
    env.events().publish(
        (symbol_short!("ADMIN"),),
        AddressSetEvent {
            old,
            new,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_calculator_set(env: &Env, old: Address, new: Address) {
    env.events().publish(
        (symbol_short!("CALC"),),
        AddressSetEvent {
            old,
            new,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_max_bump_tip_set(env: &Env, old: i128, new: i128) {
    env.events().publish(
        (symbol_short!("MAX_TIP"),),
        AmountSetEvent {
            old,
            new,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_total_stake_cap_set(env: &Env, old: i128, new: i128) {
    env.events().publish(
        (symbol_short!("STAKE_CAP"),),
        AmountSetEvent {
            old,
            new,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_notifier_set(env: &Env, account: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("NOTIFIER"), account.clone()),
        RewardNotifierSetEvent {
            account,
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claim_fee_parameters_set(
    env: &Env,
    old_fee_amount: i128,
    new_fee_amount: i128,
    old_fee_collector: Option<Address>,
    new_fee_collector: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("CLAIM_FEE"),),
        ClaimFeeParametersSetEvent {
            old_fee_amount,
            new_fee_amount,
            old_fee_collector,
            new_fee_collector,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_surrogate_deployed(env: &Env, delegatee: Address, surrogate: Address) {
    env.events().publish(
        (symbol_short!("SURROGATE"), delegatee.clone()),
        SurrogateDeployedEvent {
            delegatee,
            surrogate,
            timestamp: env.ledger().timestamp(),
        },
    );
}
