//! Persisted state layout.
//!
//! Instance storage holds the configuration, the reward accumulator state,
//! and the deposit counter. Persistent storage holds one entry per deposit,
//! surrogate, notifier flag, and per-owner total, keyed by `(prefix, id)`.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const REWARDS: Symbol = symbol_short!("REWARDS");
pub(crate) const NEXT_DEPOSIT: Symbol = symbol_short!("NEXT_DEP");

const DEPOSIT: Symbol = symbol_short!("DEPOSIT");
const SURROGATE: Symbol = symbol_short!("SURROGATE");
const NOTIFIER: Symbol = symbol_short!("NOTIFIER");
const OWNER_STAKED: Symbol = symbol_short!("OWN_STK");
const OWNER_POWER: Symbol = symbol_short!("OWN_EP");

// ── Types ────────────────────────────────────────────────────────────────────

/// Absolute fee taken from every reward claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimFeeParameters {
    pub fee_amount: i128,
    /// Required whenever `fee_amount` is positive.
    pub fee_collector: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerConfig {
    pub admin: Address,
    /// Votes token being staked; pooled in per-delegatee surrogates.
    pub stake_token: Address,
    /// Token rewards are paid in; held by the staker itself.
    pub reward_token: Address,
    pub earning_power_calculator: Address,
    pub surrogate_factory: Address,
    pub max_bump_tip: i128,
    /// Fixed at initialisation; caps `claim_fee.fee_amount`.
    pub max_claim_fee: i128,
    pub claim_fee: ClaimFeeParameters,
    pub total_stake_cap: i128,
}

/// Global reward accounting. Everything here is settled lazily at the start
/// of each mutating call.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RewardState {
    pub total_staked: i128,
    pub total_earning_power: i128,
    pub reward_end_time: u64,
    pub last_checkpoint_time: u64,
    pub scaled_reward_rate: i128,
    pub reward_per_token_checkpoint: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub balance: i128,
    pub owner: Address,
    pub delegatee: Address,
    pub claimer: Address,
    pub earning_power: i128,
    pub reward_per_token_checkpoint: i128,
    pub scaled_unclaimed_reward: i128,
}

// ── Config and global state ──────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<StakerConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_config(env: &Env, config: &StakerConfig) {
    env.storage().instance().set(&CONFIG, config);
    ttl::extend_instance(env);
}

pub fn load_reward_state(env: &Env) -> RewardState {
    env.storage()
        .instance()
        .get(&REWARDS)
        .unwrap_or_default()
}

pub fn save_reward_state(env: &Env, state: &RewardState) {
    env.storage().instance().set(&REWARDS, state);
    ttl::extend_instance(env);
}

/// Identifier the next deposit will receive. Identifiers start at 1.
pub fn next_deposit_id(env: &Env) -> Result<u64, ContractError> {
    let last: u64 = env.storage().instance().get(&NEXT_DEPOSIT).unwrap_or(0);
    last.checked_add(1).ok_or(ContractError::ArithmeticOverflow)
}

/// Claim the next deposit identifier; identifiers are never reused.
pub fn use_deposit_id(env: &Env) -> Result<u64, ContractError> {
    let id = next_deposit_id(env)?;
    env.storage().instance().set(&NEXT_DEPOSIT, &id);
    Ok(id)
}

// ── Deposits ─────────────────────────────────────────────────────────────────

pub fn load_deposit(env: &Env, deposit_id: u64) -> Result<Deposit, ContractError> {
    let key = (DEPOSIT, deposit_id);
    let deposit: Deposit = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::DepositNotFound)?;
    ttl::extend_persistent(env, &key);
    Ok(deposit)
}

pub fn save_deposit(env: &Env, deposit_id: u64, deposit: &Deposit) {
    let key = (DEPOSIT, deposit_id);
    env.storage().persistent().set(&key, deposit);
    ttl::extend_persistent(env, &key);
}

// ── Surrogates ───────────────────────────────────────────────────────────────

pub fn surrogate(env: &Env, delegatee: &Address) -> Option<Address> {
    let key = (SURROGATE, delegatee.clone());
    let surrogate: Option<Address> = env.storage().persistent().get(&key);
    if surrogate.is_some() {
        ttl::extend_persistent(env, &key);
    }
    surrogate
}

pub fn save_surrogate(env: &Env, delegatee: &Address, surrogate: &Address) {
    let key = (SURROGATE, delegatee.clone());
    env.storage().persistent().set(&key, surrogate);
    ttl::extend_persistent(env, &key);
}

// ── Reward notifiers ─────────────────────────────────────────────────────────

pub fn is_reward_notifier(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(NOTIFIER, account.clone()))
        .unwrap_or(false)
}

pub fn set_reward_notifier(env: &Env, account: &Address, enabled: bool) {
    let key = (NOTIFIER, account.clone());
    if enabled {
        env.storage().persistent().set(&key, &true);
        ttl::extend_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// ── Per-owner totals ─────────────────────────────────────────────────────────

pub fn depositor_total_staked(env: &Env, owner: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(OWNER_STAKED, owner.clone()))
        .unwrap_or(0)
}

pub fn set_depositor_total_staked(env: &Env, owner: &Address, total: i128) {
    let key = (OWNER_STAKED, owner.clone());
    env.storage().persistent().set(&key, &total);
    ttl::extend_persistent(env, &key);
}

pub fn depositor_total_earning_power(env: &Env, owner: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(OWNER_POWER, owner.clone()))
        .unwrap_or(0)
}

pub fn set_depositor_total_earning_power(env: &Env, owner: &Address, total: i128) {
    let key = (OWNER_POWER, owner.clone());
    env.storage().persistent().set(&key, &total);
    ttl::extend_persistent(env, &key);
}
