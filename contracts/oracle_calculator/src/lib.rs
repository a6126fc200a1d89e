#![no_std]

//! Oracle-gated binary eligibility for staker earning power.
//!
//! A trusted oracle pushes a score per delegatee. Deposits delegated to a
//! delegatee scoring at or above the threshold earn on their full stake;
//! everyone else earns nothing. Two safety valves keep rewards flowing when
//! the oracle misbehaves:
//!
//! - If no score has been pushed for longer than the stale window, or the
//!   pause guardian has paused the oracle, every deposit earns full power.
//! - A delegatee that drops below the threshold is only *qualified* for a
//!   downward bump once the update-eligibility delay has passed, so a
//!   momentary dip cannot be used to strip tips from its depositors.
//!
//! The owner can override a delegatee's score and lock it against further
//! oracle updates.

pub mod events;

use common::{calculator::EarningPowerCalculator, ttl};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, symbol_short, Address,
    Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const LAST_UPDATE: Symbol = symbol_short!("LAST_UPD");
const PAUSED: Symbol = symbol_short!("PAUSED");

// Per-delegatee persistent storage uses tuple keys: (prefix, delegatee)
const SCORE: Symbol = symbol_short!("SCORE");
const INELIGIBLE_AT: Symbol = symbol_short!("INELIG");
const SCORE_LOCK: Symbol = symbol_short!("LOCK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    OraclePaused = 4,
    InvalidInput = 5,
}

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleConfig {
    /// May override scores, lock them, and rotate every other role.
    pub owner: Address,
    /// Sole account allowed to push scores.
    pub score_oracle: Address,
    /// Sole account allowed to pause and unpause oracle updates.
    pub oracle_pause_guardian: Address,
    /// Seconds without an oracle update after which everyone earns full power.
    pub stale_oracle_window: u64,
    /// Minimum score for a delegatee to be eligible.
    pub eligibility_threshold: u64,
    /// Seconds a newly ineligible delegatee waits before a downward bump
    /// qualifies.
    pub update_eligibility_delay: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct BinaryEligibilityOracleCalculator;

#[contractimpl]
impl BinaryEligibilityOracleCalculator {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the calculator. The oracle counts as freshly updated at
    /// deployment so staleness is measured from now.
    pub fn initialize(
        env: Env,
        owner: Address,
        score_oracle: Address,
        stale_oracle_window: u64,
        oracle_pause_guardian: Address,
        eligibility_threshold: u64,
        update_eligibility_delay: u64,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }

        let config = OracleConfig {
            owner: owner.clone(),
            score_oracle: score_oracle.clone(),
            oracle_pause_guardian: oracle_pause_guardian.clone(),
            stale_oracle_window,
            eligibility_threshold,
            update_eligibility_delay,
        };
        env.storage().instance().set(&CONFIG, &config);
        env.storage()
            .instance()
            .set(&LAST_UPDATE, &env.ledger().timestamp());
        env.storage().instance().set(&PAUSED, &false);
        ttl::extend_instance(&env);

        events::publish_initialized(
            &env,
            owner,
            score_oracle,
            oracle_pause_guardian,
            stale_oracle_window,
            eligibility_threshold,
            update_eligibility_delay,
        );

        Ok(())
    }

    // ── Oracle ──────────────────────────────────────────────────────────────

    /// Push a fresh score for `delegatee`.
    ///
    /// Every accepted push refreshes the staleness clock, even when the
    /// delegatee's score is locked and therefore left unchanged.
    pub fn update_delegatee_score(
        env: Env,
        oracle: Address,
        delegatee: Address,
        new_score: u64,
    ) -> Result<(), ContractError> {
        oracle.require_auth();
        let config = load_config(&env)?;
        if oracle != config.score_oracle {
            return Err(ContractError::Unauthorized);
        }
        if is_paused(&env) {
            return Err(ContractError::OraclePaused);
        }

        env.storage()
            .instance()
            .set(&LAST_UPDATE, &env.ledger().timestamp());
        ttl::extend_instance(&env);

        if !is_locked(&env, &delegatee) {
            write_score(&env, &config, &delegatee, new_score);
        }

        Ok(())
    }

    // ── Owner ───────────────────────────────────────────────────────────────

    /// Set `delegatee`'s score directly and lock it against oracle updates.
    pub fn override_delegatee_score(
        env: Env,
        owner: Address,
        delegatee: Address,
        new_score: u64,
    ) -> Result<(), ContractError> {
        let config = require_owner(&env, &owner)?;

        write_score(&env, &config, &delegatee, new_score);
        write_lock(&env, &delegatee, true);

        Ok(())
    }

    pub fn set_delegatee_score_lock(
        env: Env,
        owner: Address,
        delegatee: Address,
        locked: bool,
    ) -> Result<(), ContractError> {
        require_owner(&env, &owner)?;
        write_lock(&env, &delegatee, locked);
        Ok(())
    }

    pub fn set_score_oracle(
        env: Env,
        owner: Address,
        new_oracle: Address,
    ) -> Result<(), ContractError> {
        let mut config = require_owner(&env, &owner)?;
        let old = config.score_oracle.clone();
        config.score_oracle = new_oracle.clone();
        save_config(&env, &config);

        events::publish_score_oracle_set(&env, old, new_oracle);
        Ok(())
    }

    pub fn set_oracle_pause_guardian(
        env: Env,
        owner: Address,
        new_guardian: Address,
    ) -> Result<(), ContractError> {
        let mut config = require_owner(&env, &owner)?;
        let old = config.oracle_pause_guardian.clone();
        config.oracle_pause_guardian = new_guardian.clone();
        save_config(&env, &config);

        events::publish_pause_guardian_set(&env, old, new_guardian);
        Ok(())
    }

    /// Changing the threshold does not backdate anyone's time of
    /// ineligibility.
    pub fn set_eligibility_threshold(
        env: Env,
        owner: Address,
        new_threshold: u64,
    ) -> Result<(), ContractError> {
        let mut config = require_owner(&env, &owner)?;
        let old = config.eligibility_threshold;
        config.eligibility_threshold = new_threshold;
        save_config(&env, &config);

        events::publish_threshold_set(&env, old, new_threshold);
        Ok(())
    }

    pub fn set_update_eligibility_delay(
        env: Env,
        owner: Address,
        new_delay: u64,
    ) -> Result<(), ContractError> {
        let mut config = require_owner(&env, &owner)?;
        let old = config.update_eligibility_delay;
        config.update_eligibility_delay = new_delay;
        save_config(&env, &config);

        events::publish_update_delay_set(&env, old, new_delay);
        Ok(())
    }

    // ── Pause guardian ──────────────────────────────────────────────────────

    /// Pause or resume oracle updates. While paused every deposit earns full
    /// power.
    pub fn set_oracle_state(
        env: Env,
        guardian: Address,
        paused: bool,
    ) -> Result<(), ContractError> {
        guardian.require_auth();
        let config = load_config(&env)?;
        if guardian != config.oracle_pause_guardian {
            return Err(ContractError::Unauthorized);
        }

        let old = is_paused(&env);
        env.storage().instance().set(&PAUSED, &paused);
        ttl::extend_instance(&env);

        events::publish_oracle_paused(&env, old, paused);
        Ok(())
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. The proposed owner must call `accept_owner`.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        require_owner(&env, &current_owner)?;

        env.storage().instance().set(&PENDING_OWNER, &new_owner);

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);
        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        new_owner.require_auth();
        let mut config = load_config(&env)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::InvalidInput)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = config.owner.clone();
        config.owner = new_owner.clone();
        save_config(&env, &config);
        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);
        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        require_owner(&env, &current_owner)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OWNER)
            .ok_or(ContractError::InvalidInput)?;
        env.storage().instance().remove(&PENDING_OWNER);

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_config(env: Env) -> Result<OracleConfig, ContractError> {
        load_config(&env)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OWNER)
    }

    pub fn delegatee_score(env: Env, delegatee: Address) -> u64 {
        read_score(&env, &delegatee)
    }

    /// Timestamp at which `delegatee` last crossed from eligible to
    /// ineligible, or zero if it never has.
    pub fn time_of_ineligibility(env: Env, delegatee: Address) -> u64 {
        env.storage()
            .persistent()
            .get(&(INELIGIBLE_AT, delegatee))
            .unwrap_or(0)
    }

    pub fn is_score_locked(env: Env, delegatee: Address) -> bool {
        is_locked(&env, &delegatee)
    }

    pub fn is_oracle_paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn last_oracle_update_time(env: Env) -> u64 {
        env.storage().instance().get(&LAST_UPDATE).unwrap_or(0)
    }

    pub fn is_oracle_stale(env: Env) -> Result<bool, ContractError> {
        let config = load_config(&env)?;
        Ok(is_stale(&env, &config))
    }
}

#[contractimpl]
impl EarningPowerCalculator for BinaryEligibilityOracleCalculator {
    fn get_earning_power(
        env: Env,
        amount_staked: i128,
        _staker: Address,
        delegatee: Address,
    ) -> i128 {
        let config = config_or_panic(&env);
        if is_stale(&env, &config) || is_paused(&env) {
            return amount_staked;
        }
        if is_eligible(&env, &config, &delegatee) {
            amount_staked
        } else {
            0
        }
    }

    fn get_new_earning_power(
        env: Env,
        amount_staked: i128,
        _staker: Address,
        delegatee: Address,
        _old_earning_power: i128,
    ) -> (i128, bool) {
        let config = config_or_panic(&env);
        if is_stale(&env, &config) || is_paused(&env) {
            return (amount_staked, true);
        }
        if is_eligible(&env, &config, &delegatee) {
            return (amount_staked, true);
        }

        let ineligible_at: u64 = env
            .storage()
            .persistent()
            .get(&(INELIGIBLE_AT, delegatee))
            .unwrap_or(0);
        let delay_elapsed = ineligible_at.saturating_add(config.update_eligibility_delay)
            <= env.ledger().timestamp();
        (0, delay_elapsed)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn load_config(env: &Env) -> Result<OracleConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

fn config_or_panic(env: &Env) -> OracleConfig {
    load_config(env).unwrap_or_else(|e| panic_with_error!(env, e))
}

fn save_config(env: &Env, config: &OracleConfig) {
    env.storage().instance().set(&CONFIG, config);
    ttl::extend_instance(env);
}

/// Guard: authenticate `caller` and revert unless it is the owner.
fn require_owner(env: &Env, caller: &Address) -> Result<OracleConfig, ContractError> {
    caller.require_auth();
    let config = load_config(env)?;
    if *caller != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

fn is_stale(env: &Env, config: &OracleConfig) -> bool {
    let last_update: u64 = env.storage().instance().get(&LAST_UPDATE).unwrap_or(0);
    env.ledger().timestamp().saturating_sub(last_update) > config.stale_oracle_window
}

fn is_eligible(env: &Env, config: &OracleConfig, delegatee: &Address) -> bool {
    read_score(env, delegatee) >= config.eligibility_threshold
}

fn is_locked(env: &Env, delegatee: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(SCORE_LOCK, delegatee.clone()))
        .unwrap_or(false)
}

fn read_score(env: &Env, delegatee: &Address) -> u64 {
    let key = (SCORE, delegatee.clone());
    let score: Option<u64> = env.storage().persistent().get(&key);
    if score.is_some() {
        ttl::extend_persistent(env, &key);
    }
    score.unwrap_or(0)
}

/// Store a score, stamping the time of ineligibility when it crosses the
/// threshold downward.
fn write_score(env: &Env, config: &OracleConfig, delegatee: &Address, new_score: u64) {
    let old_score = read_score(env, delegatee);
    let was_eligible = old_score >= config.eligibility_threshold;
    let now_eligible = new_score >= config.eligibility_threshold;

    if was_eligible && !now_eligible {
        let key = (INELIGIBLE_AT, delegatee.clone());
        env.storage()
            .persistent()
            .set(&key, &env.ledger().timestamp());
        ttl::extend_persistent(env, &key);
    }

    let key = (SCORE, delegatee.clone());
    env.storage().persistent().set(&key, &new_score);
    ttl::extend_persistent(env, &key);

    events::publish_score_updated(env, delegatee.clone(), old_score, new_score);
}

fn write_lock(env: &Env, delegatee: &Address, locked: bool) {
    let old = is_locked(env, delegatee);
    let key = (SCORE_LOCK, delegatee.clone());
    env.storage().persistent().set(&key, &locked);
    ttl::extend_persistent(env, &key);

    events::publish_score_lock_set(env, delegatee.clone(), old, locked);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
