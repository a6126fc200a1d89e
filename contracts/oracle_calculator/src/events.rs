#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the calculator is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub score_oracle: Address,
    pub oracle_pause_guardian: Address,
    pub stale_oracle_window: u64,
    pub eligibility_threshold: u64,
    pub update_eligibility_delay: u64,
    pub timestamp: u64,
}

/// Fired whenever a delegatee's stored score changes, by oracle or override.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateeScoreUpdatedEvent {
    pub delegatee: Address,
    pub old_score: u64,
    pub new_score: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateeScoreLockSetEvent {
    pub delegatee: Address,
    pub old_lock: bool,
    pub new_lock: bool,
    pub timestamp: u64,
}

/// Shared payload for role rotations (oracle, pause guardian).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleSetEvent {
    pub old_account: Address,
    pub new_account: Address,
    pub timestamp: u64,
}

/// Shared payload for numeric parameter changes (threshold, delay).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterSetEvent {
    pub old_value: u64,
    pub new_value: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OraclePausedStatusUpdatedEvent {
    pub old_state: bool,
    pub new_state: bool,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    score_oracle: Address,
    oracle_pause_guardian: Address,
    stale_oracle_window: u64,
    eligibility_threshold: u64,
    update_eligibility_delay: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            score_oracle,
            oracle_pause_guardian,
            stale_oracle_window,
            eligibility_threshold,
            update_eligibility_delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_score_updated(env: &Env, delegatee: Address, old_score: u64, new_score: u64) {
    env.events().publish(
        (symbol_short!("SCORE"), delegatee.clone()),
        DelegateeScoreUpdatedEvent {
            delegatee,
            old_score,
            new_score,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_score_lock_set(env: &Env, delegatee: Address, old_lock: bool, new_lock: bool) {
    env.events().publish(
        (symbol_short!("SCORE_LCK"), delegatee.clone()),
        DelegateeScoreLockSetEvent {
            delegatee,
            old_lock,
            new_lock,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_score_oracle_set(env: &Env, old_account: Address, new_account: Address) {
    env.events().publish(
        (symbol_short!("ORACLE"),),
        RoleSetEvent {
            old_account,
            new_account,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_guardian_set(env: &Env, old_account: Address, new_account: Address) {
    env.events().publish(
        (symbol_short!("GUARDIAN"),),
        RoleSetEvent {
            old_account,
            new_account,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_threshold_set(env: &Env, old_value: u64, new_value: u64) {
    env.events().publish(
        (symbol_short!("THRESHOLD"),),
        ParameterSetEvent {
            old_value,
            new_value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_update_delay_set(env: &Env, old_value: u64, new_value: u64) {
    env.events().publish(
        (symbol_short!("UPD_DELAY"),),
        ParameterSetEvent {
            old_value,
            new_value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_oracle_paused(env: &Env, old_state: bool, new_state: bool) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        OraclePausedStatusUpdatedEvent {
            old_state,
            new_state,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
