//! Host-side mock contracts for exercising the staker suite in tests.
//!
//! - [`MockVotesToken`]: a mintable stake token with whole-balance vote
//!   delegation.
//! - [`MockSurrogateFactory`]: hands out surrogates registered ahead of time,
//!   since native test contracts cannot be deployed from a wasm hash.

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

use crate::{surrogate::SurrogateFactory, votes::VotesToken};

const BALANCE: Symbol = symbol_short!("BAL");
const DELEGATE: Symbol = symbol_short!("DELEG");
const VOTES: Symbol = symbol_short!("VOTES");
const PRIMED: Symbol = symbol_short!("PRIMED");
const DEPLOYS: Symbol = symbol_short!("DEPLOYS");

// ── Mock votes token ─────────────────────────────────────────────────────────

#[contract]
pub struct MockVotesToken;

fn balance_of(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(BALANCE, id.clone()))
        .unwrap_or(0)
}

fn delegate_of(env: &Env, id: &Address) -> Option<Address> {
    env.storage().persistent().get(&(DELEGATE, id.clone()))
}

fn votes_of(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(VOTES, id.clone()))
        .unwrap_or(0)
}

fn move_votes(env: &Env, from: Option<Address>, to: Option<Address>, amount: i128) {
    if amount == 0 || from == to {
        return;
    }
    if let Some(from) = from {
        let votes = votes_of(env, &from) - amount;
        env.storage().persistent().set(&(VOTES, from), &votes);
    }
    if let Some(to) = to {
        let votes = votes_of(env, &to) + amount;
        env.storage().persistent().set(&(VOTES, to), &votes);
    }
}

#[contractimpl]
impl MockVotesToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        if amount < 0 {
            panic!("negative mint");
        }
        let balance = balance_of(&env, &to) + amount;
        env.storage().persistent().set(&(BALANCE, to.clone()), &balance);
        move_votes(&env, None, delegate_of(&env, &to), amount);
    }
}

#[contractimpl]
impl VotesToken for MockVotesToken {
    fn balance(env: Env, id: Address) -> i128 {
        balance_of(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        if amount < 0 {
            panic!("negative transfer");
        }
        let from_balance = balance_of(&env, &from);
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .persistent()
            .set(&(BALANCE, from.clone()), &(from_balance - amount));
        let to_balance = balance_of(&env, &to) + amount;
        env.storage().persistent().set(&(BALANCE, to.clone()), &to_balance);

        move_votes(&env, delegate_of(&env, &from), delegate_of(&env, &to), amount);
    }

    fn delegate(env: Env, account: Address, delegatee: Address) {
        account.require_auth();
        let previous = delegate_of(&env, &account);
        env.storage()
            .persistent()
            .set(&(DELEGATE, account.clone()), &delegatee);
        move_votes(&env, previous, Some(delegatee), balance_of(&env, &account));
    }

    fn delegates(env: Env, account: Address) -> Option<Address> {
        delegate_of(&env, &account)
    }

    fn get_votes(env: Env, account: Address) -> i128 {
        votes_of(&env, &account)
    }
}

// ── Mock surrogate factory ───────────────────────────────────────────────────

#[contract]
pub struct MockSurrogateFactory;

#[contractimpl]
impl MockSurrogateFactory {
    /// Register the surrogate to hand out the first time `delegatee` is
    /// requested.
    pub fn prime(env: Env, delegatee: Address, surrogate: Address) {
        env.storage()
            .persistent()
            .set(&(PRIMED, delegatee), &surrogate);
    }

    pub fn deploy_count(env: Env) -> u32 {
        env.storage().instance().get(&DEPLOYS).unwrap_or(0)
    }
}

#[contractimpl]
impl SurrogateFactory for MockSurrogateFactory {
    fn deploy_surrogate(env: Env, owner: Address, _token: Address, delegatee: Address) -> Address {
        owner.require_auth();
        let surrogate: Address = env
            .storage()
            .persistent()
            .get(&(PRIMED, delegatee))
            .unwrap_or_else(|| panic!("no surrogate primed for delegatee"));

        let deploys: u32 = env
            .storage()
            .instance()
            .get(&DEPLOYS)
            .unwrap_or(0);
        env.storage().instance().set(&DEPLOYS, &(deploys + 1));

        surrogate
    }
}
