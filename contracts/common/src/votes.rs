use soroban_sdk::{contractclient, Address, Env};

/// Governance token surface needed to pool stake without losing votes.
///
/// Mirrors the SEP-41 `balance`/`transfer` pair and adds checkpoint-free
/// delegation: every unit held by `account` counts toward the votes of
/// `delegates(account)`.
#[contractclient(name = "VotesTokenClient")]
pub trait VotesToken {
    fn balance(env: Env, id: Address) -> i128;

    /// Requires auth from `from`.
    fn transfer(env: Env, from: Address, to: Address, amount: i128);

    /// Route the voting weight of `account`'s whole balance to `delegatee`.
    /// Requires auth from `account`.
    fn delegate(env: Env, account: Address, delegatee: Address);

    fn delegates(env: Env, account: Address) -> Option<Address>;

    fn get_votes(env: Env, account: Address) -> i128;
}
