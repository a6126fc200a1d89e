use soroban_sdk::{contractclient, Address, Env};

/// Custody contract holding the pooled stake of every deposit assigned to a
/// single delegatee.
#[contractclient(name = "DelegationSurrogateClient")]
pub trait DelegationSurrogateInterface {
    /// Move `amount` of the pooled token to `to`. Only the owner may call.
    fn reclaim(env: Env, to: Address, amount: i128);

    fn owner(env: Env) -> Address;

    fn token(env: Env) -> Address;

    fn delegatee(env: Env) -> Address;
}

/// Deploys surrogates on behalf of a staker.
#[contractclient(name = "SurrogateFactoryClient")]
pub trait SurrogateFactory {
    /// Deploy a surrogate owned by `owner` that pools `token` and delegates
    /// its votes to `delegatee`, returning the new contract's address.
    /// Requires auth from `owner`.
    fn deploy_surrogate(env: Env, owner: Address, token: Address, delegatee: Address) -> Address;
}
