//! Per-delegatee custody of pooled stake.
//!
//! Surrogates are created on first reference to a delegatee and reused
//! forever after. Token movement between depositors and surrogates goes
//! through the votes token so delegated voting weight follows the balance.

use common::{DelegationSurrogateClient, SurrogateFactoryClient, VotesTokenClient};
use soroban_sdk::{log, Address, Env};

use crate::{events, storage, storage::StakerConfig, ContractError};

/// Surrogate for `delegatee`, deploying one through the factory if this is
/// the first time the delegatee is seen.
pub fn fetch_or_deploy(env: &Env, config: &StakerConfig, delegatee: &Address) -> Address {
    if let Some(surrogate) = storage::surrogate(env, delegatee) {
        return surrogate;
    }

    let surrogate = SurrogateFactoryClient::new(env, &config.surrogate_factory).deploy_surrogate(
        &env.current_contract_address(),
        &config.stake_token,
        delegatee,
    );
    storage::save_surrogate(env, delegatee, &surrogate);

    log!(env, "surrogate deployed", delegatee.clone(), surrogate.clone());
    events::publish_surrogate_deployed(env, delegatee.clone(), surrogate.clone());

    surrogate
}

/// Surrogate already holding a deposit's stake.
pub fn existing(env: &Env, delegatee: &Address) -> Result<Address, ContractError> {
    storage::surrogate(env, delegatee).ok_or(ContractError::SurrogateNotFound)
}

/// Pull `amount` of stake from `from` into `surrogate`.
pub fn deposit_into(
    env: &Env,
    config: &StakerConfig,
    from: &Address,
    surrogate: &Address,
    amount: i128,
) {
    if amount == 0 {
        return;
    }
    VotesTokenClient::new(env, &config.stake_token).transfer(from, surrogate, &amount);
}

/// Move `amount` of stake held by `surrogate` to `to`.
pub fn reclaim(env: &Env, surrogate: &Address, to: &Address, amount: i128) {
    if amount == 0 {
        return;
    }
    DelegationSurrogateClient::new(env, surrogate).reclaim(to, &amount);
}
