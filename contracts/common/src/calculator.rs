use soroban_sdk::{contractclient, Address, Env};

/// Policy that weights a deposit's stake for reward allocation.
///
/// The staker applies whatever this returns without interpreting it, so an
/// administrator can swap policies without migrating existing deposits. Both
/// functions must be free of side effects: identical inputs against identical
/// ledger state always yield identical outputs.
#[contractclient(name = "EarningPowerCalculatorClient")]
pub trait EarningPowerCalculator {
    /// Earning power of `amount_staked` owned by `staker` and delegated to
    /// `delegatee`.
    fn get_earning_power(
        env: Env,
        amount_staked: i128,
        staker: Address,
        delegatee: Address,
    ) -> i128;

    /// Current earning power, and whether a third party may force a deposit
    /// holding `old_earning_power` onto it right now.
    fn get_new_earning_power(
        env: Env,
        amount_staked: i128,
        staker: Address,
        delegatee: Address,
        old_earning_power: i128,
    ) -> (i128, bool);
}
