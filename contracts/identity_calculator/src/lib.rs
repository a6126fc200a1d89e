#![no_std]

use common::calculator::EarningPowerCalculator;
use soroban_sdk::{contract, contractimpl, Address, Env};

/// Earning power equals the staked amount, and any difference is always
/// eligible for a bump.
#[contract]
pub struct IdentityEarningPowerCalculator;

#[contractimpl]
impl EarningPowerCalculator for IdentityEarningPowerCalculator {
    fn get_earning_power(
        _env: Env,
        amount_staked: i128,
        _staker: Address,
        _delegatee: Address,
    ) -> i128 {
        amount_staked
    }

    fn get_new_earning_power(
        _env: Env,
        amount_staked: i128,
        _staker: Address,
        _delegatee: Address,
        _old_earning_power: i128,
    ) -> (i128, bool) {
        (amount_staked, true)
    }
}
