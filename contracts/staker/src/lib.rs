#![no_std]

//! Reward-distribution staking ledger.
//!
//! Depositors stake a votes token into per-delegatee surrogates, so pooled
//! stake keeps voting the way its owner chose, and earn a share of a reward
//! stream proportional to each deposit's earning power. Earning power comes
//! from a pluggable calculator contract; anyone may push a stale value to its
//! current one through [`StakerContract::bump_earning_power`] in exchange for
//! a tip paid out of the deposit's own unclaimed rewards.
//!
//! Every mutating entrypoint settles the global accumulator before it looks
//! at any deposit, then settles the deposit at its old earning power, and only
//! then applies the new balance or earning power.

pub mod events;
pub mod rewards;
pub mod storage;
mod surrogates;

use common::EarningPowerCalculatorClient;
use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env};

use rewards::{REWARD_DURATION, SCALE_FACTOR};
pub use storage::{ClaimFeeParameters, Deposit, RewardState, StakerConfig};

// ── Contract errors ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAddress = 4,
    InvalidAmount = 5,
    InvalidRate = 6,
    InvalidTip = 7,
    InvalidClaimFeeParameters = 8,
    InsufficientUnclaimedRewards = 9,
    InsufficientRewardBalance = 10,
    Unqualified = 11,
    DepositNotFound = 12,
    InsufficientBalance = 13,
    CapExceeded = 14,
    ArithmeticOverflow = 15,
    InvalidEarningPower = 16,
    SurrogateNotFound = 17,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakerContract;

#[contractimpl]
impl StakerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `stake_token`              – votes token depositors stake.
    /// * `reward_token`             – SAC address rewards are paid in.
    /// * `earning_power_calculator` – policy contract weighting each deposit.
    /// * `surrogate_factory`        – deployer used the first time a delegatee
    ///   is seen.
    /// * `max_bump_tip`             – upper bound on bump tips.
    /// * `max_claim_fee`            – immutable cap on the claim fee.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        earning_power_calculator: Address,
        surrogate_factory: Address,
        max_bump_tip: i128,
        max_claim_fee: i128,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        Self::require_real_address(&env, &admin)?;
        if max_bump_tip < 0 || max_claim_fee < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let config = StakerConfig {
            admin: admin.clone(),
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
            earning_power_calculator: earning_power_calculator.clone(),
            surrogate_factory: surrogate_factory.clone(),
            max_bump_tip,
            max_claim_fee,
            claim_fee: ClaimFeeParameters {
                fee_amount: 0,
                fee_collector: None,
            },
            total_stake_cap: i128::MAX,
        };
        storage::save_config(&env, &config);
        storage::save_reward_state(&env, &RewardState::default());

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            reward_token,
            earning_power_calculator,
            surrogate_factory,
            max_bump_tip,
            max_claim_fee,
        );

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Open a deposit whose rewards `depositor` claims.
    pub fn stake(
        env: Env,
        depositor: Address,
        amount: i128,
        delegatee: Address,
    ) -> Result<u64, ContractError> {
        Self::open_deposit(&env, depositor.clone(), amount, delegatee, depositor)
    }

    /// Open a deposit whose rewards may also be claimed by `claimer`.
    pub fn stake_with_claimer(
        env: Env,
        depositor: Address,
        amount: i128,
        delegatee: Address,
        claimer: Address,
    ) -> Result<u64, ContractError> {
        Self::open_deposit(&env, depositor, amount, delegatee, claimer)
    }

    pub fn stake_more(
        env: Env,
        owner: Address,
        deposit_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        owner.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut deposit = storage::load_deposit(&env, deposit_id)?;
        Self::require_owner(&deposit, &owner)?;

        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;
        Self::require_within_cap(&config, &state, amount)?;
        Self::checkpoint_deposit(&state, &mut deposit)?;

        let surrogate = surrogates::existing(&env, &deposit.delegatee)?;
        let new_balance = deposit
            .balance
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let earning_power = Self::earning_power(
            &env,
            &config,
            new_balance,
            &deposit.owner,
            &deposit.delegatee,
        )?;
        Self::apply_balance(&env, &mut state, &mut deposit, new_balance)?;
        Self::apply_earning_power(&env, &mut state, &mut deposit, earning_power)?;

        surrogates::deposit_into(&env, &config, &owner, &surrogate, amount);

        storage::save_deposit(&env, deposit_id, &deposit);
        storage::save_reward_state(&env, &state);

        events::publish_stake_deposited(
            &env,
            deposit_id,
            owner,
            amount,
            deposit.balance,
            deposit.earning_power,
        );

        Ok(())
    }

    /// Move a deposit's voting weight to `new_delegatee`. The full balance
    /// travels from the old delegatee's surrogate to the new one.
    pub fn alter_delegatee(
        env: Env,
        owner: Address,
        deposit_id: u64,
        new_delegatee: Address,
    ) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        owner.require_auth();
        Self::require_real_address(&env, &new_delegatee)?;

        let mut deposit = storage::load_deposit(&env, deposit_id)?;
        Self::require_owner(&deposit, &owner)?;

        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;
        Self::checkpoint_deposit(&state, &mut deposit)?;

        let old_surrogate = surrogates::existing(&env, &deposit.delegatee)?;
        let new_surrogate = surrogates::fetch_or_deploy(&env, &config, &new_delegatee);

        let earning_power = Self::earning_power(
            &env,
            &config,
            deposit.balance,
            &deposit.owner,
            &new_delegatee,
        )?;
        Self::apply_earning_power(&env, &mut state, &mut deposit, earning_power)?;
        let old_delegatee = core::mem::replace(&mut deposit.delegatee, new_delegatee.clone());

        if old_surrogate != new_surrogate {
            surrogates::reclaim(&env, &old_surrogate, &new_surrogate, deposit.balance);
        }

        storage::save_deposit(&env, deposit_id, &deposit);
        storage::save_reward_state(&env, &state);

        events::publish_delegatee_altered(
            &env,
            deposit_id,
            Some(old_delegatee),
            new_delegatee,
            deposit.earning_power,
        );

        Ok(())
    }

    pub fn alter_claimer(
        env: Env,
        owner: Address,
        deposit_id: u64,
        new_claimer: Address,
    ) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        owner.require_auth();
        Self::require_real_address(&env, &new_claimer)?;

        let mut deposit = storage::load_deposit(&env, deposit_id)?;
        Self::require_owner(&deposit, &owner)?;

        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;
        Self::checkpoint_deposit(&state, &mut deposit)?;

        // Earning power is refreshed on every touch, even without a balance change.
        let earning_power = Self::earning_power(
            &env,
            &config,
            deposit.balance,
            &deposit.owner,
            &deposit.delegatee,
        )?;
        Self::apply_earning_power(&env, &mut state, &mut deposit, earning_power)?;
        let old_claimer = core::mem::replace(&mut deposit.claimer, new_claimer.clone());

        storage::save_deposit(&env, deposit_id, &deposit);
        storage::save_reward_state(&env, &state);

        events::publish_claimer_altered(
            &env,
            deposit_id,
            Some(old_claimer),
            new_claimer,
            deposit.earning_power,
        );

        Ok(())
    }

    /// Return `amount` of stake to the owner.
    pub fn withdraw(
        env: Env,
        owner: Address,
        deposit_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        owner.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut deposit = storage::load_deposit(&env, deposit_id)?;
        Self::require_owner(&deposit, &owner)?;

        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;
        Self::checkpoint_deposit(&state, &mut deposit)?;

        let new_balance = deposit
            .balance
            .checked_sub(amount)
            .filter(|balance| *balance >= 0)
            .ok_or(ContractError::InsufficientBalance)?;
        let surrogate = surrogates::existing(&env, &deposit.delegatee)?;

        let earning_power = Self::earning_power(
            &env,
            &config,
            new_balance,
            &deposit.owner,
            &deposit.delegatee,
        )?;
        Self::apply_balance(&env, &mut state, &mut deposit, new_balance)?;
        Self::apply_earning_power(&env, &mut state, &mut deposit, earning_power)?;

        surrogates::reclaim(&env, &surrogate, &owner, amount);

        storage::save_deposit(&env, deposit_id, &deposit);
        storage::save_reward_state(&env, &state);

        events::publish_stake_withdrawn(
            &env,
            deposit_id,
            owner,
            amount,
            deposit.balance,
            deposit.earning_power,
        );

        Ok(())
    }

    /// Pay the deposit's accrued rewards, less the claim fee, to `caller`.
    ///
    /// Returns the net payout. A claim whose net payout is zero changes
    /// nothing and transfers nothing.
    pub fn claim_reward(
        env: Env,
        caller: Address,
        deposit_id: u64,
    ) -> Result<i128, ContractError> {
        let config = storage::load_config(&env)?;
        caller.require_auth();

        let mut deposit = storage::load_deposit(&env, deposit_id)?;
        if caller != deposit.owner && caller != deposit.claimer {
            return Err(ContractError::Unauthorized);
        }

        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;
        Self::checkpoint_deposit(&state, &mut deposit)?;

        let reward = deposit.scaled_unclaimed_reward / SCALE_FACTOR;
        let fee = config.claim_fee.fee_amount;
        let payout = reward
            .checked_sub(fee)
            .filter(|payout| *payout >= 0)
            .ok_or(ContractError::InsufficientUnclaimedRewards)?;
        if payout == 0 {
            return Ok(0);
        }

        let claimed_scaled = reward
            .checked_mul(SCALE_FACTOR)
            .ok_or(ContractError::ArithmeticOverflow)?;
        deposit.scaled_unclaimed_reward -= claimed_scaled;

        let earning_power = Self::earning_power(
            &env,
            &config,
            deposit.balance,
            &deposit.owner,
            &deposit.delegatee,
        )?;
        Self::apply_earning_power(&env, &mut state, &mut deposit, earning_power)?;

        storage::save_deposit(&env, deposit_id, &deposit);
        storage::save_reward_state(&env, &state);

        let reward_token = token::Client::new(&env, &config.reward_token);
        let this = env.current_contract_address();
        reward_token.transfer(&this, &caller, &payout);
        if fee > 0 {
            if let Some(collector) = &config.claim_fee.fee_collector {
                reward_token.transfer(&this, collector, &fee);
            }
        }

        events::publish_reward_claimed(
            &env,
            deposit_id,
            caller,
            payout,
            fee,
            deposit.earning_power,
        );

        Ok(payout)
    }

    // ── Reward funding ──────────────────────────────────────────────────────

    /// Stream `amount` of reward over the next [`REWARD_DURATION`] seconds,
    /// together with whatever the current stream still owes.
    ///
    /// The notifier must transfer `amount` of the reward token to the ledger
    /// before calling. The balance check below cannot tell owed-but-unclaimed
    /// rewards apart from fresh funds, so it only catches gross under-funding.
    pub fn notify_reward_amount(
        env: Env,
        notifier: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        notifier.require_auth();
        if !storage::is_reward_notifier(&env, &notifier) {
            return Err(ContractError::Unauthorized);
        }
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;

        state.scaled_reward_rate = rewards::next_scaled_reward_rate(
            state.scaled_reward_rate,
            state.reward_end_time,
            now,
            amount,
        )?;
        state.reward_end_time = now
            .checked_add(REWARD_DURATION)
            .ok_or(ContractError::ArithmeticOverflow)?;
        state.last_checkpoint_time = now;

        if state.scaled_reward_rate / SCALE_FACTOR == 0 {
            return Err(ContractError::InvalidRate);
        }

        let promised = state
            .scaled_reward_rate
            .checked_mul(REWARD_DURATION as i128)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let held = token::Client::new(&env, &config.reward_token)
            .balance(&env.current_contract_address())
            .checked_mul(SCALE_FACTOR)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if promised > held {
            return Err(ContractError::InsufficientRewardBalance);
        }

        storage::save_reward_state(&env, &state);

        log!(
            &env,
            "reward stream restarted",
            amount,
            state.scaled_reward_rate,
            state.reward_end_time
        );
        events::publish_reward_notified(
            &env,
            notifier,
            amount,
            state.scaled_reward_rate,
            state.reward_end_time,
        );

        Ok(())
    }

    // ── Bump incentive ──────────────────────────────────────────────────────

    /// Move a deposit to the earning power its calculator currently reports,
    /// paying `requested_tip` from the deposit's unclaimed rewards to
    /// `tip_receiver`. Callable by anyone.
    ///
    /// On a decrease the deposit must keep at least `max_bump_tip` of
    /// unclaimed rewards so a later corrective bump can still be paid.
    pub fn bump_earning_power(
        env: Env,
        deposit_id: u64,
        tip_receiver: Address,
        requested_tip: i128,
    ) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;
        if requested_tip < 0 || requested_tip > config.max_bump_tip {
            return Err(ContractError::InvalidTip);
        }

        let mut deposit = storage::load_deposit(&env, deposit_id)?;
        let mut state = storage::load_reward_state(&env);
        Self::checkpoint_global(&env, &mut state)?;
        Self::checkpoint_deposit(&state, &mut deposit)?;

        let unclaimed = deposit.scaled_unclaimed_reward / SCALE_FACTOR;
        let old_earning_power = deposit.earning_power;

        let (new_earning_power, qualifies) =
            EarningPowerCalculatorClient::new(&env, &config.earning_power_calculator)
                .get_new_earning_power(
                    &deposit.balance,
                    &deposit.owner,
                    &deposit.delegatee,
                    &old_earning_power,
                );
        if new_earning_power < 0 {
            return Err(ContractError::InvalidEarningPower);
        }
        if !qualifies || new_earning_power == old_earning_power {
            log!(&env, "bump unqualified", deposit_id, new_earning_power, qualifies);
            return Err(ContractError::Unqualified);
        }

        if new_earning_power > old_earning_power && unclaimed < requested_tip {
            return Err(ContractError::InsufficientUnclaimedRewards);
        }
        if new_earning_power < old_earning_power
            && (unclaimed < requested_tip || unclaimed - requested_tip < config.max_bump_tip)
        {
            return Err(ContractError::InsufficientUnclaimedRewards);
        }

        Self::apply_earning_power(&env, &mut state, &mut deposit, new_earning_power)?;
        let scaled_tip = requested_tip
            .checked_mul(SCALE_FACTOR)
            .ok_or(ContractError::ArithmeticOverflow)?;
        deposit.scaled_unclaimed_reward -= scaled_tip;

        storage::save_deposit(&env, deposit_id, &deposit);
        storage::save_reward_state(&env, &state);

        if requested_tip > 0 {
            token::Client::new(&env, &config.reward_token).transfer(
                &env.current_contract_address(),
                &tip_receiver,
                &requested_tip,
            );
        }

        events::publish_earning_power_bumped(
            &env,
            deposit_id,
            old_earning_power,
            new_earning_power,
            tip_receiver,
            requested_tip,
        );

        Ok(())
    }

    // ── Admin ───────────────────────────────────────────────────────────────

    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        Self::require_real_address(&env, &new_admin)?;

        let old = core::mem::replace(&mut config.admin, new_admin.clone());
        storage::save_config(&env, &config);

        events::publish_admin_set(&env, old, new_admin);
        Ok(())
    }

    /// Swap the earning-power policy. Existing deposits keep their cached
    /// earning power until their next touch or bump.
    pub fn set_earning_power_calculator(
        env: Env,
        caller: Address,
        calculator: Address,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;

        let old = core::mem::replace(&mut config.earning_power_calculator, calculator.clone());
        storage::save_config(&env, &config);

        events::publish_calculator_set(&env, old, calculator);
        Ok(())
    }

    pub fn set_max_bump_tip(env: Env, caller: Address, max_tip: i128) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        if max_tip < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let old = core::mem::replace(&mut config.max_bump_tip, max_tip);
        storage::save_config(&env, &config);

        events::publish_max_bump_tip_set(&env, old, max_tip);
        Ok(())
    }

    pub fn set_reward_notifier(
        env: Env,
        caller: Address,
        notifier: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &caller)?;

        storage::set_reward_notifier(&env, &notifier, enabled);

        events::publish_reward_notifier_set(&env, notifier, enabled);
        Ok(())
    }

    /// `fee_amount` is bounded by the cap fixed at initialisation and needs
    /// a collector whenever it is positive.
    pub fn set_claim_fee_parameters(
        env: Env,
        caller: Address,
        fee_amount: i128,
        fee_collector: Option<Address>,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        if fee_amount < 0
            || fee_amount > config.max_claim_fee
            || (fee_amount > 0 && fee_collector.is_none())
        {
            return Err(ContractError::InvalidClaimFeeParameters);
        }

        let old = core::mem::replace(
            &mut config.claim_fee,
            ClaimFeeParameters {
                fee_amount,
                fee_collector: fee_collector.clone(),
            },
        );
        storage::save_config(&env, &config);

        events::publish_claim_fee_parameters_set(
            &env,
            old.fee_amount,
            fee_amount,
            old.fee_collector,
            fee_collector,
        );
        Ok(())
    }

    /// Ceiling on total stake. Lowering it below the current total only
    /// blocks further stake; nothing is forcibly withdrawn.
    pub fn set_total_stake_cap(env: Env, caller: Address, cap: i128) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        if cap < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let old = core::mem::replace(&mut config.total_stake_cap, cap);
        storage::save_config(&env, &config);

        events::publish_total_stake_cap_set(&env, old, cap);
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_deposit(env: Env, deposit_id: u64) -> Result<Deposit, ContractError> {
        storage::load_deposit(&env, deposit_id)
    }

    /// Whole reward tokens the deposit could claim right now, before fees.
    pub fn unclaimed_reward(env: Env, deposit_id: u64) -> Result<i128, ContractError> {
        let deposit = storage::load_deposit(&env, deposit_id)?;
        let state = storage::load_reward_state(&env);
        let scaled = rewards::scaled_unclaimed_reward(
            deposit.scaled_unclaimed_reward,
            deposit.earning_power,
            Self::current_reward_per_token(&env, &state)?,
            deposit.reward_per_token_checkpoint,
        )?;
        Ok(scaled / SCALE_FACTOR)
    }

    /// Live accumulator value, scaled by [`SCALE_FACTOR`].
    pub fn reward_per_token_accumulated(env: Env) -> Result<i128, ContractError> {
        let state = storage::load_reward_state(&env);
        Self::current_reward_per_token(&env, &state)
    }

    pub fn last_time_reward_distributed(env: Env) -> u64 {
        let state = storage::load_reward_state(&env);
        rewards::last_time_reward_distributed(state.reward_end_time, env.ledger().timestamp())
    }

    pub fn get_reward_state(env: Env) -> RewardState {
        storage::load_reward_state(&env)
    }

    pub fn get_config(env: Env) -> Result<StakerConfig, ContractError> {
        storage::load_config(&env)
    }

    pub fn total_staked(env: Env) -> i128 {
        storage::load_reward_state(&env).total_staked
    }

    pub fn total_earning_power(env: Env) -> i128 {
        storage::load_reward_state(&env).total_earning_power
    }

    pub fn depositor_total_staked(env: Env, owner: Address) -> i128 {
        storage::depositor_total_staked(&env, &owner)
    }

    pub fn depositor_total_earning_power(env: Env, owner: Address) -> i128 {
        storage::depositor_total_earning_power(&env, &owner)
    }

    /// Surrogate pooling stake for `delegatee`, if one has been deployed.
    pub fn surrogates(env: Env, delegatee: Address) -> Option<Address> {
        storage::surrogate(&env, &delegatee)
    }

    pub fn is_reward_notifier(env: Env, account: Address) -> bool {
        storage::is_reward_notifier(&env, &account)
    }

    pub fn next_deposit_id(env: Env) -> Result<u64, ContractError> {
        storage::next_deposit_id(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

impl StakerContract {
    fn open_deposit(
        env: &Env,
        depositor: Address,
        amount: i128,
        delegatee: Address,
        claimer: Address,
    ) -> Result<u64, ContractError> {
        let config = storage::load_config(env)?;
        depositor.require_auth();
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        Self::require_real_address(env, &delegatee)?;
        Self::require_real_address(env, &claimer)?;

        let mut state = storage::load_reward_state(env);
        Self::checkpoint_global(env, &mut state)?;
        Self::require_within_cap(&config, &state, amount)?;

        let surrogate = surrogates::fetch_or_deploy(env, &config, &delegatee);
        let deposit_id = storage::use_deposit_id(env)?;
        let earning_power = Self::earning_power(env, &config, amount, &depositor, &delegatee)?;

        let mut deposit = Deposit {
            balance: 0,
            owner: depositor.clone(),
            delegatee: delegatee.clone(),
            claimer: claimer.clone(),
            earning_power: 0,
            reward_per_token_checkpoint: state.reward_per_token_checkpoint,
            scaled_unclaimed_reward: 0,
        };
        Self::apply_balance(env, &mut state, &mut deposit, amount)?;
        Self::apply_earning_power(env, &mut state, &mut deposit, earning_power)?;

        surrogates::deposit_into(env, &config, &depositor, &surrogate, amount);

        storage::save_deposit(env, deposit_id, &deposit);
        storage::save_reward_state(env, &state);

        events::publish_stake_deposited(
            env,
            deposit_id,
            depositor,
            amount,
            deposit.balance,
            earning_power,
        );
        events::publish_claimer_altered(env, deposit_id, None, claimer, earning_power);
        events::publish_delegatee_altered(env, deposit_id, None, delegatee, earning_power);

        Ok(deposit_id)
    }

    /// Authenticate `caller` and check it holds the admin role.
    fn require_admin(env: &Env, caller: &Address) -> Result<StakerConfig, ContractError> {
        let config = storage::load_config(env)?;
        caller.require_auth();
        if *caller != config.admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(config)
    }

    fn require_owner(deposit: &Deposit, caller: &Address) -> Result<(), ContractError> {
        if deposit.owner != *caller {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// The ledger's own address stands in for "no account".
    fn require_real_address(env: &Env, account: &Address) -> Result<(), ContractError> {
        if *account == env.current_contract_address() {
            return Err(ContractError::InvalidAddress);
        }
        Ok(())
    }

    fn require_within_cap(
        config: &StakerConfig,
        state: &RewardState,
        amount: i128,
    ) -> Result<(), ContractError> {
        let total = state
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::CapExceeded)?;
        if total > config.total_stake_cap {
            return Err(ContractError::CapExceeded);
        }
        Ok(())
    }

    fn earning_power(
        env: &Env,
        config: &StakerConfig,
        amount: i128,
        owner: &Address,
        delegatee: &Address,
    ) -> Result<i128, ContractError> {
        let earning_power = EarningPowerCalculatorClient::new(env, &config.earning_power_calculator)
            .get_earning_power(&amount, owner, delegatee);
        if earning_power < 0 {
            return Err(ContractError::InvalidEarningPower);
        }
        Ok(earning_power)
    }

    fn current_reward_per_token(env: &Env, state: &RewardState) -> Result<i128, ContractError> {
        let distributed_until =
            rewards::last_time_reward_distributed(state.reward_end_time, env.ledger().timestamp());
        rewards::reward_per_token_accumulated(
            state.reward_per_token_checkpoint,
            state.scaled_reward_rate,
            distributed_until.saturating_sub(state.last_checkpoint_time),
            state.total_earning_power,
        )
    }

    /// Fold everything streamed since the last checkpoint into the
    /// accumulator.
    fn checkpoint_global(env: &Env, state: &mut RewardState) -> Result<(), ContractError> {
        state.reward_per_token_checkpoint =
            Self::current_reward_per_token(env, state)?;
        state.last_checkpoint_time =
            rewards::last_time_reward_distributed(state.reward_end_time, env.ledger().timestamp());
        Ok(())
    }

    /// Settle `deposit` against a freshly checkpointed accumulator, at the
    /// earning power it held until now.
    fn checkpoint_deposit(state: &RewardState, deposit: &mut Deposit) -> Result<(), ContractError> {
        deposit.scaled_unclaimed_reward = rewards::scaled_unclaimed_reward(
            deposit.scaled_unclaimed_reward,
            deposit.earning_power,
            state.reward_per_token_checkpoint,
            deposit.reward_per_token_checkpoint,
        )?;
        deposit.reward_per_token_checkpoint = state.reward_per_token_checkpoint;
        Ok(())
    }

    fn apply_balance(
        env: &Env,
        state: &mut RewardState,
        deposit: &mut Deposit,
        new_balance: i128,
    ) -> Result<(), ContractError> {
        state.total_staked = rewards::swap_in_total(state.total_staked, deposit.balance, new_balance)?;
        let owner_total = rewards::swap_in_total(
            storage::depositor_total_staked(env, &deposit.owner),
            deposit.balance,
            new_balance,
        )?;
        storage::set_depositor_total_staked(env, &deposit.owner, owner_total);
        deposit.balance = new_balance;
        Ok(())
    }

    fn apply_earning_power(
        env: &Env,
        state: &mut RewardState,
        deposit: &mut Deposit,
        new_earning_power: i128,
    ) -> Result<(), ContractError> {
        state.total_earning_power = rewards::swap_in_total(
            state.total_earning_power,
            deposit.earning_power,
            new_earning_power,
        )?;
        let owner_total = rewards::swap_in_total(
            storage::depositor_total_earning_power(env, &deposit.owner),
            deposit.earning_power,
            new_earning_power,
        )?;
        storage::set_depositor_total_earning_power(env, &deposit.owner, owner_total);
        deposit.earning_power = new_earning_power;
        Ok(())
    }
}

#[cfg(test)]
mod test_admin;
#[cfg(test)]
mod test_bump;
#[cfg(test)]
mod test_events;
