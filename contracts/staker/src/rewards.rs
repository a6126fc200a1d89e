//! Fixed-point reward accumulator math.
//!
//! The reward rate and the reward-per-earning-power accumulator are carried
//! multiplied by [`SCALE_FACTOR`]. Every division truncates toward zero, so
//! the sum of everything the ledger owes can never exceed what it was funded
//! with; the truncated remainder stays in each deposit's scaled checkpoint
//! instead of being discarded.

use crate::ContractError;

/// Length of a reward stream. Every notification restarts it.
pub const REWARD_DURATION: u64 = 30 * 24 * 60 * 60;

/// Fixed-point scale for rates and the accumulator.
pub const SCALE_FACTOR: i128 = 1_000_000_000_000_000_000;

/// The last instant rewards were flowing: `now`, capped at the stream end.
pub fn last_time_reward_distributed(reward_end_time: u64, now: u64) -> u64 {
    if reward_end_time <= now {
        reward_end_time
    } else {
        now
    }
}

/// Accumulator value after `elapsed` more seconds at `scaled_reward_rate`.
///
/// Nothing accrues while total earning power is zero.
pub fn reward_per_token_accumulated(
    checkpoint: i128,
    scaled_reward_rate: i128,
    elapsed: u64,
    total_earning_power: i128,
) -> Result<i128, ContractError> {
    if total_earning_power == 0 {
        return Ok(checkpoint);
    }
    let streamed = scaled_reward_rate
        .checked_mul(elapsed as i128)
        .ok_or(ContractError::ArithmeticOverflow)?;
    checkpoint
        .checked_add(streamed / total_earning_power)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Scaled rewards owed to a deposit holding `earning_power` since its
/// accumulator snapshot.
pub fn scaled_unclaimed_reward(
    scaled_checkpoint: i128,
    earning_power: i128,
    reward_per_token: i128,
    reward_per_token_checkpoint: i128,
) -> Result<i128, ContractError> {
    reward_per_token
        .checked_sub(reward_per_token_checkpoint)
        .and_then(|delta| earning_power.checked_mul(delta))
        .and_then(|accrued| scaled_checkpoint.checked_add(accrued))
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Rate for a stream restarted at `now` carrying `amount` plus whatever the
/// current stream had not yet paid out.
pub fn next_scaled_reward_rate(
    scaled_reward_rate: i128,
    reward_end_time: u64,
    now: u64,
    amount: i128,
) -> Result<i128, ContractError> {
    let scaled_amount = amount
        .checked_mul(SCALE_FACTOR)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let remaining = if now >= reward_end_time {
        0
    } else {
        scaled_reward_rate
            .checked_mul((reward_end_time - now) as i128)
            .ok_or(ContractError::ArithmeticOverflow)?
    };
    let total = remaining
        .checked_add(scaled_amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(total / REWARD_DURATION as i128)
}

/// Replace `old` with `new` inside a running total.
pub fn swap_in_total(total: i128, old: i128, new: i128) -> Result<i128, ContractError> {
    new.checked_sub(old)
        .and_then(|delta| total.checked_add(delta))
        .ok_or(ContractError::ArithmeticOverflow)
}
