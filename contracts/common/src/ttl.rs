//! Storage time-to-live policy shared by every contract in the suite.

use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-ledger count below which an entry's TTL is bumped.
pub const TTL_THRESHOLD: u32 = 1_036_800;
/// Ledger count an entry's TTL is bumped to.
pub const TTL_EXTEND_TO: u32 = 2_073_600;

/// Extends the TTL of instance storage (all instance keys share it).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of a single persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
