//! Shared interfaces for the staker contract suite.
//!
//! This crate provides:
//! - [`calculator`]: the pluggable earning-power policy the staker consults.
//! - [`votes`]: the subset of a governance token the staker and its
//!   surrogates rely on (transfers plus vote delegation).
//! - [`surrogate`]: the per-delegatee custody contract and the factory that
//!   deploys it.
//! - [`ttl`]: storage time-to-live constants and helpers.
//! - `testutils` (feature `testutils`): mock token and factory contracts for
//!   host-side tests.

#![no_std]

pub mod calculator;
pub mod surrogate;
pub mod ttl;
pub mod votes;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use calculator::*;
pub use surrogate::*;
pub use votes::*;
