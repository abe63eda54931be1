#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub lock_period: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user queues an unstake request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequestedEvent {
    pub request_id: u64,
    pub staker: Address,
    pub amount: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when a user withdraws after the timelock expires.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub request_id: u64,
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a user pulls their active stake out during an emergency.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub paused: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockPeriodSetEvent {
    pub caller: Address,
    pub new_period: u64,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, stake_token: Address, lock_period: u64) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            lock_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstake_requested(
    env: &Env,
    request_id: u64,
    staker: Address,
    amount: i128,
    unlock_at: u64,
) {
    env.events().publish(
        (symbol_short!("UNSTK_REQ"), staker.clone()),
        UnstakeRequestedEvent {
            request_id,
            staker,
            amount,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, request_id: u64, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            request_id,
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(env: &Env, staker: Address, amount: i128, paused: bool) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), staker.clone()),
        EmergencyWithdrawnEvent {
            staker,
            amount,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_lock_period_set(env: &Env, caller: Address, new_period: u64) {
    env.events().publish(
        (symbol_short!("LOCK_SET"),),
        LockPeriodSetEvent {
            caller,
            new_period,
            timestamp: env.ledger().timestamp(),
        },
    );
}
