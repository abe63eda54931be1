#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the token is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenInitializedEvent {
    pub admin: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub initial_supply: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a manager pays out of a distribution wallet.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedEvent {
    pub manager: Address,
    pub wallet: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    name: String,
    symbol: String,
    decimals: u32,
    initial_supply: i128,
) {
    let topics = (symbol_short!("INIT"),);
    let data = TokenInitializedEvent {
        admin,
        name,
        symbol,
        decimals,
        initial_supply,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    let topics = (symbol_short!("TRANSFER"), from.clone(), to.clone());
    let data = TransferEvent {
        from,
        to,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_distributed(env: &Env, manager: Address, wallet: Address, to: Address, amount: i128) {
    let topics = (symbol_short!("DISTRIB"), wallet.clone(), to.clone());
    let data = DistributedEvent {
        manager,
        wallet,
        to,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
