//! Governed set of distribution wallets.

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::events;

pub(crate) const DIST_WALLETS: Symbol = symbol_short!("DIST_WAL");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

pub fn list(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DIST_WALLETS)
        .unwrap_or(Vec::new(env))
}

pub fn is_distribution_wallet(env: &Env, wallet: &Address) -> bool {
    list(env).iter().any(|w| w == *wallet)
}

fn save(env: &Env, wallets: &Vec<Address>) {
    env.storage().persistent().set(&DIST_WALLETS, wallets);
    env.storage()
        .persistent()
        .extend_ttl(&DIST_WALLETS, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn add(env: &Env, wallet: &Address) {
    let mut wallets = list(env);
    if !wallets.iter().any(|w| w == *wallet) {
        wallets.push_back(wallet.clone());
        save(env, &wallets);
    }
    events::publish_distribution_wallet_changed(env, wallet.clone(), true);
}

pub(crate) fn remove(env: &Env, wallet: &Address) {
    let mut remaining = Vec::new(env);
    for w in list(env).iter() {
        if w != *wallet {
            remaining.push_back(w);
        }
    }
    save(env, &remaining);
    events::publish_distribution_wallet_changed(env, wallet.clone(), false);
}
