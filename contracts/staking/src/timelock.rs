//! Queued unstake requests. Tokens leave the pool only after `unlock_at`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const UNSTAKE_CTR: Symbol = symbol_short!("UNSTK_CTR");
const UNSTAKE_REQ: Symbol = symbol_short!("UNSTK_REQ");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequest {
    pub id: u64,
    pub staker: Address,
    pub amount: i128,
    pub unlock_at: u64,
    pub withdrawn: bool,
}

/// Ids start at 1 and are never reused.
pub fn next_request_id(env: &Env) -> u64 {
    let next = env
        .storage()
        .instance()
        .get::<_, u64>(&UNSTAKE_CTR)
        .unwrap_or(0)
        .saturating_add(1);
    env.storage().instance().set(&UNSTAKE_CTR, &next);
    next
}

pub fn store_request(env: &Env, request: &UnstakeRequest) {
    let key = (UNSTAKE_REQ, request.id);
    env.storage().persistent().set(&key, request);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_request(env: &Env, id: u64) -> Option<UnstakeRequest> {
    env.storage().persistent().get(&(UNSTAKE_REQ, id))
}
