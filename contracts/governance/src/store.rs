//! Append-only proposal table.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::{GovernanceError, Proposal};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const PROPOSAL_CTR: Symbol = symbol_short!("PROP_CTR");
const PROPOSAL: Symbol = symbol_short!("PROPOSAL");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn proposal_key(id: u64) -> (Symbol, u64) {
    (PROPOSAL, id)
}

/// Number of proposals ever created; also the id of the latest one.
pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&PROPOSAL_CTR).unwrap_or(0)
}

/// Reserves the next proposal id. Ids start at 1 and are never reused.
pub(crate) fn next_id(env: &Env) -> u64 {
    let next = count(env).saturating_add(1);
    env.storage().instance().set(&PROPOSAL_CTR, &next);
    next
}

pub fn load(env: &Env, id: u64) -> Result<Proposal, GovernanceError> {
    env.storage()
        .persistent()
        .get(&proposal_key(id))
        .ok_or(GovernanceError::NotFound)
}

pub(crate) fn save(env: &Env, proposal: &Proposal) {
    let key = proposal_key(proposal.id);
    env.storage().persistent().set(&key, proposal);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
