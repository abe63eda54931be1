//! Allow-list with a mandatory lock after approval.
//!
//! An address becomes usable as a transfer destination only once
//! `lock_until` has passed. Removal takes effect immediately.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{config, events, GovernanceError};

const WHITELIST: Symbol = symbol_short!("WL_ENTRY");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistEntry {
    pub account: Address,
    /// Timestamp of the executing proposal.
    pub approved_at: u64,
    pub lock_until: u64,
}

fn entry_key(account: &Address) -> (Symbol, Address) {
    (WHITELIST, account.clone())
}

/// Stored entry for `account`, whether or not its lock has passed.
pub fn entry(env: &Env, account: &Address) -> Option<WhitelistEntry> {
    env.storage().persistent().get(&entry_key(account))
}

/// `true` when `account` is listed, locked or not.
pub fn is_listed(env: &Env, account: &Address) -> bool {
    env.storage().persistent().has(&entry_key(account))
}

/// `true` only when `account` is listed and its lock has passed.
pub fn is_whitelisted(env: &Env, account: &Address) -> bool {
    match entry(env, account) {
        Some(e) => env.ledger().timestamp() >= e.lock_until,
        None => false,
    }
}

/// Guard for value-moving consumers.
pub fn require_whitelisted(env: &Env, account: &Address) -> Result<(), GovernanceError> {
    if !is_whitelisted(env, account) {
        return Err(GovernanceError::NotWhitelisted);
    }
    Ok(())
}

/// Lists `account` with a fresh lock. Re-adding restarts the lock.
pub(crate) fn add(env: &Env, account: &Address) -> Result<WhitelistEntry, GovernanceError> {
    let lock = config::load(env)?.whitelist_lock_duration;
    let now = env.ledger().timestamp();
    let entry = WhitelistEntry {
        account: account.clone(),
        approved_at: now,
        lock_until: now.saturating_add(lock),
    };
    let key = entry_key(account);
    env.storage().persistent().set(&key, &entry);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    events::publish_whitelisted(env, account.clone(), entry.lock_until);
    Ok(entry)
}

pub(crate) fn remove(env: &Env, account: &Address) {
    env.storage().persistent().remove(&entry_key(account));
    events::publish_whitelist_removed(env, account.clone());
}
