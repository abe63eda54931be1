//! Balance ledger of the governed token.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use governance::GovernanceError;

const BALANCE: Symbol = symbol_short!("BAL");
const TOTAL_SUPPLY: Symbol = symbol_short!("SUPPLY");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn balance_key(account: &Address) -> (Symbol, Address) {
    (BALANCE, account.clone())
}

pub fn balance(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&balance_key(account))
        .unwrap_or(0)
}

fn set_balance(env: &Env, account: &Address, amount: i128) {
    let key = balance_key(account);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn total_supply(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
}

pub fn mint(env: &Env, to: &Address, amount: i128) {
    set_balance(env, to, balance(env, to).saturating_add(amount));
    env.storage()
        .instance()
        .set(&TOTAL_SUPPLY, &total_supply(env).saturating_add(amount));
}

/// Moves `amount` between two accounts; `LowBalance` if `from` is short.
pub fn move_balance(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), GovernanceError> {
    let from_balance = balance(env, from);
    if from_balance < amount {
        return Err(GovernanceError::LowBalance);
    }
    if from == to {
        return Ok(());
    }
    set_balance(env, from, from_balance.saturating_sub(amount));
    set_balance(env, to, balance(env, to).saturating_add(amount));
    Ok(())
}
