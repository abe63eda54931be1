//! Emergency controls: a rate-limited pause and a circuit breaker that
//! clears itself after a number of ledgers.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{
    config::{self, DEFAULT_BREAKER_COOLDOWN_BLOCKS},
    events,
    roles,
    GovernanceError,
};

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EmergencyAction {
    Pause = 1,
    Unpause = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyState {
    pub paused: bool,
    /// Timestamp of the last pause/unpause; `None` before the first one.
    pub last_action_at: Option<u64>,
}

/// Stored breaker flags. Whether the breaker is in effect also depends on
/// the current ledger sequence, see [`is_breaker_tripped`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BreakerState {
    pub tripped: bool,
    pub tripped_at_block: u32,
}

// ── Storage Keys ─────────────────────────────────────────────────────────────

const EMERGENCY: Symbol = symbol_short!("EMRG");
const BREAKER: Symbol = symbol_short!("BREAKER");

// ── Pause ────────────────────────────────────────────────────────────────────

pub fn state(env: &Env) -> EmergencyState {
    env.storage()
        .instance()
        .get(&EMERGENCY)
        .unwrap_or(EmergencyState {
            paused: false,
            last_action_at: None,
        })
}

pub fn is_paused(env: &Env) -> bool {
    state(env).paused
}

pub fn require_not_paused(env: &Env) -> Result<(), GovernanceError> {
    if is_paused(env) {
        return Err(GovernanceError::EnforcedPause);
    }
    Ok(())
}

/// Pauses or unpauses the contract.
///
/// Requires `ADMIN`. Two actions must be at least `emergency_cooldown`
/// seconds apart; the first action ever is not rate limited.
pub fn emergency_action(
    env: &Env,
    caller: &Address,
    action: EmergencyAction,
) -> Result<(), GovernanceError> {
    roles::require_role(env, &roles::admin_role(env), caller)?;

    let cooldown = config::load(env)?.emergency_cooldown;
    let now = env.ledger().timestamp();
    let mut current = state(env);
    if let Some(last) = current.last_action_at {
        if now < last.saturating_add(cooldown) {
            return Err(GovernanceError::CooldownActive);
        }
    }

    let paused = matches!(action, EmergencyAction::Pause);
    if current.paused == paused {
        return Err(GovernanceError::InvalidState);
    }

    current.paused = paused;
    current.last_action_at = Some(now);
    env.storage().instance().set(&EMERGENCY, &current);

    events::publish_emergency_action(env, caller.clone(), action);
    Ok(())
}

// ── Circuit breaker ──────────────────────────────────────────────────────────

pub fn breaker_state(env: &Env) -> BreakerState {
    env.storage()
        .instance()
        .get(&BREAKER)
        .unwrap_or(BreakerState {
            tripped: false,
            tripped_at_block: 0,
        })
}

/// `true` while the breaker is tripped and its cooldown has not run out.
/// Re-evaluated against the current ledger sequence on every call.
pub fn is_breaker_tripped(env: &Env) -> bool {
    let breaker = breaker_state(env);
    if !breaker.tripped {
        return false;
    }
    let cooldown = config::load(env)
        .map(|c| c.breaker_cooldown_blocks)
        .unwrap_or(DEFAULT_BREAKER_COOLDOWN_BLOCKS);
    env.ledger().sequence() < breaker.tripped_at_block.saturating_add(cooldown)
}

pub fn require_breaker_clear(env: &Env) -> Result<(), GovernanceError> {
    if is_breaker_tripped(env) {
        return Err(GovernanceError::CircuitBreakerTripped);
    }
    Ok(())
}

/// Halt check every gated entry point runs before anything else.
pub fn require_operational(env: &Env) -> Result<(), GovernanceError> {
    require_not_paused(env)?;
    require_breaker_clear(env)
}

/// Trips the breaker at the current ledger. Requires `ADMIN`.
pub fn trip_circuit_breaker(env: &Env, caller: &Address) -> Result<(), GovernanceError> {
    roles::require_role(env, &roles::admin_role(env), caller)?;
    if is_breaker_tripped(env) {
        return Err(GovernanceError::InvalidState);
    }
    let breaker = BreakerState {
        tripped: true,
        tripped_at_block: env.ledger().sequence(),
    };
    env.storage().instance().set(&BREAKER, &breaker);

    events::publish_circuit_breaker(env, caller.clone(), true);
    Ok(())
}

/// Clears the breaker before its cooldown runs out. Requires `ADMIN`.
pub fn reset_circuit_breaker(env: &Env, caller: &Address) -> Result<(), GovernanceError> {
    roles::require_role(env, &roles::admin_role(env), caller)?;
    if !is_breaker_tripped(env) {
        return Err(GovernanceError::InvalidState);
    }
    let breaker = BreakerState {
        tripped: false,
        tripped_at_block: breaker_state(env).tripped_at_block,
    };
    env.storage().instance().set(&BREAKER, &breaker);

    events::publish_circuit_breaker(env, caller.clone(), false);
    Ok(())
}
