//! Shared input checks.

use soroban_sdk::{Address, Env};

use crate::{config, GovernanceError};

pub fn require_initialized(env: &Env) -> Result<(), GovernanceError> {
    if !config::is_initialized(env) {
        return Err(GovernanceError::NotInitialized);
    }
    Ok(())
}

/// Unwraps a required target, rejecting the governed contract itself.
pub fn require_target(env: &Env, target: Option<Address>) -> Result<Address, GovernanceError> {
    let target = target.ok_or(GovernanceError::InvalidAddress)?;
    if target == env.current_contract_address() {
        return Err(GovernanceError::InvalidAddress);
    }
    Ok(target)
}

pub fn require_positive(amount: i128) -> Result<(), GovernanceError> {
    if amount <= 0 {
        return Err(GovernanceError::InvalidAmount);
    }
    Ok(())
}
