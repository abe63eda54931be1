//! Timelock configuration shared by every engine component.
//!
//! Wall-clock durations are compared against `env.ledger().timestamp()`;
//! the breaker cooldown is counted in ledgers against
//! `env.ledger().sequence()`. The two clocks are never converted into each
//! other.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::GovernanceError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("GOV_CFG");
const NATIVE: Symbol = symbol_short!("GOV_NATV");

// ── Defaults ─────────────────────────────────────────────────────────────────

/// Proposals expire seven days after creation.
pub const DEFAULT_PROPOSAL_TTL: u64 = 604_800;
/// A proposal cannot be approved during its first hour.
pub const DEFAULT_MIN_APPROVAL_DELAY: u64 = 3_600;
/// One day between two role-configuration changes.
pub const DEFAULT_ROLE_CHANGE_DELAY: u64 = 86_400;
/// Newly whitelisted addresses stay unusable for one day.
pub const DEFAULT_WHITELIST_LOCK_DURATION: u64 = 86_400;
/// One hour between two pause/unpause actions.
pub const DEFAULT_EMERGENCY_COOLDOWN: u64 = 3_600;
/// The circuit breaker auto-resets after 300 ledgers.
pub const DEFAULT_BREAKER_COOLDOWN_BLOCKS: u32 = 300;

/// Independently configured timelocks of one governed contract instance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceConfig {
    /// Seconds from creation until a proposal expires.
    pub proposal_ttl: u64,
    /// Minimum seconds between creation and the first accepted approval.
    pub min_approval_delay: u64,
    /// Seconds between two role-configuration mutations, and until a
    /// scheduled quorum or limit takes effect.
    pub role_change_delay: u64,
    /// Seconds an address stays locked after being whitelisted.
    pub whitelist_lock_duration: u64,
    /// Seconds between two pause/unpause actions.
    pub emergency_cooldown: u64,
    /// Ledgers after which a tripped breaker is considered reset.
    pub breaker_cooldown_blocks: u32,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            proposal_ttl: DEFAULT_PROPOSAL_TTL,
            min_approval_delay: DEFAULT_MIN_APPROVAL_DELAY,
            role_change_delay: DEFAULT_ROLE_CHANGE_DELAY,
            whitelist_lock_duration: DEFAULT_WHITELIST_LOCK_DURATION,
            emergency_cooldown: DEFAULT_EMERGENCY_COOLDOWN,
            breaker_cooldown_blocks: DEFAULT_BREAKER_COOLDOWN_BLOCKS,
        }
    }
}

impl GovernanceConfig {
    /// Rejects zero durations and an approval delay that would outlive the
    /// proposal itself.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.proposal_ttl == 0
            || self.min_approval_delay == 0
            || self.role_change_delay == 0
            || self.whitelist_lock_duration == 0
            || self.emergency_cooldown == 0
            || self.breaker_cooldown_blocks == 0
        {
            return Err(GovernanceError::InvalidParameter);
        }
        if self.min_approval_delay >= self.proposal_ttl {
            return Err(GovernanceError::InvalidParameter);
        }
        Ok(())
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub(crate) fn store(env: &Env, config: &GovernanceConfig, native_asset: &Address) {
    env.storage().instance().set(&CONFIG, config);
    env.storage().instance().set(&NATIVE, native_asset);
}

/// Returns the stored configuration.
pub fn load(env: &Env) -> Result<GovernanceConfig, GovernanceError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(GovernanceError::NotInitialized)
}

/// Returns the asset governance must never recover.
pub fn native_asset(env: &Env) -> Result<Address, GovernanceError> {
    env.storage()
        .instance()
        .get(&NATIVE)
        .ok_or(GovernanceError::NotInitialized)
}
