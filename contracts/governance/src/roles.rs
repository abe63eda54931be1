//! Role registry: membership, quorum and per-transaction limits.
//!
//! Membership only changes as the effect of an executed `AddRole` /
//! `RemoveRole` proposal. Quorum and transaction limits are set directly by
//! an `ADMIN` holder but are rate limited by the role-change delay: a new
//! value is scheduled, becomes active once the delay has elapsed, and no
//! second configuration change is accepted on the instance until then.

use soroban_sdk::{contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol, Vec};

use crate::{config, emergency, events, validation, GovernanceError};

/// Opaque role identifier.
pub type RoleId = BytesN<32>;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_MEMBER: Symbol = symbol_short!("ROLE_MBR");
const ROLE_LIST: Symbol = symbol_short!("ROLE_LST");
const ROLE_CONFIG: Symbol = symbol_short!("ROLE_CFG");
const LAST_ROLE_CHANGE: Symbol = symbol_short!("ROLE_LAST");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Well-known roles ─────────────────────────────────────────────────────────

/// Manages roles, recoveries and emergency controls. The all-zero id.
pub fn admin_role(env: &Env) -> RoleId {
    BytesN::from_array(env, &[0u8; 32])
}

/// Manages the whitelist and distribution wallets.
pub fn manager_role(env: &Env) -> RoleId {
    role_id(env, b"MANAGER_ROLE")
}

/// Derives a role id from a human-readable name.
pub fn role_id(env: &Env, name: &[u8]) -> RoleId {
    env.crypto().sha256(&Bytes::from_slice(env, name)).to_bytes()
}

// ── Types ────────────────────────────────────────────────────────────────────

/// Quorum and transaction limit of a role, with the scheduled next values.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleConfig {
    /// Minimum distinct approvals. Not bounded by the member count.
    pub quorum: u32,
    /// Maximum value a single role-gated action may move.
    pub transaction_limit: i128,
    pub next_quorum: u32,
    pub next_transaction_limit: i128,
    /// Ledger timestamp from which the `next_*` values apply.
    pub effective_at: u64,
}

impl RoleConfig {
    /// Configuration of a role nobody has configured yet.
    pub fn unconfigured() -> Self {
        Self {
            quorum: 1,
            transaction_limit: i128::MAX,
            next_quorum: 1,
            next_transaction_limit: i128::MAX,
            effective_at: 0,
        }
    }

    /// Promotes the scheduled values once `now` has reached `effective_at`.
    pub fn settled(mut self, now: u64) -> Self {
        if now >= self.effective_at {
            self.quorum = self.next_quorum;
            self.transaction_limit = self.next_transaction_limit;
        }
        self
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn member_key(role: &RoleId, account: &Address) -> (Symbol, RoleId, Address) {
    (ROLE_MEMBER, role.clone(), account.clone())
}

fn list_key(role: &RoleId) -> (Symbol, RoleId) {
    (ROLE_LIST, role.clone())
}

fn config_key(role: &RoleId) -> (Symbol, RoleId) {
    (ROLE_CONFIG, role.clone())
}

fn extend_role_ttl(env: &Env, key: &(Symbol, RoleId)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Membership ───────────────────────────────────────────────────────────────

pub fn has_role(env: &Env, role: &RoleId, account: &Address) -> bool {
    env.storage().persistent().has(&member_key(role, account))
}

/// Guard: fails with `Unauthorized` unless `account` holds `role`.
pub fn require_role(env: &Env, role: &RoleId, account: &Address) -> Result<(), GovernanceError> {
    if !has_role(env, role, account) {
        return Err(GovernanceError::Unauthorized);
    }
    Ok(())
}

/// Current members of `role`, in grant order.
pub fn members(env: &Env, role: &RoleId) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&list_key(role))
        .unwrap_or(Vec::new(env))
}

pub(crate) fn grant(env: &Env, role: &RoleId, account: &Address) {
    if has_role(env, role, account) {
        return;
    }
    let key = member_key(role, account);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let list_key = list_key(role);
    let mut list = members(env, role);
    list.push_back(account.clone());
    env.storage().persistent().set(&list_key, &list);
    extend_role_ttl(env, &list_key);

    events::publish_role_changed(env, role.clone(), account.clone(), true);
}

pub(crate) fn revoke(env: &Env, role: &RoleId, account: &Address) {
    env.storage().persistent().remove(&member_key(role, account));

    let mut remaining = Vec::new(env);
    for member in members(env, role).iter() {
        if member != *account {
            remaining.push_back(member);
        }
    }
    let list_key = list_key(role);
    env.storage().persistent().set(&list_key, &remaining);
    extend_role_ttl(env, &list_key);

    events::publish_role_changed(env, role.clone(), account.clone(), false);
}

// ── Quorum and limits ────────────────────────────────────────────────────────

/// Role configuration as it applies at the current ledger timestamp.
pub fn role_config(env: &Env, role: &RoleId) -> RoleConfig {
    env.storage()
        .persistent()
        .get::<_, RoleConfig>(&config_key(role))
        .unwrap_or(RoleConfig::unconfigured())
        .settled(env.ledger().timestamp())
}

pub fn quorum(env: &Env, role: &RoleId) -> u32 {
    role_config(env, role).quorum
}

pub fn transaction_limit(env: &Env, role: &RoleId) -> i128 {
    role_config(env, role).transaction_limit
}

/// Guard for consumers: fails with `LowAllowance` when `amount` exceeds the
/// role's transaction limit.
pub fn require_within_limit(
    env: &Env,
    role: &RoleId,
    amount: i128,
) -> Result<(), GovernanceError> {
    if amount > transaction_limit(env, role) {
        return Err(GovernanceError::LowAllowance);
    }
    Ok(())
}

/// Schedules a new quorum for `role`.
///
/// # Errors
/// - `EnforcedPause` / `CircuitBreakerTripped` while halted.
/// - `Unauthorized` unless `caller` holds `ADMIN`.
/// - `InvalidParameter` if `quorum` is zero.
/// - `CooldownActive` within the role-change delay of the previous change.
pub fn set_quorum(
    env: &Env,
    caller: &Address,
    role: &RoleId,
    quorum: u32,
) -> Result<(), GovernanceError> {
    emergency::require_operational(env)?;
    validation::require_initialized(env)?;
    require_role(env, &admin_role(env), caller)?;
    if quorum == 0 {
        return Err(GovernanceError::InvalidParameter);
    }
    let current = role_config(env, role);
    let limit = current.transaction_limit;
    schedule(env, role, current, quorum, limit)
}

/// Schedules a new per-transaction limit for `role`.
///
/// # Errors
/// - `EnforcedPause` / `CircuitBreakerTripped` while halted.
/// - `Unauthorized` unless `caller` holds `ADMIN`.
/// - `InvalidAmount` if `limit` is not positive.
/// - `CooldownActive` within the role-change delay of the previous change.
pub fn set_transaction_limit(
    env: &Env,
    caller: &Address,
    role: &RoleId,
    limit: i128,
) -> Result<(), GovernanceError> {
    emergency::require_operational(env)?;
    validation::require_initialized(env)?;
    require_role(env, &admin_role(env), caller)?;
    if limit <= 0 {
        return Err(GovernanceError::InvalidAmount);
    }
    let current = role_config(env, role);
    let quorum = current.quorum;
    schedule(env, role, current, quorum, limit)
}

/// Timestamp of the last accepted role-configuration change, if any.
pub fn last_config_change(env: &Env) -> Option<u64> {
    env.storage().instance().get(&LAST_ROLE_CHANGE)
}

fn schedule(
    env: &Env,
    role: &RoleId,
    current: RoleConfig,
    quorum: u32,
    limit: i128,
) -> Result<(), GovernanceError> {
    let delay = config::load(env)?.role_change_delay;
    let now = env.ledger().timestamp();
    if let Some(last) = last_config_change(env) {
        if now < last.saturating_add(delay) {
            return Err(GovernanceError::CooldownActive);
        }
    }

    let effective_at = now.saturating_add(delay);
    let updated = RoleConfig {
        quorum: current.quorum,
        transaction_limit: current.transaction_limit,
        next_quorum: quorum,
        next_transaction_limit: limit,
        effective_at,
    };
    let key = config_key(role);
    env.storage().persistent().set(&key, &updated);
    extend_role_ttl(env, &key);
    env.storage().instance().set(&LAST_ROLE_CHANGE, &now);

    events::publish_role_config_changed(
        env,
        role.clone(),
        current.quorum,
        quorum,
        current.transaction_limit,
        limit,
        effective_at,
    );
    Ok(())
}
