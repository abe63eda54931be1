#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::{Action, EmergencyAction, ProposalType, RoleId};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when governance is bootstrapped on a contract instance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceInitializedEvent {
    pub admin: Address,
    pub native_asset: Address,
    pub timestamp: u64,
}

/// Fired when an account gains or loses a role.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: RoleId,
    pub account: Address,
    pub granted: bool,
    pub timestamp: u64,
}

/// Fired when a role's quorum or transaction limit is rescheduled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleConfigChangedEvent {
    pub role: RoleId,
    pub old_quorum: u32,
    pub new_quorum: u32,
    pub old_limit: i128,
    pub new_limit: i128,
    pub effective_at: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreatedEvent {
    pub proposal_id: u64,
    pub kind: ProposalType,
    pub proposer: Address,
    pub executable_at: u64,
    pub expires_at: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalApprovedEvent {
    pub proposal_id: u64,
    pub approver: Address,
    pub approvals: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExecutedEvent {
    pub proposal_id: u64,
    pub action: Action,
    pub timestamp: u64,
}

/// Fired when an address is whitelisted; it is usable from `lock_until`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistedWithLockEvent {
    pub account: Address,
    pub lock_until: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistRemovedEvent {
    pub account: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionWalletChangedEvent {
    pub wallet: Address,
    pub added: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyActionEvent {
    pub caller: Address,
    pub action: EmergencyAction,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CircuitBreakerEvent {
    pub caller: Address,
    pub tripped: bool,
    pub block: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, native_asset: Address) {
    let topics = (symbol_short!("GOV_INIT"),);
    let data = GovernanceInitializedEvent {
        admin,
        native_asset,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_changed(env: &Env, role: RoleId, account: Address, granted: bool) {
    let topics = (symbol_short!("ROLE_CHG"), account.clone());
    let data = RoleChangedEvent {
        role,
        account,
        granted,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

#[allow(clippy::too_many_arguments)]
pub fn publish_role_config_changed(
    env: &Env,
    role: RoleId,
    old_quorum: u32,
    new_quorum: u32,
    old_limit: i128,
    new_limit: i128,
    effective_at: u64,
) {
    let topics = (symbol_short!("ROLE_CFG"),);
    let data = RoleConfigChangedEvent {
        role,
        old_quorum,
        new_quorum,
        old_limit,
        new_limit,
        effective_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_proposal_created(
    env: &Env,
    proposal_id: u64,
    kind: ProposalType,
    proposer: Address,
    executable_at: u64,
    expires_at: u64,
) {
    let topics = (symbol_short!("PROP_NEW"), proposer.clone());
    let data = ProposalCreatedEvent {
        proposal_id,
        kind,
        proposer,
        executable_at,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_proposal_approved(env: &Env, proposal_id: u64, approver: Address, approvals: u32) {
    let topics = (symbol_short!("PROP_APV"), approver.clone());
    let data = ProposalApprovedEvent {
        proposal_id,
        approver,
        approvals,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_proposal_executed(env: &Env, proposal_id: u64, action: Action) {
    let topics = (symbol_short!("PROP_EXE"),);
    let data = ProposalExecutedEvent {
        proposal_id,
        action,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_whitelisted(env: &Env, account: Address, lock_until: u64) {
    let topics = (symbol_short!("WL_ADD"), account.clone());
    let data = WhitelistedWithLockEvent {
        account,
        lock_until,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_whitelist_removed(env: &Env, account: Address) {
    let topics = (symbol_short!("WL_REM"), account.clone());
    let data = WhitelistRemovedEvent {
        account,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_distribution_wallet_changed(env: &Env, wallet: Address, added: bool) {
    let topics = (symbol_short!("DIST_WAL"), wallet.clone());
    let data = DistributionWalletChangedEvent {
        wallet,
        added,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_recovery(env: &Env, token: Address, to: Address, amount: i128) {
    let topics = (symbol_short!("RECOVER"), to.clone());
    let data = RecoveryEvent {
        token,
        to,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_emergency_action(env: &Env, caller: Address, action: EmergencyAction) {
    let topics = (symbol_short!("EMRG"), caller.clone());
    let data = EmergencyActionEvent {
        caller,
        action,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_circuit_breaker(env: &Env, caller: Address, tripped: bool) {
    let topics = (symbol_short!("BREAKER"), caller.clone());
    let data = CircuitBreakerEvent {
        caller,
        tripped,
        block: env.ledger().sequence(),
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
