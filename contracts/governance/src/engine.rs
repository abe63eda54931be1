//! Proposal lifecycle: validation, creation, approval and execution.
//!
//! There is no separate execute entry point. The approval that brings the
//! number of distinct, currently entitled approvers up to quorum applies the
//! proposal's action in the same call, exactly once.

use soroban_sdk::{token, Address, Env, Vec};

use crate::{
    config, emergency, events,
    proposal::{try_execute, Action, Proposal, ProposalStatus, ProposalType},
    roles::{self, RoleId},
    store, validation, wallets, whitelist, GovernanceConfig, GovernanceError,
};

/// Bootstraps governance on the current contract instance.
///
/// `admin` receives the `ADMIN` role; `native_asset` is the asset recovery
/// proposals may never move.
pub fn initialize(
    env: &Env,
    admin: &Address,
    native_asset: &Address,
    config: &GovernanceConfig,
) -> Result<(), GovernanceError> {
    if config::is_initialized(env) {
        return Err(GovernanceError::AlreadyInitialized);
    }
    config.validate()?;

    config::store(env, config, native_asset);
    roles::grant(env, &roles::admin_role(env), admin);

    events::publish_initialized(env, admin.clone(), native_asset.clone());
    Ok(())
}

/// Builds the typed action from the flat call tuple.
///
/// # Errors
/// - `InvalidAddress` if `target` is missing or is the governed contract, or
///   a recovery names no token.
/// - `InvalidParameter` if a role type carries no role.
/// - `CannotRecoverNativeAsset` if a recovery targets the native asset.
/// - `InvalidAmount` if a recovery amount is missing or not positive.
pub fn build_action(
    env: &Env,
    kind: ProposalType,
    target: Option<Address>,
    role: Option<RoleId>,
    amount: Option<i128>,
    token_address: Option<Address>,
) -> Result<Action, GovernanceError> {
    let target = validation::require_target(env, target)?;
    let action = match kind {
        ProposalType::AddRole => {
            Action::AddRole(role.ok_or(GovernanceError::InvalidParameter)?, target)
        }
        ProposalType::RemoveRole => {
            Action::RemoveRole(role.ok_or(GovernanceError::InvalidParameter)?, target)
        }
        ProposalType::AddWhitelist => Action::AddWhitelist(target),
        ProposalType::RemoveWhitelist => Action::RemoveWhitelist(target),
        ProposalType::Recovery => {
            let token = token_address.ok_or(GovernanceError::InvalidAddress)?;
            require_recoverable(env, &token)?;
            let amount = amount.ok_or(GovernanceError::InvalidAmount)?;
            validation::require_positive(amount)?;
            Action::Recovery(token, target, amount)
        }
        ProposalType::AddDistributionWallet => Action::AddDistributionWallet(target),
        ProposalType::RemoveDistributionWallet => Action::RemoveDistributionWallet(target),
    };
    Ok(action)
}

/// State-dependent checks, run at creation and again right before the
/// action is applied.
pub fn validate_action(env: &Env, action: &Action) -> Result<(), GovernanceError> {
    match action {
        Action::RemoveRole(role, account) => {
            if !roles::has_role(env, role, account) {
                return Err(GovernanceError::InvalidState);
            }
            if *role == roles::admin_role(env) && roles::members(env, role).len() <= 1 {
                return Err(GovernanceError::InvalidState);
            }
        }
        Action::RemoveWhitelist(account) => {
            if !whitelist::is_listed(env, account) {
                return Err(GovernanceError::InvalidState);
            }
        }
        Action::RemoveDistributionWallet(wallet) => {
            if !wallets::is_distribution_wallet(env, wallet) {
                return Err(GovernanceError::InvalidState);
            }
        }
        Action::Recovery(token, _, _) => require_recoverable(env, token)?,
        Action::AddRole(..) | Action::AddWhitelist(_) | Action::AddDistributionWallet(_) => {}
    }
    Ok(())
}

/// Creates a proposal and records the caller as its first approval.
///
/// `delay` extends the approval delay beyond the configured minimum; it must
/// be shorter than the proposal TTL.
#[allow(clippy::too_many_arguments)]
pub fn create_proposal(
    env: &Env,
    caller: &Address,
    kind: ProposalType,
    delay: u64,
    target: Option<Address>,
    role: Option<RoleId>,
    amount: Option<i128>,
    token_address: Option<Address>,
) -> Result<u64, GovernanceError> {
    emergency::require_operational(env)?;
    validation::require_initialized(env)?;

    let cfg = config::load(env)?;
    if delay >= cfg.proposal_ttl {
        return Err(GovernanceError::InvalidParameter);
    }

    let action = build_action(env, kind, target, role, amount, token_address)?;
    validate_action(env, &action)?;

    let approver_role = kind.approver_role(env);
    roles::require_role(env, &approver_role, caller)?;

    let now = env.ledger().timestamp();
    let id = store::next_id(env);
    let mut approvals = Vec::new(env);
    approvals.push_back(caller.clone());

    let proposal = Proposal {
        id,
        kind,
        action,
        proposer: caller.clone(),
        quorum: roles::quorum(env, &approver_role),
        approver_role,
        approvals,
        created_at: now,
        executable_at: now.saturating_add(delay.max(cfg.min_approval_delay)),
        expires_at: now.saturating_add(cfg.proposal_ttl),
        executed: false,
        executed_at: None,
    };
    store::save(env, &proposal);

    events::publish_proposal_created(
        env,
        id,
        kind,
        caller.clone(),
        proposal.executable_at,
        proposal.expires_at,
    );
    Ok(id)
}

/// Approves a proposal and executes it once quorum is reached.
///
/// Returns `true` when this call executed the proposal. Repeating an
/// approval is a no-op.
///
/// # Errors
/// - `NotFound` for an unknown id.
/// - `InvalidState` if the proposal is executed or expired.
/// - `Unauthorized` if `caller` does not hold the approver role.
/// - `MinDelayNotElapsed` before `executable_at`.
pub fn approve_proposal(env: &Env, caller: &Address, id: u64) -> Result<bool, GovernanceError> {
    emergency::require_operational(env)?;
    validation::require_initialized(env)?;

    let mut proposal = store::load(env, id)?;
    let now = env.ledger().timestamp();
    if proposal.status(now) != ProposalStatus::Pending {
        return Err(GovernanceError::InvalidState);
    }
    roles::require_role(env, &proposal.approver_role, caller)?;
    if now < proposal.executable_at {
        return Err(GovernanceError::MinDelayNotElapsed);
    }

    let newly_approved = !proposal.has_approved(caller);
    if newly_approved {
        proposal.approvals.push_back(caller.clone());
    }

    let approvals = entitled_approvals(env, &proposal);
    let quorum = proposal
        .quorum
        .max(roles::quorum(env, &proposal.approver_role));

    let Some(action) = try_execute(&proposal, approvals, quorum, now) else {
        if newly_approved {
            store::save(env, &proposal);
            events::publish_proposal_approved(env, id, caller.clone(), approvals);
        }
        return Ok(false);
    };

    validate_action(env, &action)?;

    proposal.executed = true;
    proposal.executed_at = Some(now);
    store::save(env, &proposal);
    if newly_approved {
        events::publish_proposal_approved(env, id, caller.clone(), approvals);
    }

    apply(env, &action)?;
    events::publish_proposal_executed(env, id, action);
    Ok(true)
}

pub fn get_proposal(env: &Env, id: u64) -> Result<Proposal, GovernanceError> {
    store::load(env, id)
}

pub fn proposal_status(env: &Env, id: u64) -> Result<ProposalStatus, GovernanceError> {
    Ok(store::load(env, id)?.status(env.ledger().timestamp()))
}

pub fn has_approved(env: &Env, id: u64, account: &Address) -> Result<bool, GovernanceError> {
    Ok(store::load(env, id)?.has_approved(account))
}

// ── Internal helpers ─────────────────────────────────────────────────────────

/// Approvers that still hold the approver role. Revoked holders stop
/// counting towards quorum.
fn entitled_approvals(env: &Env, proposal: &Proposal) -> u32 {
    let mut count = 0u32;
    for approver in proposal.approvals.iter() {
        if roles::has_role(env, &proposal.approver_role, &approver) {
            count = count.saturating_add(1);
        }
    }
    count
}

fn require_recoverable(env: &Env, token: &Address) -> Result<(), GovernanceError> {
    if *token == config::native_asset(env)? || *token == env.current_contract_address() {
        return Err(GovernanceError::CannotRecoverNativeAsset);
    }
    Ok(())
}

fn apply(env: &Env, action: &Action) -> Result<(), GovernanceError> {
    match action {
        Action::AddRole(role, account) => roles::grant(env, role, account),
        Action::RemoveRole(role, account) => roles::revoke(env, role, account),
        Action::AddWhitelist(account) => {
            whitelist::add(env, account)?;
        }
        Action::RemoveWhitelist(account) => whitelist::remove(env, account),
        Action::Recovery(token, to, amount) => {
            let client = token::Client::new(env, token);
            let this = env.current_contract_address();
            if client.balance(&this) < *amount {
                return Err(GovernanceError::LowBalance);
            }
            client.transfer(&this, to, amount);
            events::publish_recovery(env, token.clone(), to.clone(), *amount);
        }
        Action::AddDistributionWallet(wallet) => wallets::add(env, wallet),
        Action::RemoveDistributionWallet(wallet) => wallets::remove(env, wallet),
    }
    Ok(())
}
