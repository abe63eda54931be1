#![no_std]

//! Fungible token whose privileged operations run through the governance
//! engine. The token itself is the native asset: recovery proposals can move
//! foreign tokens the contract holds, never its own.

pub mod balances;
pub mod events;

use governance::{
    config, emergency, engine, roles, validation, wallets, whitelist, BreakerState,
    EmergencyAction, EmergencyState, GovernanceConfig, GovernanceError, Proposal,
    ProposalStatus, ProposalType, RoleConfig, RoleId, WhitelistEntry,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const METADATA: Symbol = symbol_short!("META");

// ── Public-facing types ──────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TokenContract;

#[contractimpl]
impl TokenContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the token and its governance.
    ///
    /// * `admin`          – first `ADMIN` holder; receives `initial_supply`.
    /// * `config`         – governance timelocks and cooldowns.
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        decimals: u32,
        initial_supply: i128,
        config: GovernanceConfig,
    ) -> Result<(), GovernanceError> {
        if config::is_initialized(&env) {
            return Err(GovernanceError::AlreadyInitialized);
        }
        admin.require_auth();
        if initial_supply < 0 {
            return Err(GovernanceError::InvalidAmount);
        }

        engine::initialize(&env, &admin, &env.current_contract_address(), &config)?;

        let metadata = TokenMetadata {
            name: name.clone(),
            symbol: symbol.clone(),
            decimals,
        };
        env.storage().instance().set(&METADATA, &metadata);
        if initial_supply > 0 {
            balances::mint(&env, &admin, initial_supply);
        }

        events::publish_initialized(&env, admin, name, symbol, decimals, initial_supply);
        Ok(())
    }

    // ── Transfers ───────────────────────────────────────────────────────────

    /// Move `amount` from `from` to a whitelisted `to`.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), GovernanceError> {
        emergency::require_operational(&env)?;
        validation::require_initialized(&env)?;
        from.require_auth();

        validation::require_positive(amount)?;
        whitelist::require_whitelisted(&env, &to)?;
        balances::move_balance(&env, &from, &to, amount)?;

        events::publish_transfer(&env, from, to, amount);
        Ok(())
    }

    /// Pay `amount` out of a governed distribution `wallet`.
    ///
    /// Requires `MANAGER`; the amount is capped by the role's transaction
    /// limit and the recipient must be whitelisted.
    pub fn distribute(
        env: Env,
        caller: Address,
        wallet: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), GovernanceError> {
        emergency::require_operational(&env)?;
        validation::require_initialized(&env)?;
        caller.require_auth();

        let manager = roles::manager_role(&env);
        roles::require_role(&env, &manager, &caller)?;
        if !wallets::is_distribution_wallet(&env, &wallet) {
            return Err(GovernanceError::InvalidState);
        }
        validation::require_positive(amount)?;
        roles::require_within_limit(&env, &manager, amount)?;
        whitelist::require_whitelisted(&env, &to)?;
        balances::move_balance(&env, &wallet, &to, amount)?;

        events::publish_distributed(&env, caller, wallet, to, amount);
        Ok(())
    }

    // ── Token queries ───────────────────────────────────────────────────────

    pub fn balance(env: Env, account: Address) -> Result<i128, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(balances::balance(&env, &account))
    }

    pub fn total_supply(env: Env) -> Result<i128, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(balances::total_supply(&env))
    }

    pub fn name(env: Env) -> Result<String, GovernanceError> {
        Ok(Self::metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, GovernanceError> {
        Ok(Self::metadata(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, GovernanceError> {
        Ok(Self::metadata(&env)?.decimals)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<GovernanceConfig, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        config::load(&env)
    }

    // ── Proposals ───────────────────────────────────────────────────────────

    /// Open a proposal; the caller's creation counts as the first approval.
    #[allow(clippy::too_many_arguments)]
    pub fn create_proposal(
        env: Env,
        caller: Address,
        kind: ProposalType,
        delay: u64,
        target: Option<Address>,
        role: Option<RoleId>,
        amount: Option<i128>,
        token_address: Option<Address>,
    ) -> Result<u64, GovernanceError> {
        caller.require_auth();
        engine::create_proposal(
            &env,
            &caller,
            kind,
            delay,
            target,
            role,
            amount,
            token_address,
        )
    }

    /// Approve a proposal. Returns `true` when this approval executed it.
    pub fn approve_proposal(
        env: Env,
        caller: Address,
        proposal_id: u64,
    ) -> Result<bool, GovernanceError> {
        caller.require_auth();
        engine::approve_proposal(&env, &caller, proposal_id)
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        engine::get_proposal(&env, proposal_id)
    }

    pub fn get_proposal_status(
        env: Env,
        proposal_id: u64,
    ) -> Result<ProposalStatus, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        engine::proposal_status(&env, proposal_id)
    }

    pub fn has_approved(
        env: Env,
        proposal_id: u64,
        account: Address,
    ) -> Result<bool, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        engine::has_approved(&env, proposal_id, &account)
    }

    pub fn proposal_count(env: Env) -> Result<u64, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(governance::store::count(&env))
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    pub fn admin_role(env: Env) -> RoleId {
        roles::admin_role(&env)
    }

    pub fn manager_role(env: Env) -> RoleId {
        roles::manager_role(&env)
    }

    /// Membership check consumers gate on; answers while the breaker is tripped.
    pub fn has_role(env: Env, role: RoleId, account: Address) -> bool {
        roles::has_role(&env, &role, &account)
    }

    pub fn get_role_members(env: Env, role: RoleId) -> Result<Vec<Address>, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(roles::members(&env, &role))
    }

    pub fn get_role_config(env: Env, role: RoleId) -> Result<RoleConfig, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(roles::role_config(&env, &role))
    }

    pub fn get_quorum(env: Env, role: RoleId) -> Result<u32, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(roles::quorum(&env, &role))
    }

    pub fn get_transaction_limit(env: Env, role: RoleId) -> Result<i128, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(roles::transaction_limit(&env, &role))
    }

    /// Schedule a new quorum for `role`. Requires `ADMIN`.
    pub fn set_quorum(
        env: Env,
        caller: Address,
        role: RoleId,
        quorum: u32,
    ) -> Result<(), GovernanceError> {
        caller.require_auth();
        roles::set_quorum(&env, &caller, &role, quorum)
    }

    /// Schedule a new per-transaction limit for `role`. Requires `ADMIN`.
    pub fn set_transaction_limit(
        env: Env,
        caller: Address,
        role: RoleId,
        limit: i128,
    ) -> Result<(), GovernanceError> {
        caller.require_auth();
        roles::set_transaction_limit(&env, &caller, &role, limit)
    }

    // ── Whitelist and distribution wallets ──────────────────────────────────

    /// Transfer gate consumers check; answers while the breaker is tripped.
    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        whitelist::is_whitelisted(&env, &account)
    }

    pub fn get_whitelist_entry(
        env: Env,
        account: Address,
    ) -> Result<Option<WhitelistEntry>, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(whitelist::entry(&env, &account))
    }

    pub fn is_distribution_wallet(env: Env, wallet: Address) -> Result<bool, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(wallets::is_distribution_wallet(&env, &wallet))
    }

    pub fn get_distribution_wallets(env: Env) -> Result<Vec<Address>, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(wallets::list(&env))
    }

    // ── Emergency controls ──────────────────────────────────────────────────

    pub fn emergency_action(
        env: Env,
        caller: Address,
        action: EmergencyAction,
    ) -> Result<(), GovernanceError> {
        validation::require_initialized(&env)?;
        caller.require_auth();
        emergency::emergency_action(&env, &caller, action)
    }

    pub fn is_paused(env: Env) -> bool {
        emergency::is_paused(&env)
    }

    pub fn get_emergency_state(env: Env) -> EmergencyState {
        emergency::state(&env)
    }

    pub fn trip_circuit_breaker(env: Env, caller: Address) -> Result<(), GovernanceError> {
        validation::require_initialized(&env)?;
        caller.require_auth();
        emergency::trip_circuit_breaker(&env, &caller)
    }

    pub fn reset_circuit_breaker(env: Env, caller: Address) -> Result<(), GovernanceError> {
        validation::require_initialized(&env)?;
        caller.require_auth();
        emergency::reset_circuit_breaker(&env, &caller)
    }

    pub fn is_breaker_tripped(env: Env) -> bool {
        emergency::is_breaker_tripped(&env)
    }

    pub fn get_breaker_state(env: Env) -> BreakerState {
        emergency::breaker_state(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn metadata(env: &Env) -> Result<TokenMetadata, GovernanceError> {
        env.storage()
            .instance()
            .get(&METADATA)
            .ok_or(GovernanceError::NotInitialized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test;
