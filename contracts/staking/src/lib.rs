#![no_std]

pub mod events;
pub mod timelock;

use governance::{
    config, emergency, engine, roles, validation, wallets, whitelist, BreakerState,
    EmergencyAction, EmergencyState, GovernanceConfig, GovernanceError, Proposal,
    ProposalStatus, ProposalType, RoleConfig, RoleId, WhitelistEntry,
};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use timelock::UnstakeRequest;

// ── Storage key constants ────────────────────────────────────────────────────

const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const LOCK_PERIOD: Symbol = symbol_short!("LOCK_PER");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER_STAKE: Symbol = symbol_short!("STK");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool and its governance.
    ///
    /// * `stake_token`  – SAC address of the token users stake. It is the
    ///   pool's native asset and can never be recovered by proposal.
    /// * `lock_period`  – seconds a withdrawal must wait after `request_unstake`.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        lock_period: u64,
        config: GovernanceConfig,
    ) -> Result<(), GovernanceError> {
        if config::is_initialized(&env) {
            return Err(GovernanceError::AlreadyInitialized);
        }
        admin.require_auth();
        if stake_token == env.current_contract_address() {
            return Err(GovernanceError::InvalidAddress);
        }

        engine::initialize(&env, &admin, &stake_token, &config)?;

        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&LOCK_PERIOD, &lock_period);
        // TOTAL_STAKED and UNSTK_CTR start at zero; unwrap_or(0) covers absent keys.

        events::publish_initialized(&env, admin, stake_token, lock_period);
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), GovernanceError> {
        emergency::require_operational(&env)?;
        validation::require_initialized(&env)?;
        staker.require_auth();
        validation::require_positive(amount)?;

        let stake_token = Self::stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let new_stake = Self::staked_of(&env, &staker).saturating_add(amount);
        Self::set_staked(&env, &staker, new_stake);

        let new_total = Self::total_staked(&env).saturating_add(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        events::publish_staked(&env, staker, amount, new_total);
        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Queue `amount` tokens for withdrawal after the lock period.
    ///
    /// The active stake is reduced immediately; tokens are returned by
    /// `withdraw` once the request unlocks.
    pub fn request_unstake(env: Env, staker: Address, amount: i128) -> Result<u64, GovernanceError> {
        emergency::require_operational(&env)?;
        validation::require_initialized(&env)?;
        staker.require_auth();
        validation::require_positive(amount)?;

        let prev_stake = Self::staked_of(&env, &staker);
        if prev_stake < amount {
            return Err(GovernanceError::LowBalance);
        }
        Self::set_staked(&env, &staker, prev_stake.saturating_sub(amount));

        let new_total = Self::total_staked(&env).saturating_sub(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        let lock_period: u64 = env.storage().instance().get(&LOCK_PERIOD).unwrap_or(0);
        let unlock_at = env.ledger().timestamp().saturating_add(lock_period);

        let request_id = timelock::next_request_id(&env);
        let request = UnstakeRequest {
            id: request_id,
            staker: staker.clone(),
            amount,
            unlock_at,
            withdrawn: false,
        };
        timelock::store_request(&env, &request);

        events::publish_unstake_requested(&env, request_id, staker, amount, unlock_at);
        Ok(request_id)
    }

    /// Withdraw tokens for a previously queued unstake request.
    ///
    /// Fails with `MinDelayNotElapsed` before `unlock_at` and with
    /// `InvalidState` on duplicate calls.
    pub fn withdraw(env: Env, staker: Address, request_id: u64) -> Result<(), GovernanceError> {
        emergency::require_operational(&env)?;
        validation::require_initialized(&env)?;
        staker.require_auth();

        let mut request =
            timelock::get_request(&env, request_id).ok_or(GovernanceError::NotFound)?;

        if request.staker != staker {
            return Err(GovernanceError::Unauthorized);
        }
        if request.withdrawn {
            return Err(GovernanceError::InvalidState);
        }
        if env.ledger().timestamp() < request.unlock_at {
            return Err(GovernanceError::MinDelayNotElapsed);
        }

        // Mark as withdrawn before transfer (checks-effects-interactions).
        request.withdrawn = true;
        timelock::store_request(&env, &request);

        let stake_token = Self::stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(
            &env.current_contract_address(),
            &staker,
            &request.amount,
        );

        events::publish_withdrawn(&env, request_id, staker, request.amount);
        Ok(())
    }

    /// Return the caller's whole active stake immediately.
    ///
    /// Works while paused or while the breaker is tripped. Queued unstake
    /// requests are untouched and still go through `withdraw`.
    pub fn emergency_withdraw(env: Env, staker: Address) -> Result<i128, GovernanceError> {
        validation::require_initialized(&env)?;
        staker.require_auth();

        let amount = Self::staked_of(&env, &staker);
        if amount <= 0 {
            return Ok(0);
        }

        Self::set_staked(&env, &staker, 0);
        let new_total = Self::total_staked(&env).saturating_sub(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        let stake_token = Self::stake_token(&env)?;
        token::Client::new(&env, &stake_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_emergency_withdrawn(&env, staker, amount, emergency::is_paused(&env));
        Ok(amount)
    }

    /// Update the unstake lock period (affects only *future* requests).
    ///
    /// Requires `ADMIN`.
    pub fn set_lock_period(
        env: Env,
        caller: Address,
        new_period: u64,
    ) -> Result<(), GovernanceError> {
        emergency::require_operational(&env)?;
        validation::require_initialized(&env)?;
        caller.require_auth();
        roles::require_role(&env, &roles::admin_role(&env), &caller)?;

        env.storage().instance().set(&LOCK_PERIOD, &new_period);

        events::publish_lock_period_set(&env, caller, new_period);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the user's current active stake.
    pub fn get_staked(env: Env, staker: Address) -> Result<i128, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(Self::staked_of(&env, &staker))
    }

    /// Return the sum of all active stakes.
    pub fn get_total_staked(env: Env) -> Result<i128, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(Self::total_staked(&env))
    }

    /// Return the configured unstake lock period in seconds.
    pub fn get_lock_period(env: Env) -> Result<u64, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Ok(env.storage().instance().get(&LOCK_PERIOD).unwrap_or(0))
    }

    pub fn get_unstake_request(
        env: Env,
        request_id: u64,
    ) -> Result<UnstakeRequest, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        timelock::get_request(&env, request_id).ok_or(GovernanceError::NotFound)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, GovernanceError> {
        emergency::require_breaker_clear(&env)?;
        Self::stake_token(&env)
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

    fn stake_token(env: &Env) -> Result<Address, GovernanceError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(GovernanceError::NotInitialized)
    }

    fn staked_of(env: &Env, staker: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_STAKE, staker.clone()))
            .unwrap_or(0)
    }

    fn set_staked(env: &Env, staker: &Address, amount: i128) {
        let key = (USER_STAKE, staker.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
