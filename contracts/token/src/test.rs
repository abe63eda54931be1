#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use governance::{
    config::{DEFAULT_MIN_APPROVAL_DELAY, DEFAULT_ROLE_CHANGE_DELAY, DEFAULT_WHITELIST_LOCK_DURATION},
    EmergencyAction, GovernanceConfig, GovernanceError, ProposalStatus, ProposalType, RoleId,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as SacClient, StellarAssetClient},
    Address, Env, String,
};

use crate::{TokenContract, TokenContractClient};

const SUPPLY: i128 = 1_000_000;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, TokenContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(10_000);
    env.ledger().set_sequence_number(50);

    let contract_id = env.register(TokenContract, ());
    let client = TokenContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(
        &admin,
        &String::from_str(&env, "Governed"),
        &String::from_str(&env, "GOV"),
        &7,
        &SUPPLY,
        &GovernanceConfig::default(),
    );

    (env, client, admin)
}

fn advance(env: &Env, secs: u64) {
    let now = env.ledger().timestamp();
    env.ledger().set_timestamp(now + secs);
}

/// Creates a proposal and pushes it through with the proposer's own
/// approval once the minimum delay has passed. Assumes quorum one.
#[allow(clippy::too_many_arguments)]
fn pass(
    env: &Env,
    client: &TokenContractClient,
    proposer: &Address,
    kind: ProposalType,
    target: &Address,
    role: Option<RoleId>,
    amount: Option<i128>,
    token: Option<Address>,
) -> u64 {
    let id = client.create_proposal(
        proposer,
        &kind,
        &0,
        &Some(target.clone()),
        &role,
        &amount,
        &token,
    );
    advance(env, DEFAULT_MIN_APPROVAL_DELAY);
    assert!(client.approve_proposal(proposer, &id));
    id
}

fn add_manager(env: &Env, client: &TokenContractClient, admin: &Address) -> Address {
    let manager = Address::generate(env);
    let role = client.manager_role();
    pass(env, client, admin, ProposalType::AddRole, &manager, Some(role), None, None);
    manager
}

/// Whitelists `account` and waits out the lock.
fn whitelist(env: &Env, client: &TokenContractClient, manager: &Address, account: &Address) {
    pass(env, client, manager, ProposalType::AddWhitelist, account, None, None, None);
    advance(env, DEFAULT_WHITELIST_LOCK_DURATION);
}

// ── Initialisation ────────────────────────────────────────────────────────────

#[test]
fn test_initialize() {
    let (env, client, admin) = setup();

    assert!(client.is_initialized());
    assert_eq!(client.name(), String::from_str(&env, "Governed"));
    assert_eq!(client.symbol(), String::from_str(&env, "GOV"));
    assert_eq!(client.decimals(), 7);
    assert_eq!(client.total_supply(), SUPPLY);
    assert_eq!(client.balance(&admin), SUPPLY);
    assert!(client.has_role(&client.admin_role(), &admin));
    assert_eq!(client.get_config(), GovernanceConfig::default());

    let result = client.try_initialize(
        &admin,
        &String::from_str(&env, "Again"),
        &String::from_str(&env, "AGN"),
        &7,
        &0,
        &GovernanceConfig::default(),
    );
    assert_eq!(result, Err(Ok(GovernanceError::AlreadyInitialized)));
}

#[test]
fn test_initialize_rejects_negative_supply() {
    let env = Env::default();
    env.mock_all_auths();
    let client = TokenContractClient::new(&env, &env.register(TokenContract, ()));

    let result = client.try_initialize(
        &Address::generate(&env),
        &String::from_str(&env, "Governed"),
        &String::from_str(&env, "GOV"),
        &7,
        &-1,
        &GovernanceConfig::default(),
    );
    assert_eq!(result, Err(Ok(GovernanceError::InvalidAmount)));
    assert!(!client.is_initialized());
}

#[test]
fn test_calls_before_initialize_fail() {
    let env = Env::default();
    env.mock_all_auths();
    let client = TokenContractClient::new(&env, &env.register(TokenContract, ()));
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    assert_eq!(
        client.try_transfer(&a, &b, &1),
        Err(Ok(GovernanceError::NotInitialized))
    );
    assert_eq!(client.try_name(), Err(Ok(GovernanceError::NotInitialized)));
}

// ── Transfers ─────────────────────────────────────────────────────────────────

#[test]
fn test_transfer_requires_whitelisted_recipient() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let recipient = Address::generate(&env);

    assert_eq!(
        client.try_transfer(&admin, &recipient, &100),
        Err(Ok(GovernanceError::NotWhitelisted))
    );

    pass(&env, &client, &manager, ProposalType::AddWhitelist, &recipient, None, None, None);
    // Listed but still locked.
    assert_eq!(
        client.try_transfer(&admin, &recipient, &100),
        Err(Ok(GovernanceError::NotWhitelisted))
    );

    advance(&env, DEFAULT_WHITELIST_LOCK_DURATION);
    client.transfer(&admin, &recipient, &100);
    assert_eq!(client.balance(&recipient), 100);
    assert_eq!(client.balance(&admin), SUPPLY - 100);
    assert_eq!(client.total_supply(), SUPPLY);
}

#[test]
fn test_transfer_validates_amount_and_balance() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let recipient = Address::generate(&env);
    whitelist(&env, &client, &manager, &recipient);

    assert_eq!(
        client.try_transfer(&admin, &recipient, &0),
        Err(Ok(GovernanceError::InvalidAmount))
    );
    assert_eq!(
        client.try_transfer(&admin, &recipient, &(SUPPLY + 1)),
        Err(Ok(GovernanceError::LowBalance))
    );
}

#[test]
fn test_whitelist_removal_is_immediate() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let recipient = Address::generate(&env);
    whitelist(&env, &client, &manager, &recipient);
    assert!(client.is_whitelisted(&recipient));

    pass(&env, &client, &manager, ProposalType::RemoveWhitelist, &recipient, None, None, None);
    assert!(!client.is_whitelisted(&recipient));
    assert_eq!(client.get_whitelist_entry(&recipient), None);
    assert_eq!(
        client.try_transfer(&admin, &recipient, &1),
        Err(Ok(GovernanceError::NotWhitelisted))
    );
}

// ── Quorum-2 whitelist flow ───────────────────────────────────────────────────

#[test]
fn test_quorum_two_whitelist_flow() {
    let (env, client, admin) = setup();
    let a = add_manager(&env, &client, &admin);
    let b = add_manager(&env, &client, &admin);
    let role = client.manager_role();
    client.set_quorum(&admin, &role, &2);
    advance(&env, DEFAULT_ROLE_CHANGE_DELAY);
    assert_eq!(client.get_quorum(&role), 2);

    let x = Address::generate(&env);
    let id = client.create_proposal(&a, &ProposalType::AddWhitelist, &0, &Some(x.clone()), &None, &None, &None);
    assert!(client.has_approved(&id, &a));

    assert_eq!(
        client.try_approve_proposal(&b, &id),
        Err(Ok(GovernanceError::MinDelayNotElapsed))
    );

    advance(&env, DEFAULT_MIN_APPROVAL_DELAY);
    assert!(client.approve_proposal(&b, &id));
    assert_eq!(client.get_proposal_status(&id), ProposalStatus::Executed);

    let entry = client.get_whitelist_entry(&x).unwrap();
    assert_eq!(
        entry.lock_until,
        env.ledger().timestamp() + DEFAULT_WHITELIST_LOCK_DURATION
    );
    assert_eq!(
        client.try_transfer(&admin, &x, &10),
        Err(Ok(GovernanceError::NotWhitelisted))
    );

    advance(&env, DEFAULT_WHITELIST_LOCK_DURATION);
    client.transfer(&admin, &x, &10);
    assert_eq!(client.balance(&x), 10);

    assert_eq!(
        client.try_approve_proposal(&a, &id),
        Err(Ok(GovernanceError::InvalidState))
    );
}

// ── Recovery ──────────────────────────────────────────────────────────────────

#[test]
fn test_native_recovery_rejected_at_quorum_one() {
    let (env, client, admin) = setup();
    let to = Address::generate(&env);
    assert_eq!(client.get_quorum(&client.admin_role()), 1);

    let result = client.try_create_proposal(
        &admin,
        &ProposalType::Recovery,
        &0,
        &Some(to),
        &None,
        &Some(100),
        &Some(client.address.clone()),
    );
    assert_eq!(result, Err(Ok(GovernanceError::CannotRecoverNativeAsset)));
    assert_eq!(client.proposal_count(), 0);
    assert_eq!(client.balance(&admin), SUPPLY);
}

#[test]
fn test_recovery_of_foreign_token() {
    let (env, client, admin) = setup();
    let foreign = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    StellarAssetClient::new(&env, &foreign).mint(&client.address, &500);

    let to = Address::generate(&env);
    pass(
        &env,
        &client,
        &admin,
        ProposalType::Recovery,
        &to,
        None,
        Some(500),
        Some(foreign.clone()),
    );
    assert_eq!(SacClient::new(&env, &foreign).balance(&to), 500);
    assert_eq!(SacClient::new(&env, &foreign).balance(&client.address), 0);
}

#[test]
fn test_recovery_requires_admin() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let foreign = Address::generate(&env);
    let result = client.try_create_proposal(
        &manager,
        &ProposalType::Recovery,
        &0,
        &Some(Address::generate(&env)),
        &None,
        &Some(1),
        &Some(foreign),
    );
    assert_eq!(result, Err(Ok(GovernanceError::Unauthorized)));
}

// ── Distribution ──────────────────────────────────────────────────────────────

#[test]
fn test_distribute_from_governed_wallet() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let wallet = Address::generate(&env);
    let recipient = Address::generate(&env);
    whitelist(&env, &client, &manager, &wallet);
    whitelist(&env, &client, &manager, &recipient);
    client.transfer(&admin, &wallet, &1_000);

    assert_eq!(
        client.try_distribute(&manager, &wallet, &recipient, &100),
        Err(Ok(GovernanceError::InvalidState))
    );
    pass(&env, &client, &manager, ProposalType::AddDistributionWallet, &wallet, None, None, None);
    assert_eq!(client.get_distribution_wallets().len(), 1);

    let outsider = Address::generate(&env);
    assert_eq!(
        client.try_distribute(&outsider, &wallet, &recipient, &100),
        Err(Ok(GovernanceError::Unauthorized))
    );

    client.distribute(&manager, &wallet, &recipient, &100);
    assert_eq!(client.balance(&recipient), 100);
    assert_eq!(client.balance(&wallet), 900);

    assert_eq!(
        client.try_distribute(&manager, &wallet, &recipient, &901),
        Err(Ok(GovernanceError::LowBalance))
    );
}

#[test]
fn test_distribute_respects_transaction_limit() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let wallet = Address::generate(&env);
    let recipient = Address::generate(&env);
    whitelist(&env, &client, &manager, &wallet);
    whitelist(&env, &client, &manager, &recipient);
    pass(&env, &client, &manager, ProposalType::AddDistributionWallet, &wallet, None, None, None);
    client.transfer(&admin, &wallet, &1_000);

    let role = client.manager_role();
    client.set_transaction_limit(&admin, &role, &50);
    // Not yet effective.
    client.distribute(&manager, &wallet, &recipient, &60);

    advance(&env, DEFAULT_ROLE_CHANGE_DELAY);
    assert_eq!(client.get_transaction_limit(&role), 50);
    assert_eq!(
        client.try_distribute(&manager, &wallet, &recipient, &51),
        Err(Ok(GovernanceError::LowAllowance))
    );
    client.distribute(&manager, &wallet, &recipient, &50);
    assert_eq!(client.balance(&recipient), 110);
}

#[test]
fn test_distribute_to_unlisted_recipient_fails() {
    let (env, client, admin) = setup();
    let manager = add_manager(&env, &client, &admin);
    let wallet = Address::generate(&env);
    pass(&env, &client, &manager, ProposalType::AddDistributionWallet, &wallet, None, None, None);

    assert_eq!(
        client.try_distribute(&manager, &wallet, &Address::generate(&env), &1),
        Err(Ok(GovernanceError::NotWhitelisted))
    );
}

// ── Emergency controls ────────────────────────────────────────────────────────

#[test]
fn test_pause_is_checked_first() {
    let (env, client, admin) = setup();
    client.emergency_action(&admin, &EmergencyAction::Pause);
    assert!(client.is_paused());

    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_transfer(&admin, &stranger, &0),
        Err(Ok(GovernanceError::EnforcedPause))
    );
    assert_eq!(
        client.try_create_proposal(&admin, &ProposalType::AddWhitelist, &0, &None, &None, &None, &None),
        Err(Ok(GovernanceError::EnforcedPause))
    );
    // Queries stay available while paused.
    assert_eq!(client.balance(&admin), SUPPLY);

    assert_eq!(
        client.try_emergency_action(&admin, &EmergencyAction::Unpause),
        Err(Ok(GovernanceError::CooldownActive))
    );
    advance(&env, GovernanceConfig::default().emergency_cooldown);
    client.emergency_action(&admin, &EmergencyAction::Unpause);
    assert!(!client.is_paused());
    assert_eq!(
        client.get_emergency_state().last_action_at,
        Some(env.ledger().timestamp())
    );
}

#[test]
fn test_breaker_gates_queries_until_cooldown() {
    let (env, client, admin) = setup();
    client.trip_circuit_breaker(&admin);
    assert!(client.is_breaker_tripped());
    assert_eq!(client.get_breaker_state().tripped_at_block, 50);

    assert_eq!(
        client.try_balance(&admin),
        Err(Ok(GovernanceError::CircuitBreakerTripped))
    );
    assert_eq!(
        client.try_total_supply(),
        Err(Ok(GovernanceError::CircuitBreakerTripped))
    );

    env.ledger()
        .set_sequence_number(50 + GovernanceConfig::default().breaker_cooldown_blocks);
    assert!(!client.is_breaker_tripped());
    assert_eq!(client.balance(&admin), SUPPLY);
}

#[test]
fn test_halts_block_role_setters() {
    let (env, client, admin) = setup();
    let manager = client.manager_role();

    client.emergency_action(&admin, &EmergencyAction::Pause);
    assert_eq!(
        client.try_set_quorum(&admin, &manager, &2),
        Err(Ok(GovernanceError::EnforcedPause))
    );
    assert_eq!(
        client.try_set_transaction_limit(&admin, &manager, &500),
        Err(Ok(GovernanceError::EnforcedPause))
    );

    advance(&env, GovernanceConfig::default().emergency_cooldown);
    client.emergency_action(&admin, &EmergencyAction::Unpause);
    client.trip_circuit_breaker(&admin);
    assert_eq!(
        client.try_set_quorum(&admin, &manager, &2),
        Err(Ok(GovernanceError::CircuitBreakerTripped))
    );
    assert_eq!(
        client.try_set_transaction_limit(&admin, &manager, &500),
        Err(Ok(GovernanceError::CircuitBreakerTripped))
    );

    client.reset_circuit_breaker(&admin);
    assert_eq!(
        client.try_set_transaction_limit(&admin, &manager, &500),
        Ok(Ok(()))
    );
}

#[test]
fn test_breaker_gates_governance_queries() {
    let (env, client, admin) = setup();
    let id = client.create_proposal(
        &admin,
        &ProposalType::AddWhitelist,
        &0,
        &Some(Address::generate(&env)),
        &None,
        &None,
        &None,
    );
    let admin_role = client.admin_role();
    client.trip_circuit_breaker(&admin);

    let tripped = Some(Ok(GovernanceError::CircuitBreakerTripped));
    assert_eq!(client.try_get_proposal(&id).err(), tripped);
    assert_eq!(client.try_get_proposal_status(&id).err(), tripped);
    assert_eq!(client.try_has_approved(&id, &admin).err(), tripped);
    assert_eq!(client.try_proposal_count().err(), tripped);
    assert_eq!(client.try_get_role_members(&admin_role).err(), tripped);
    assert_eq!(client.try_get_role_config(&admin_role).err(), tripped);
    assert_eq!(client.try_get_quorum(&admin_role).err(), tripped);
    assert_eq!(client.try_get_transaction_limit(&admin_role).err(), tripped);
    assert_eq!(client.try_get_whitelist_entry(&admin).err(), tripped);
    assert_eq!(client.try_is_distribution_wallet(&admin).err(), tripped);
    assert_eq!(client.try_get_distribution_wallets().err(), tripped);
    assert_eq!(client.try_get_config().err(), tripped);

    // Gate checks and halt state still answer.
    assert!(client.has_role(&admin_role, &admin));
    assert!(!client.is_whitelisted(&admin));
    assert!(!client.is_paused());
    assert!(client.is_breaker_tripped());

    client.reset_circuit_breaker(&admin);
    assert_eq!(client.proposal_count(), 1);
    assert_eq!(client.get_proposal_status(&id), ProposalStatus::Pending);
}

#[test]
fn test_emergency_controls_require_admin() {
    let (env, client, _admin) = setup();
    let outsider = Address::generate(&env);
    assert_eq!(
        client.try_emergency_action(&outsider, &EmergencyAction::Pause),
        Err(Ok(GovernanceError::Unauthorized))
    );
    assert_eq!(
        client.try_trip_circuit_breaker(&outsider),
        Err(Ok(GovernanceError::Unauthorized))
    );
    assert_eq!(
        client.try_set_quorum(&outsider, &client.manager_role(), &2),
        Err(Ok(GovernanceError::Unauthorized))
    );
}
