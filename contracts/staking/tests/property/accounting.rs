//! Property-based tests for stake accounting.
//!
//! Invariants tested:
//! - `get_total_staked` always equals the sum of active stakes
//! - The pool's token balance always equals active stakes plus queued,
//!   not yet withdrawn requests
//! - Emergency withdrawal succeeds while paused and returns the active stake

use governance::{EmergencyAction, GovernanceConfig, GovernanceError};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking::{StakingContract, StakingContractClient};

const LOCK: u64 = 1_000;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Stake(
        #[proptest(strategy = "0usize..3")] usize,
        #[proptest(strategy = "1i128..500")] i128,
    ),
    Unstake(
        #[proptest(strategy = "0usize..3")] usize,
        #[proptest(strategy = "1i128..500")] i128,
    ),
    Withdraw(#[proptest(strategy = "1u64..8")] u64),
    EmergencyWithdraw(#[proptest(strategy = "0usize..3")] usize),
    Advance(#[proptest(strategy = "0u64..1_500")] u64),
}

fn setup() -> (Env, StakingContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin, &stake_token, &LOCK, &GovernanceConfig::default());
    (env, client, admin, stake_token)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_pool_balance_matches_books(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let (env, client, _admin, stake_token) = setup();
        let token = TokenClient::new(&env, &stake_token);
        let stakers: std::vec::Vec<Address> = (0..3).map(|_| Address::generate(&env)).collect();
        for s in &stakers {
            StellarAssetClient::new(&env, &stake_token).mint(s, &100_000);
        }

        let mut active = [0i128; 3];
        // (owner, amount, unlock_at, withdrawn)
        let mut queued: std::vec::Vec<(usize, i128, u64, bool)> = std::vec::Vec::new();

        for op in ops {
            let now = env.ledger().timestamp();
            match op {
                Op::Stake(i, amount) => {
                    client.stake(&stakers[i], &amount);
                    active[i] += amount;
                }
                Op::Unstake(i, amount) => {
                    let result = client.try_request_unstake(&stakers[i], &amount);
                    if amount > active[i] {
                        prop_assert_eq!(result, Err(Ok(GovernanceError::LowBalance)));
                    } else {
                        let id = result.unwrap().unwrap();
                        prop_assert_eq!(id, queued.len() as u64 + 1);
                        active[i] -= amount;
                        queued.push((i, amount, now + LOCK, false));
                    }
                }
                Op::Withdraw(id) => {
                    let Some(entry) = queued.get_mut(id as usize - 1) else {
                        prop_assert_eq!(
                            client.try_withdraw(&stakers[0], &id),
                            Err(Ok(GovernanceError::NotFound))
                        );
                        continue;
                    };
                    let result = client.try_withdraw(&stakers[entry.0], &id);
                    if entry.3 {
                        prop_assert_eq!(result, Err(Ok(GovernanceError::InvalidState)));
                    } else if now < entry.2 {
                        prop_assert_eq!(result, Err(Ok(GovernanceError::MinDelayNotElapsed)));
                    } else {
                        prop_assert_eq!(result, Ok(Ok(())));
                        entry.3 = true;
                    }
                }
                Op::EmergencyWithdraw(i) => {
                    prop_assert_eq!(client.emergency_withdraw(&stakers[i]), active[i]);
                    active[i] = 0;
                }
                Op::Advance(secs) => env.ledger().set_timestamp(now + secs),
            }

            let pending: i128 = queued.iter().filter(|q| !q.3).map(|q| q.1).sum();
            let total: i128 = active.iter().sum();
            prop_assert_eq!(client.get_total_staked(), total);
            prop_assert_eq!(token.balance(&client.address), total + pending);
            for (i, s) in stakers.iter().enumerate() {
                prop_assert_eq!(client.get_staked(s), active[i]);
            }
        }
    }

    #[test]
    fn prop_emergency_withdraw_while_paused(amount in 1i128..1_000_000) {
        let (env, client, admin, stake_token) = setup();
        let staker = Address::generate(&env);
        StellarAssetClient::new(&env, &stake_token).mint(&staker, &amount);
        client.stake(&staker, &amount);

        client.emergency_action(&admin, &EmergencyAction::Pause);
        prop_assert_eq!(client.try_stake(&staker, &1), Err(Ok(GovernanceError::EnforcedPause)));
        prop_assert_eq!(client.emergency_withdraw(&staker), amount);
        prop_assert_eq!(TokenClient::new(&env, &stake_token).balance(&staker), amount);
        prop_assert_eq!(client.get_total_staked(), 0);
    }
}
