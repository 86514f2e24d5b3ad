#![cfg(test)]
use super::*;
use soroban_sdk::{testutils::Address as _, token, Address, Env};

#[test]
fn test_nft_transfer_and_approvals() {
    let env = Env::default();
    env.mock_all_auths();
    let nft_id = env.register_contract(None, MockNft);
    let nft = MockNftClient::new(&env, &nft_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let spender = Address::generate(&env);

    nft.mint(&alice, &1);
    assert_eq!(nft.owner_of(&1), alice);

    nft.transfer(&alice, &bob, &1);
    assert_eq!(nft.owner_of(&1), bob);

    // Per-token approval lets the spender move it once
    nft.approve(&bob, &spender, &1);
    assert_eq!(nft.get_approved(&1), Some(spender.clone()));
    nft.transfer_from(&spender, &bob, &alice, &1);
    assert_eq!(nft.owner_of(&1), alice);
    assert_eq!(nft.get_approved(&1), None);

    // Operator-for-all covers every token id
    nft.mint(&alice, &2);
    nft.approve_all(&alice, &spender, &true);
    nft.transfer_from(&spender, &alice, &bob, &2);
    assert_eq!(nft.owner_of(&2), bob);
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn test_nft_transfer_from_without_approval_panics() {
    let env = Env::default();
    env.mock_all_auths();
    let nft_id = env.register_contract(None, MockNft);
    let nft = MockNftClient::new(&env, &nft_id);

    let alice = Address::generate(&env);
    let spender = Address::generate(&env);

    nft.mint(&alice, &1);
    nft.transfer_from(&spender, &alice, &spender, &1);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn test_nft_double_mint_panics() {
    let env = Env::default();
    env.mock_all_auths();
    let nft_id = env.register_contract(None, MockNft);
    let nft = MockNftClient::new(&env, &nft_id);

    let alice = Address::generate(&env);
    nft.mint(&alice, &1);
    nft.mint(&alice, &1);
}

#[test]
fn test_fungible_allowance_flow() {
    let env = Env::default();
    env.mock_all_auths();
    let token_id = env.register_contract(None, MockFungible);
    let admin_client = MockFungibleClient::new(&env, &token_id);
    let token = token::Client::new(&env, &token_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let spender = Address::generate(&env);

    admin_client.mint(&alice, &1_000);
    assert_eq!(token.balance(&alice), 1_000);

    token.transfer(&alice, &bob, &250);
    assert_eq!(token.balance(&alice), 750);
    assert_eq!(token.balance(&bob), 250);

    token.approve(&alice, &spender, &500, &1000);
    assert_eq!(token.allowance(&alice, &spender), 500);
    token.transfer_from(&spender, &alice, &bob, &300);
    assert_eq!(token.allowance(&alice, &spender), 200);
    assert_eq!(token.balance(&bob), 550);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_fungible_overdraw_panics() {
    let env = Env::default();
    env.mock_all_auths();
    let token_id = env.register_contract(None, MockFungible);
    let admin_client = MockFungibleClient::new(&env, &token_id);
    let token = token::Client::new(&env, &token_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    admin_client.mint(&alice, &10);
    token.transfer(&alice, &bob, &11);
}

#[test]
fn test_multi_token_balances_and_operators() {
    let env = Env::default();
    env.mock_all_auths();
    let mt_id = env.register_contract(None, MockMultiToken);
    let mt = MockMultiTokenClient::new(&env, &mt_id);

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let operator = Address::generate(&env);

    mt.mint(&alice, &7, &100);
    assert_eq!(mt.balance_of(&alice, &7), 100);

    mt.transfer(&alice, &bob, &7, &40);
    assert_eq!(mt.balance_of(&alice, &7), 60);
    assert_eq!(mt.balance_of(&bob, &7), 40);

    assert!(!mt.is_approved_for_all(&alice, &operator));
    mt.set_approval_for_all(&alice, &operator, &true);
    assert!(mt.is_approved_for_all(&alice, &operator));
    mt.transfer_from(&operator, &alice, &bob, &7, &60);
    assert_eq!(mt.balance_of(&alice, &7), 0);
    assert_eq!(mt.balance_of(&bob, &7), 100);
}

#[test]
fn test_loan_guard_switch() {
    let env = Env::default();
    env.mock_all_auths();
    let guard_id = env.register_contract(None, MockLoanGuard);
    let guard = MockLoanGuardClient::new(&env, &guard_id);

    let asset = Address::generate(&env);
    assert!(!guard.is_flash_loan_locked(&asset, &1));
    guard.set_locked(&asset, &1, &true);
    assert!(guard.is_flash_loan_locked(&asset, &1));
    assert!(!guard.is_flash_loan_locked(&asset, &2));
    guard.set_locked(&asset, &1, &false);
    assert!(!guard.is_flash_loan_locked(&asset, &1));
}
