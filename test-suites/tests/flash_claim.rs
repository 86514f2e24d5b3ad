//! End-to-end flash claims: wrap, borrow, claim, sweep, restore.

use soroban_sdk::{vec, Address, Bytes, IntoVal, Symbol};

use bound_common::SweepSpec;
use bound_mocks::{
    MockAirdropProject, MockAirdropProjectClient, MockFlashLoanReceiver,
    MockFlashLoanReceiverClient, MockFungible, MockFungibleClient,
};
use bound_token::Error as WrapperError;
use flashclaim_receiver::FlashclaimReceiverContractClient;
use test_suites::TestFixture;

/// Provision a registry-tracked receiver for `user`.
fn registry_receiver(f: &TestFixture, user: &Address) -> FlashclaimReceiverContractClient<'static> {
    let (provider, registry) = f.flashclaim_stack(1, None);
    f.queue_receiver(&provider);
    let receiver_id = registry.create_receiver(user);
    FlashclaimReceiverContractClient::new(&f.env, &receiver_id)
}

#[test]
fn test_flash_claim_round_trip_pays_owner() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 100);

    let bonus_id = f.env.register_contract(None, MockFungible);
    let project_id = f.env.register_contract(None, MockAirdropProject);
    let project = MockAirdropProjectClient::new(&f.env, &project_id);
    project.init(&bonus_id, &25);
    MockFungibleClient::new(&f.env, &bonus_id).mint(&project_id, &1_000);

    let receiver = registry_receiver(&f, &f.user1);

    let args = vec![
        &f.env,
        receiver.address.into_val(&f.env),
        f.nft.address.into_val(&f.env),
        vec![&f.env, 100u128].into_val(&f.env),
    ];
    let params = receiver.encode_flash_loan_params(
        &project_id,
        &Symbol::new(&f.env, "native_apply_airdrop"),
        &args,
        &vec![&f.env, SweepSpec::Fungible(bonus_id.clone())],
    );

    f.wrapper
        .flash_loan(&f.user1, &receiver.address, &vec![&f.env, 100u128], &params);

    // The bonus landed with the owner and custody is back where it started
    assert_eq!(
        soroban_sdk::token::Client::new(&f.env, &bonus_id).balance(&f.user1),
        25
    );
    assert_eq!(f.nft.owner_of(&100), f.wrapper.address);
    assert_eq!(f.wrapper.owner_of(&100), f.user1);
    assert!(!f.wrapper.locked());
    assert!(project.applied(&f.nft.address, &100));
}

#[test]
fn test_failed_execution_rolls_the_loan_back() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 7);

    let receiver_id = f.env.register_contract(None, MockFlashLoanReceiver);
    let receiver = MockFlashLoanReceiverClient::new(&f.env, &receiver_id);
    receiver.set_fail_execution(&true);

    let result = f.wrapper.try_flash_loan(
        &f.user1,
        &receiver_id,
        &vec![&f.env, 7u128],
        &Bytes::new(&f.env),
    );
    assert_eq!(result, Err(Ok(WrapperError::ExecutionFailed)));

    // Nothing moved, nothing stayed locked
    assert_eq!(f.nft.owner_of(&7), f.wrapper.address);
    assert_eq!(f.wrapper.owner_of(&7), f.user1);
    assert!(!f.wrapper.locked());
    assert_eq!(receiver.execution_count(), 0);

    // The same loan goes through once the executor cooperates
    receiver.set_fail_execution(&false);
    f.wrapper
        .flash_loan(&f.user1, &receiver_id, &vec![&f.env, 7u128], &Bytes::new(&f.env));
    assert_eq!(receiver.execution_count(), 1);
    assert_eq!(f.nft.owner_of(&7), f.wrapper.address);
}

#[test]
fn test_trapped_claim_call_reverts_the_whole_loan() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 3);

    // The project has no bonus balance, so its payout transfer traps
    let bonus_id = f.env.register_contract(None, MockFungible);
    let project_id = f.env.register_contract(None, MockAirdropProject);
    let project = MockAirdropProjectClient::new(&f.env, &project_id);
    project.init(&bonus_id, &25);

    let receiver = registry_receiver(&f, &f.user1);
    let args = vec![
        &f.env,
        receiver.address.into_val(&f.env),
        f.nft.address.into_val(&f.env),
        vec![&f.env, 3u128].into_val(&f.env),
    ];
    let params = receiver.encode_flash_loan_params(
        &project_id,
        &Symbol::new(&f.env, "native_apply_airdrop"),
        &args,
        &vec![&f.env],
    );

    let result =
        f.wrapper
            .try_flash_loan(&f.user1, &receiver.address, &vec![&f.env, 3u128], &params);
    assert!(result.is_err());

    assert_eq!(f.nft.owner_of(&3), f.wrapper.address);
    assert_eq!(f.wrapper.owner_of(&3), f.user1);
    assert!(!f.wrapper.locked());
    assert!(!project.applied(&f.nft.address, &3));
}

#[test]
fn test_claim_admin_cannot_extract_underlying_or_wrapper() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 1);
    f.wrapper.set_claim_admin(&f.admin, &f.admin);

    let result = f
        .wrapper
        .try_claim_fungible_airdrop(&f.admin, &f.nft.address, &f.admin, &1);
    assert_eq!(result, Err(Ok(WrapperError::CannotClaimUnderlying)));

    let result = f.wrapper.try_claim_non_fungible_airdrop(
        &f.admin,
        &f.wrapper.address,
        &f.admin,
        &vec![&f.env, 1u128],
    );
    assert_eq!(result, Err(Ok(WrapperError::CannotClaimSelf)));
}
