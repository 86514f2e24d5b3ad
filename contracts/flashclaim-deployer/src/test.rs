#![cfg(test)]
use super::*;
use soroban_sdk::{testutils::Address as _, vec, IntoVal, Symbol};

use bound_common::SweepSpec;
use bound_mocks::{MockAirdropProject, MockAirdropProjectClient, MockFungible, MockFungibleClient};
use flashclaim_receiver::{FlashclaimReceiverContract, FlashclaimReceiverContractClient};
use test_suites::TestFixture;

fn setup() -> (Env, FlashclaimDeployerContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let id = env.register_contract(None, FlashclaimDeployerContract);
    let client = FlashclaimDeployerContractClient::new(&env, &id);
    client.initialize(&admin);
    (env, client, admin)
}

#[test]
fn test_initialize_once() {
    let (_env, client, admin) = setup();

    assert_eq!(client.admin(), admin);
    assert_eq!(
        client.try_initialize(&admin),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_configuration_reads_back() {
    let (env, client, _admin) = setup();
    let wasm_hash = BytesN::from_array(&env, &[7u8; 32]);
    let registry = Address::generate(&env);
    let bound_registry = Address::generate(&env);

    assert_eq!(client.try_receiver_wasm(), Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_registry(), Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_bound_registry(), Err(Ok(Error::NotInitialized)));

    client.set_receiver_wasm(&wasm_hash);
    client.set_registry(&registry);
    client.set_bound_registry(&bound_registry);

    assert_eq!(client.receiver_wasm(), wasm_hash);
    assert_eq!(client.registry(), registry);
    assert_eq!(client.bound_registry(), bound_registry);
}

#[test]
fn test_provision_requires_configuration() {
    let (env, client, _admin) = setup();
    let owner = Address::generate(&env);

    // No registry wired yet
    assert_eq!(
        client.try_provision(&owner, &1),
        Err(Ok(Error::NotInitialized))
    );

    // Registry wired but no receiver wasm
    client.set_registry(&Address::generate(&env));
    assert_eq!(
        client.try_provision(&owner, &1),
        Err(Ok(Error::NotInitialized))
    );

    // Wiring a receiver also needs the bound-asset registry configured
    let receiver = Address::generate(&env);
    let result = env.as_contract(&client.address, || {
        FlashclaimDeployerContract::wire_receiver(&env, &receiver, &owner, 1)
    });
    assert_eq!(result, Err(Error::NotInitialized));
}

#[test]
fn test_unconfigured_contract_rejects_admin_ops() {
    let env = Env::default();
    env.mock_all_auths();
    let id = env.register_contract(None, FlashclaimDeployerContract);
    let client = FlashclaimDeployerContractClient::new(&env, &id);

    assert_eq!(client.try_admin(), Err(Ok(Error::NotInitialized)));
    assert_eq!(
        client.try_set_registry(&Address::generate(&env)),
        Err(Ok(Error::NotInitialized))
    );
}

#[test]
fn test_wired_receiver_serves_a_flash_claim() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 42);

    let deployer_id = f.env.register_contract(None, FlashclaimDeployerContract);
    let deployer = FlashclaimDeployerContractClient::new(&f.env, &deployer_id);
    deployer.initialize(&f.admin);
    deployer.set_registry(&Address::generate(&f.env));
    deployer.set_bound_registry(&f.registry.address);

    // Registered instance standing in for the deploy-from-hash step, wired
    // exactly as provision wires freshly deployed receivers
    let receiver_id = f.env.register_contract(None, FlashclaimReceiverContract);
    f.env
        .as_contract(&deployer_id, || {
            FlashclaimDeployerContract::wire_receiver(&f.env, &receiver_id, &f.user1, 1)
        })
        .unwrap();

    let receiver = FlashclaimReceiverContractClient::new(&f.env, &receiver_id);
    assert_eq!(receiver.owner(), f.user1);
    assert_eq!(receiver.bound_registry(), f.registry.address);
    assert_eq!(receiver.version(), 1);

    let bonus_id = f.env.register_contract(None, MockFungible);
    let project_id = f.env.register_contract(None, MockAirdropProject);
    let project = MockAirdropProjectClient::new(&f.env, &project_id);
    project.init(&bonus_id, &25);
    MockFungibleClient::new(&f.env, &bonus_id).mint(&project_id, &1_000);

    let args = vec![
        &f.env,
        receiver_id.into_val(&f.env),
        f.nft.address.into_val(&f.env),
        vec![&f.env, 42u128].into_val(&f.env),
    ];
    let params = receiver.encode_flash_loan_params(
        &project_id,
        &Symbol::new(&f.env, "native_apply_airdrop"),
        &args,
        &vec![&f.env, SweepSpec::Fungible(bonus_id.clone())],
    );
    f.wrapper
        .flash_loan(&f.user1, &receiver_id, &vec![&f.env, 42u128], &params);

    assert_eq!(
        soroban_sdk::token::Client::new(&f.env, &bonus_id).balance(&f.user1),
        25
    );
    assert_eq!(f.nft.owner_of(&42), f.wrapper.address);
    assert!(project.applied(&f.nft.address, &42));
}

#[test]
fn test_receiver_anchored_off_the_bound_registry_fails() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 7);

    let deployer_id = f.env.register_contract(None, FlashclaimDeployerContract);
    let deployer = FlashclaimDeployerContractClient::new(&f.env, &deployer_id);
    deployer.initialize(&f.admin);
    let flashclaim_registry = Address::generate(&f.env);
    deployer.set_registry(&flashclaim_registry);
    // Misconfigured on purpose: the anchor must be the bound-asset registry
    deployer.set_bound_registry(&flashclaim_registry);

    let receiver_id = f.env.register_contract(None, FlashclaimReceiverContract);
    f.env
        .as_contract(&deployer_id, || {
            FlashclaimDeployerContract::wire_receiver(&f.env, &receiver_id, &f.user1, 1)
        })
        .unwrap();

    // The callback cannot authenticate the wrapper against that anchor
    let result = f.wrapper.try_flash_loan(
        &f.user1,
        &receiver_id,
        &vec![&f.env, 7u128],
        &Bytes::new(&f.env),
    );
    assert!(result.is_err());
    assert_eq!(f.nft.owner_of(&7), f.wrapper.address);
}
