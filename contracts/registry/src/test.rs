#![cfg(test)]
use super::*;
use soroban_sdk::{testutils::Address as _, vec, xdr::ToXdr, Env, IntoVal, String, Symbol};

use bound_common::SweepSpec;

fn setup() -> (Env, BoundRegistryContractClient<'static>, Address) {
    let env = Env::default();
    let contract_id = env.register_contract(None, BoundRegistryContract);
    let client = BoundRegistryContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    env.mock_all_auths();
    (env, client, admin)
}

#[test]
fn test_initialize_and_register() {
    let (env, client, admin) = setup();

    client.initialize(
        &admin,
        &String::from_str(&env, "Bound"),
        &String::from_str(&env, "b"),
    );

    let asset = Address::generate(&env);
    let bound_token = Address::generate(&env);

    // No binding before registration
    assert_eq!(client.get_bound_token(&asset), None);
    assert_eq!(client.all_assets_length(), 0);

    client.register_bound_token(&asset, &bound_token);

    assert_eq!(client.get_bound_token(&asset), Some(bound_token));
    assert_eq!(client.all_assets_length(), 1);
    assert_eq!(client.asset_by_index(&0), Some(asset));
    assert_eq!(client.asset_by_index(&1), None);
    assert_eq!(client.name_prefix(), Some(String::from_str(&env, "Bound")));
    assert_eq!(client.symbol_prefix(), Some(String::from_str(&env, "b")));
}

#[test]
fn test_initialize_twice_fails() {
    let (env, client, admin) = setup();

    client.initialize(
        &admin,
        &String::from_str(&env, "Bound"),
        &String::from_str(&env, "b"),
    );

    let result = client.try_initialize(
        &admin,
        &String::from_str(&env, "Bound"),
        &String::from_str(&env, "b"),
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_register_duplicate_asset_fails() {
    let (env, client, admin) = setup();

    client.initialize(
        &admin,
        &String::from_str(&env, "Bound"),
        &String::from_str(&env, "b"),
    );

    let asset = Address::generate(&env);
    client.register_bound_token(&asset, &Address::generate(&env));

    // Re-binding the same asset must fail
    let result = client.try_register_bound_token(&asset, &Address::generate(&env));
    assert_eq!(result, Err(Ok(Error::AssetAlreadyExists)));
}

#[test]
fn test_register_before_initialize_fails() {
    let (env, client, _admin) = setup();

    let result =
        client.try_register_bound_token(&Address::generate(&env), &Address::generate(&env));
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_protocol_config() {
    let (env, client, admin) = setup();

    client.initialize(
        &admin,
        &String::from_str(&env, "Bound"),
        &String::from_str(&env, "b"),
    );

    // Unset until the admin configures them
    assert_eq!(client.delegation_registry(), None);
    assert_eq!(client.claim_admin(), None);

    let delegation = Address::generate(&env);
    let claim_admin = Address::generate(&env);
    client.set_delegation_registry(&delegation);
    client.set_claim_admin(&claim_admin);

    assert_eq!(client.delegation_registry(), Some(delegation));
    assert_eq!(client.claim_admin(), Some(claim_admin));
}

#[test]
fn test_decode_flash_claim_params() {
    let (env, client, _admin) = setup();

    let params = FlashClaimParams {
        target: Address::generate(&env),
        func: Symbol::new(&env, "claim"),
        args: vec![&env, 5u128.into_val(&env)],
        sweeps: vec![&env, SweepSpec::Fungible(Address::generate(&env))],
    };
    let decoded = client
        .decode_flash_claim_params(&params.clone().to_xdr(&env))
        .unwrap();
    assert_eq!(decoded.target, params.target);
    assert_eq!(decoded.func, params.func);
    assert_eq!(decoded.args, params.args);
    assert_eq!(decoded.sweeps, params.sweeps);

    // Well-formed XDR of the wrong shape decodes to nothing
    assert!(client.decode_flash_claim_params(&7u32.to_xdr(&env)).is_none());

    // Bytes that are not valid XDR abort the decode call itself
    let garbage = Bytes::from_array(&env, &[7u8, 13, 42]);
    assert!(client.try_decode_flash_claim_params(&garbage).is_err());
}

#[test]
fn test_multiple_assets_keep_registration_order() {
    let (env, client, admin) = setup();

    client.initialize(
        &admin,
        &String::from_str(&env, "Bound"),
        &String::from_str(&env, "b"),
    );

    let asset_a = Address::generate(&env);
    let asset_b = Address::generate(&env);
    client.register_bound_token(&asset_a, &Address::generate(&env));
    client.register_bound_token(&asset_b, &Address::generate(&env));

    assert_eq!(client.all_assets_length(), 2);
    assert_eq!(client.asset_by_index(&0), Some(asset_a));
    assert_eq!(client.asset_by_index(&1), Some(asset_b));
}
