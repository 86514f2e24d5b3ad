//! Receiver registry upgrades: version history across chained registries,
//! and receivers from different protocol versions serving live claims.

use soroban_sdk::{vec, IntoVal, Symbol};

use bound_common::{ReceiverRecord, SweepSpec};
use bound_mocks::{MockAirdropProject, MockAirdropProjectClient, MockFungible, MockFungibleClient};
use flashclaim_receiver::FlashclaimReceiverContractClient;
use flashclaim_registry::Error as RegistryError;
use test_suites::TestFixture;

#[test]
fn test_upgraded_registry_keeps_old_receiver_discoverable() {
    let f = TestFixture::new();
    let (provider_v1, registry_v1) = f.flashclaim_stack(1, None);

    f.queue_receiver(&provider_v1);
    let old_receiver = registry_v1.create_receiver(&f.user1);
    assert_eq!(
        registry_v1.try_create_receiver(&f.user1),
        Err(Ok(RegistryError::AlreadyHasReceiver))
    );

    // Protocol upgrade: a fresh registry at a later version, chained back
    let (provider_v2, registry_v2) = f.flashclaim_stack(4, Some(registry_v1.address.clone()));
    assert_eq!(
        registry_v2.get_user_receiver(&f.user1),
        Some(old_receiver.clone())
    );
    assert_eq!(
        registry_v2.try_create_receiver(&f.user1),
        Err(Ok(RegistryError::AlreadyHasReceiver))
    );

    f.queue_receiver(&provider_v2);
    let new_receiver = registry_v2.force_create_receiver(&f.user1);
    assert_eq!(
        registry_v2.get_user_receiver(&f.user1),
        Some(new_receiver.clone())
    );

    let history = registry_v2.get_user_receiver_all_versions(&f.user1);
    assert_eq!(
        history,
        vec![
            &f.env,
            ReceiverRecord {
                version: 4,
                receiver: new_receiver,
            },
            ReceiverRecord {
                version: 1,
                receiver: old_receiver,
            },
        ]
    );
}

#[test]
fn test_receivers_from_both_versions_serve_flash_claims() {
    let f = TestFixture::new();
    f.wrap(&f.user1, 100);
    f.wrap(&f.user1, 101);

    let bonus_id = f.env.register_contract(None, MockFungible);
    let project_id = f.env.register_contract(None, MockAirdropProject);
    MockAirdropProjectClient::new(&f.env, &project_id).init(&bonus_id, &25);
    MockFungibleClient::new(&f.env, &bonus_id).mint(&project_id, &1_000);

    let claim_through = |receiver: &FlashclaimReceiverContractClient<'static>, token_id: u128| {
        let args = vec![
            &f.env,
            receiver.address.into_val(&f.env),
            f.nft.address.into_val(&f.env),
            vec![&f.env, token_id].into_val(&f.env),
        ];
        let params = receiver.encode_flash_loan_params(
            &project_id,
            &Symbol::new(&f.env, "native_apply_airdrop"),
            &args,
            &vec![&f.env, SweepSpec::Fungible(bonus_id.clone())],
        );
        f.wrapper
            .flash_loan(&f.user1, &receiver.address, &vec![&f.env, token_id], &params);
    };

    let (provider_v1, registry_v1) = f.flashclaim_stack(1, None);
    f.queue_receiver(&provider_v1);
    let old_id = registry_v1.create_receiver(&f.user1);
    let old_receiver = FlashclaimReceiverContractClient::new(&f.env, &old_id);
    claim_through(&old_receiver, 100);

    let (provider_v2, registry_v2) = f.flashclaim_stack(2, Some(registry_v1.address.clone()));
    f.queue_receiver(&provider_v2);
    let new_id = registry_v2.force_create_receiver(&f.user1);
    let new_receiver = FlashclaimReceiverContractClient::new(&f.env, &new_id);
    assert_eq!(new_receiver.version(), 2);
    claim_through(&new_receiver, 101);

    // One bonus per claimed id, custody back with the wrapper both times
    let bonus = soroban_sdk::token::Client::new(&f.env, &bonus_id);
    assert_eq!(bonus.balance(&f.user1), 50);
    assert_eq!(f.nft.owner_of(&100), f.wrapper.address);
    assert_eq!(f.nft.owner_of(&101), f.wrapper.address);
    assert_eq!(f.wrapper.owner_of(&100), f.user1);
    assert_eq!(f.wrapper.owner_of(&101), f.user1);
}
