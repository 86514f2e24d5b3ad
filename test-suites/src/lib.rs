//! Shared wiring for the cross-contract scenario suites.
//!
//! `TestFixture` stands up the core stack every scenario needs: the protocol
//! registry, one underlying collection, its wrapper and an authorized minting
//! contract. Scenario-specific pieces (receivers, campaigns, reward tokens)
//! are layered on top by the individual suites.

use soroban_sdk::{testutils::Address as _, vec, Address, Env, String};

use airdrop_distributor::{AirdropDistributorContract, AirdropDistributorContractClient};
use bound_mocks::{
    MockMinter, MockMinterClient, MockNft, MockNftClient, MockReceiverProvider,
    MockReceiverProviderClient, MockVrfCoordinator, MockVrfCoordinatorClient,
};
use bound_registry::{BoundRegistryContract, BoundRegistryContractClient};
use bound_token::{BoundTokenContract, BoundTokenContractClient};
use flashclaim_receiver::FlashclaimReceiverContract;
use flashclaim_registry::{FlashclaimRegistryContract, FlashclaimRegistryContractClient};

pub struct TestFixture {
    pub env: Env,
    pub admin: Address,
    pub user1: Address,
    pub user2: Address,
    pub registry: BoundRegistryContractClient<'static>,
    pub nft: MockNftClient<'static>,
    pub wrapper: BoundTokenContractClient<'static>,
    pub minter: MockMinterClient<'static>,
}

impl TestFixture {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        let registry_id = env.register_contract(None, BoundRegistryContract);
        let registry = BoundRegistryContractClient::new(&env, &registry_id);
        registry.initialize(
            &admin,
            &String::from_str(&env, "Bound"),
            &String::from_str(&env, "b"),
        );

        let nft_id = env.register_contract(None, MockNft);
        let nft = MockNftClient::new(&env, &nft_id);

        let wrapper_id = env.register_contract(None, BoundTokenContract);
        let wrapper = BoundTokenContractClient::new(&env, &wrapper_id);
        wrapper.initialize(
            &nft_id,
            &registry_id,
            &String::from_str(&env, "Bound Mock"),
            &String::from_str(&env, "bMOCK"),
            &admin,
        );
        registry.register_bound_token(&nft_id, &wrapper_id);

        let minter_id = env.register_contract(None, MockMinter);
        let minter = MockMinterClient::new(&env, &minter_id);
        minter.init(&nft_id, &wrapper_id);
        wrapper.set_authorized_minters(&admin, &vec![&env, minter_id.clone()], &true);

        Self {
            env,
            admin,
            user1,
            user2,
            registry,
            nft,
            wrapper,
            minter,
        }
    }

    /// Mint the underlying id to `user` and wrap it through the minter.
    pub fn wrap(&self, user: &Address, token_id: u128) {
        self.nft.mint(user, &token_id);
        self.nft.approve(user, &self.minter.address, &token_id);
        self.minter.wrap(user, &token_id);
    }

    /// A receiver registry backed by a queue provider, anchored to this
    /// fixture's protocol registry.
    pub fn flashclaim_stack(
        &self,
        version: u32,
        previous: Option<Address>,
    ) -> (
        MockReceiverProviderClient<'static>,
        FlashclaimRegistryContractClient<'static>,
    ) {
        let provider_id = self.env.register_contract(None, MockReceiverProvider);
        let provider = MockReceiverProviderClient::new(&self.env, &provider_id);
        provider.init(&self.registry.address);

        let registry_id = self.env.register_contract(None, FlashclaimRegistryContract);
        let registry = FlashclaimRegistryContractClient::new(&self.env, &registry_id);
        registry.initialize(&provider_id, &version, &previous);

        (provider, registry)
    }

    /// Queue a fresh executor instance on `provider` for the next
    /// provisioning call.
    pub fn queue_receiver(&self, provider: &MockReceiverProviderClient<'static>) -> Address {
        let receiver = self.env.register_contract(None, FlashclaimReceiverContract);
        provider.push_receiver(&receiver);
        receiver
    }

    /// A funded randomness coordinator plus an initialized distributor.
    pub fn distribution_stack(
        &self,
    ) -> (
        MockVrfCoordinatorClient<'static>,
        AirdropDistributorContractClient<'static>,
    ) {
        let vrf_id = self.env.register_contract(None, MockVrfCoordinator);
        let vrf = MockVrfCoordinatorClient::new(&self.env, &vrf_id);
        let sub_id = vrf.create_subscription();
        vrf.fund_subscription(&sub_id, &1_000_000);

        let distributor_id = self.env.register_contract(None, AirdropDistributorContract);
        let distributor = AirdropDistributorContractClient::new(&self.env, &distributor_id);
        distributor.initialize(&self.admin, &self.registry.address, &vrf_id, &sub_id);

        (vrf, distributor)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
