use soroban_sdk::{contractclient, Address, Bytes, Env, Symbol, Val, Vec};

use crate::types::{FlashClaimParams, ReceiverRecord};

/// Underlying (and reward) non-fungible collections.
///
/// `transfer` authenticates `from`; `transfer_from` authenticates the spender
/// and requires a prior per-token `approve` or an `approve_all` grant.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungible {
    fn owner_of(env: Env, token_id: u128) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u128);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, token_id: u128);
    fn approve(env: Env, from: Address, spender: Address, token_id: u128);
    fn approve_all(env: Env, from: Address, operator: Address, approved: bool);
}

/// Semi-fungible reward collections (balance per id).
#[contractclient(name = "MultiTokenClient")]
pub trait MultiToken {
    fn balance_of(env: Env, owner: Address, id: u128) -> i128;
    fn transfer(env: Env, from: Address, to: Address, id: u128, amount: i128);
    fn transfer_from(
        env: Env,
        operator: Address,
        from: Address,
        to: Address,
        id: u128,
        amount: i128,
    );
    fn set_approval_for_all(env: Env, owner: Address, operator: Address, approved: bool);
    fn is_approved_for_all(env: Env, owner: Address, operator: Address) -> bool;
}

/// The flash-loan callback. `operator` is the wrapper that transferred the
/// underlying ids to the receiver and is owed them back before it returns;
/// receivers authenticate it with `operator.require_auth()`, which only the
/// invoking contract can satisfy.
#[contractclient(name = "FlashLoanReceiverClient")]
pub trait FlashLoanReceiver {
    fn execute_operation(
        env: Env,
        nft_asset: Address,
        token_ids: Vec<u128>,
        initiator: Address,
        operator: Address,
        params: Bytes,
    ) -> bool;
}

/// One-time setup of a freshly provisioned receiver instance.
#[contractclient(name = "ReceiverSetupClient")]
pub trait ReceiverSetup {
    fn initialize(env: Env, owner: Address, bound_registry: Address, version: u32);
}

/// Hands the flash-claim registry a ready receiver for `owner`, stamped with
/// the version the registry is about to record.
#[contractclient(name = "ReceiverProviderClient")]
pub trait ReceiverProvider {
    fn provision(env: Env, owner: Address, version: u32) -> Address;
}

/// Randomness coordinator. Returns the request id the consumer keys
/// fulfillment on.
#[contractclient(name = "VrfCoordinatorClient")]
pub trait VrfCoordinator {
    fn request_random_words(env: Env, consumer: Address, subscription_id: u64) -> u64;
}

/// Randomness delivery, invoked by the coordinator.
#[contractclient(name = "VrfConsumerClient")]
pub trait VrfConsumer {
    fn fulfill_random_words(env: Env, request_id: u64, words: Vec<u64>);
}

/// Read-only lending-side veto on flash loans for a token id.
#[contractclient(name = "LoanGuardClient")]
pub trait LoanGuard {
    fn is_flash_loan_locked(env: Env, nft_asset: Address, token_id: u128) -> bool;
}

/// Pre-mint/pre-burn hook a minter can register per token id. Returning
/// `false` rejects the operation; a panic aborts it the same way.
#[contractclient(name = "TokenInterceptorClient")]
pub trait TokenInterceptor {
    fn pre_handle_mint(env: Env, nft_asset: Address, token_id: u128) -> bool;
    fn pre_handle_burn(env: Env, nft_asset: Address, token_id: u128) -> bool;
}

/// delegate-cash style hot-wallet delegation, scoped to one token id.
/// `delegator` is the vault (the wrapper contract, for bound tokens).
#[contractclient(name = "DelegationRegistryClient")]
pub trait DelegationRegistry {
    fn set_delegate_for_token(
        env: Env,
        delegator: Address,
        delegate: Address,
        nft_asset: Address,
        token_id: u128,
        value: bool,
    );
    fn check_delegate_for_token(
        env: Env,
        delegate: Address,
        delegator: Address,
        nft_asset: Address,
        token_id: u128,
    ) -> bool;
}

/// Protocol address book, consumed by wrappers, receivers and the airdrop
/// distributor. Also decodes flash-claim parameter blobs: the decode runs in
/// the registry's own frame, so a malformed blob aborts that call and a
/// `try_` invocation on the caller's side still returns.
#[contractclient(name = "BoundRegistryClient")]
pub trait BoundRegistry {
    fn get_bound_token(env: Env, asset: Address) -> Option<Address>;
    fn delegation_registry(env: Env) -> Option<Address>;
    fn claim_admin(env: Env) -> Option<Address>;
    fn decode_flash_claim_params(env: Env, params: Bytes) -> Option<FlashClaimParams>;
}

/// Wrapper entry points invoked by minter contracts.
#[contractclient(name = "BoundTokenClient")]
pub trait BoundToken {
    fn mint(env: Env, minter: Address, to: Address, token_id: u128);
    fn burn(env: Env, minter: Address, token_id: u128);
    fn owner_of(env: Env, token_id: u128) -> Address;
    fn add_token_interceptor(env: Env, minter: Address, token_id: u128, interceptor: Address);
    fn delete_token_interceptor(env: Env, minter: Address, token_id: u128, interceptor: Address);
}

/// Receiver-registry reads, also used to walk a predecessor chain.
#[contractclient(name = "FlashclaimRegistryClient")]
pub trait FlashclaimRegistry {
    fn get_user_receiver(env: Env, user: Address) -> Option<Address>;
    fn get_user_receiver_latest_version(env: Env, user: Address) -> Option<ReceiverRecord>;
    fn get_user_receiver_all_versions(env: Env, user: Address) -> Vec<ReceiverRecord>;
}

/// Forwarding call shape shared by the wrapper's `execute_airdrop` and the
/// receiver's claim call: `(target, func, args)` invoked as-is.
pub fn invoke_raw(env: &Env, target: &Address, func: &Symbol, args: Vec<Val>) -> Val {
    env.invoke_contract::<Val>(target, func, args)
}
