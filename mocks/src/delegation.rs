use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Delegation(Address, Address, Address, u128),
}

/// Hot-wallet delegation registry keyed (delegator, delegate, asset, id),
/// the shape wrappers forward per-token delegations into.
#[contract]
pub struct MockDelegationRegistry;

#[contractimpl]
impl MockDelegationRegistry {
    pub fn set_delegate_for_token(
        e: Env,
        delegator: Address,
        delegate: Address,
        nft_asset: Address,
        token_id: u128,
        value: bool,
    ) {
        delegator.require_auth();
        let key = DataKey::Delegation(delegator, delegate, nft_asset, token_id);
        if value {
            e.storage().persistent().set(&key, &true);
        } else {
            e.storage().persistent().remove(&key);
        }
    }

    pub fn check_delegate_for_token(
        e: Env,
        delegate: Address,
        delegator: Address,
        nft_asset: Address,
        token_id: u128,
    ) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::Delegation(delegator, delegate, nft_asset, token_id))
            .unwrap_or(false)
    }
}
