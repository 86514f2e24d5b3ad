use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env,
};

use bound_common::{BoundTokenClient, NonFungibleClient};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockMinterError {
    NotInitialized = 1,
    NotWrapOwner = 2,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Underlying,
    BoundToken,
}

/// Minting contract sitting between users and a wrapper, the way the
/// lending pool does in production: it takes custody of the user's
/// underlying token, approves the wrapper and asks it to mint, and on
/// unwrap returns the underlying to the recorded owner.
#[contract]
pub struct MockMinter;

#[contractimpl]
impl MockMinter {
    pub fn init(e: Env, underlying: Address, bound_token: Address) {
        e.storage().instance().set(&DataKey::Underlying, &underlying);
        e.storage().instance().set(&DataKey::BoundToken, &bound_token);
    }

    /// Wrap `token_id` for `user`. The user must have approved this
    /// contract on the underlying collection.
    pub fn wrap(e: Env, user: Address, token_id: u128) {
        user.require_auth();
        let underlying = Self::underlying(&e);
        let bound_token = Self::bound_token(&e);
        let this = e.current_contract_address();

        let nft = NonFungibleClient::new(&e, &underlying);
        nft.transfer_from(&this, &user, &this, &token_id);
        nft.approve(&this, &bound_token, &token_id);

        BoundTokenClient::new(&e, &bound_token).mint(&this, &user, &token_id);
    }

    /// Unwrap `token_id` and hand the underlying back to the recorded
    /// wrap owner.
    pub fn unwrap(e: Env, user: Address, token_id: u128) {
        user.require_auth();
        let underlying = Self::underlying(&e);
        let bound_token = Self::bound_token(&e);
        let this = e.current_contract_address();

        let wrapper = BoundTokenClient::new(&e, &bound_token);
        if wrapper.owner_of(&token_id) != user {
            panic_with_error!(&e, MockMinterError::NotWrapOwner);
        }
        wrapper.burn(&this, &token_id);

        NonFungibleClient::new(&e, &underlying).transfer(&this, &user, &token_id);
    }

    /// Register an interceptor under this minter's key.
    pub fn add_interceptor(e: Env, token_id: u128, interceptor: Address) {
        let bound_token = Self::bound_token(&e);
        let this = e.current_contract_address();
        BoundTokenClient::new(&e, &bound_token).add_token_interceptor(&this, &token_id, &interceptor);
    }

    pub fn delete_interceptor(e: Env, token_id: u128, interceptor: Address) {
        let bound_token = Self::bound_token(&e);
        let this = e.current_contract_address();
        BoundTokenClient::new(&e, &bound_token).delete_token_interceptor(
            &this,
            &token_id,
            &interceptor,
        );
    }

    fn underlying(e: &Env) -> Address {
        match e.storage().instance().get(&DataKey::Underlying) {
            Some(a) => a,
            None => panic_with_error!(e, MockMinterError::NotInitialized),
        }
    }

    fn bound_token(e: &Env) -> Address {
        match e.storage().instance().get(&DataKey::BoundToken) {
            Some(a) => a,
            None => panic_with_error!(e, MockMinterError::NotInitialized),
        }
    }
}
