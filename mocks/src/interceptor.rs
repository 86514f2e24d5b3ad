use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Reject,
    MintCalls,
    BurnCalls,
}

/// Mint/burn hook that records every invocation and can be switched to
/// reject. Each call also publishes an event, so tests can read invocation
/// order across several interceptor instances from `events().all()`.
#[contract]
pub struct MockTokenInterceptor;

#[contractimpl]
impl MockTokenInterceptor {
    pub fn set_reject(e: Env, reject: bool) {
        e.storage().instance().set(&DataKey::Reject, &reject);
    }

    pub fn mint_calls(e: Env) -> u32 {
        e.storage().instance().get(&DataKey::MintCalls).unwrap_or(0)
    }

    pub fn burn_calls(e: Env) -> u32 {
        e.storage().instance().get(&DataKey::BurnCalls).unwrap_or(0)
    }

    pub fn pre_handle_mint(e: Env, nft_asset: Address, token_id: u128) -> bool {
        let calls = Self::mint_calls(e.clone());
        e.storage().instance().set(&DataKey::MintCalls, &(calls + 1));
        e.events()
            .publish((symbol_short!("hook"), symbol_short!("mint"), nft_asset), token_id);
        !Self::rejecting(&e)
    }

    pub fn pre_handle_burn(e: Env, nft_asset: Address, token_id: u128) -> bool {
        let calls = Self::burn_calls(e.clone());
        e.storage().instance().set(&DataKey::BurnCalls, &(calls + 1));
        e.events()
            .publish((symbol_short!("hook"), symbol_short!("burn"), nft_asset), token_id);
        !Self::rejecting(&e)
    }

    fn rejecting(e: &Env) -> bool {
        e.storage().instance().get(&DataKey::Reject).unwrap_or(false)
    }
}
