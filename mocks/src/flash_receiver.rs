use soroban_sdk::{contract, contractimpl, contracttype, Address, Bytes, Env, Vec};

use bound_common::NonFungibleClient;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    FailExecution,
    TokenIdNotToApprove,
    ExecutionCount,
}

/// Flash-loan receiver with failure switches: it can signal failure from
/// the callback, or withhold the pull-back approval for one token id so
/// the wrapper's recovery transfer fails with the collection's own error.
#[contract]
pub struct MockFlashLoanReceiver;

#[contractimpl]
impl MockFlashLoanReceiver {
    pub fn set_fail_execution(e: Env, fail: bool) {
        e.storage().instance().set(&DataKey::FailExecution, &fail);
    }

    pub fn set_token_id_not_to_approve(e: Env, token_id: u128) {
        e.storage()
            .instance()
            .set(&DataKey::TokenIdNotToApprove, &token_id);
    }

    pub fn clear_token_id_not_to_approve(e: Env) {
        e.storage().instance().remove(&DataKey::TokenIdNotToApprove);
    }

    pub fn execution_count(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&DataKey::ExecutionCount)
            .unwrap_or(0)
    }

    pub fn execute_operation(
        e: Env,
        nft_asset: Address,
        token_ids: Vec<u128>,
        _initiator: Address,
        operator: Address,
        _params: Bytes,
    ) -> bool {
        let count = Self::execution_count(e.clone());
        e.storage()
            .instance()
            .set(&DataKey::ExecutionCount, &(count + 1));

        if e.storage()
            .instance()
            .get(&DataKey::FailExecution)
            .unwrap_or(false)
        {
            return false;
        }

        let skip: Option<u128> = e.storage().instance().get(&DataKey::TokenIdNotToApprove);
        let this = e.current_contract_address();
        let nft = NonFungibleClient::new(&e, &nft_asset);
        for token_id in token_ids.iter() {
            if skip == Some(token_id) {
                continue;
            }
            nft.approve(&this, &operator, &token_id);
        }
        true
    }
}
