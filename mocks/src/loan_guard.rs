use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Locked(Address, u128),
}

/// Lending-side flash-loan veto with a per-token switch.
#[contract]
pub struct MockLoanGuard;

#[contractimpl]
impl MockLoanGuard {
    pub fn set_locked(e: Env, nft_asset: Address, token_id: u128, locked: bool) {
        let key = DataKey::Locked(nft_asset, token_id);
        if locked {
            e.storage().persistent().set(&key, &true);
        } else {
            e.storage().persistent().remove(&key);
        }
    }

    pub fn is_flash_loan_locked(e: Env, nft_asset: Address, token_id: u128) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::Locked(nft_asset, token_id))
            .unwrap_or(false)
    }
}
