use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, token, Address, Env,
    Vec,
};

use bound_common::NonFungibleClient;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockAirdropProjectError {
    NotInitialized = 1,
    NotTokenHolder = 2,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    BonusToken,
    BonusPerNft,
    Applied(Address, u128),
}

/// Third-party airdrop: pays a fixed fungible bonus per eligible token id
/// to whoever currently holds the underlying collection's token. This is
/// the contract a flash claim briefly holds the unwrapped asset for.
#[contract]
pub struct MockAirdropProject;

#[contractimpl]
impl MockAirdropProject {
    pub fn init(e: Env, bonus_token: Address, bonus_per_nft: i128) {
        e.storage().instance().set(&DataKey::BonusToken, &bonus_token);
        e.storage()
            .instance()
            .set(&DataKey::BonusPerNft, &bonus_per_nft);
    }

    /// Claim the bonus for `token_ids`. The caller must hold every listed
    /// token of `nft_asset` at call time; each (asset, id) pays only once.
    pub fn native_apply_airdrop(e: Env, caller: Address, nft_asset: Address, token_ids: Vec<u128>) {
        caller.require_auth();
        let bonus_token: Address = match e.storage().instance().get(&DataKey::BonusToken) {
            Some(a) => a,
            None => panic_with_error!(&e, MockAirdropProjectError::NotInitialized),
        };
        let bonus_per_nft: i128 = e
            .storage()
            .instance()
            .get(&DataKey::BonusPerNft)
            .unwrap_or(0);

        let nft = NonFungibleClient::new(&e, &nft_asset);
        let mut owed: i128 = 0;
        for token_id in token_ids.iter() {
            if nft.owner_of(&token_id) != caller {
                panic_with_error!(&e, MockAirdropProjectError::NotTokenHolder);
            }
            let applied_key = DataKey::Applied(nft_asset.clone(), token_id);
            if e.storage().persistent().has(&applied_key) {
                continue;
            }
            e.storage().persistent().set(&applied_key, &true);
            owed += bonus_per_nft;
        }

        if owed > 0 {
            let this = e.current_contract_address();
            token::Client::new(&e, &bonus_token).transfer(&this, &caller, &owed);
        }
    }

    pub fn applied(e: Env, nft_asset: Address, token_id: u128) -> bool {
        e.storage()
            .persistent()
            .has(&DataKey::Applied(nft_asset, token_id))
    }
}
