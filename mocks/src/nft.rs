use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockNftError {
    NotMinted = 1,
    AlreadyMinted = 2,
    NotTokenOwner = 3,
    NotApproved = 4,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Owner(u128),
    Approved(u128),
    OperatorAll(Address, Address),
}

/// Freely mintable non-fungible collection. Stands in for both the
/// underlying asset and non-fungible rewards.
#[contract]
pub struct MockNft;

#[contractimpl]
impl MockNft {
    pub fn mint(e: Env, to: Address, token_id: u128) {
        let key = DataKey::Owner(token_id);
        if e.storage().persistent().has(&key) {
            panic_with_error!(&e, MockNftError::AlreadyMinted);
        }
        e.storage().persistent().set(&key, &to);
    }

    pub fn owner_of(e: Env, token_id: u128) -> Address {
        match e.storage().persistent().get(&DataKey::Owner(token_id)) {
            Some(owner) => owner,
            None => panic_with_error!(&e, MockNftError::NotMinted),
        }
    }

    pub fn transfer(e: Env, from: Address, to: Address, token_id: u128) {
        from.require_auth();
        if Self::owner_of(e.clone(), token_id) != from {
            panic_with_error!(&e, MockNftError::NotTokenOwner);
        }
        Self::move_token(&e, &from, &to, token_id);
    }

    pub fn transfer_from(e: Env, spender: Address, from: Address, to: Address, token_id: u128) {
        spender.require_auth();
        if Self::owner_of(e.clone(), token_id) != from {
            panic_with_error!(&e, MockNftError::NotTokenOwner);
        }
        if !Self::can_spend(&e, &spender, &from, token_id) {
            panic_with_error!(&e, MockNftError::NotApproved);
        }
        Self::move_token(&e, &from, &to, token_id);
    }

    pub fn approve(e: Env, from: Address, spender: Address, token_id: u128) {
        from.require_auth();
        if Self::owner_of(e.clone(), token_id) != from {
            panic_with_error!(&e, MockNftError::NotTokenOwner);
        }
        e.storage()
            .persistent()
            .set(&DataKey::Approved(token_id), &spender);
    }

    pub fn approve_all(e: Env, from: Address, operator: Address, approved: bool) {
        from.require_auth();
        let key = DataKey::OperatorAll(from, operator);
        if approved {
            e.storage().persistent().set(&key, &true);
        } else {
            e.storage().persistent().remove(&key);
        }
    }

    pub fn get_approved(e: Env, token_id: u128) -> Option<Address> {
        e.storage().persistent().get(&DataKey::Approved(token_id))
    }

    fn can_spend(e: &Env, spender: &Address, from: &Address, token_id: u128) -> bool {
        if spender == from {
            return true;
        }
        if let Some(approved) = e
            .storage()
            .persistent()
            .get::<_, Address>(&DataKey::Approved(token_id))
        {
            if approved == *spender {
                return true;
            }
        }
        e.storage()
            .persistent()
            .get(&DataKey::OperatorAll(from.clone(), spender.clone()))
            .unwrap_or(false)
    }

    fn move_token(e: &Env, _from: &Address, to: &Address, token_id: u128) {
        // Per-token approval does not survive a transfer
        e.storage().persistent().remove(&DataKey::Approved(token_id));
        e.storage().persistent().set(&DataKey::Owner(token_id), to);
    }
}
