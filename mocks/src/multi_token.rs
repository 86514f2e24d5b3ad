use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockMultiTokenError {
    InsufficientBalance = 1,
    NotApproved = 2,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Balance(Address, u128),
    OperatorAll(Address, Address),
}

/// Freely mintable semi-fungible collection (balance per id).
#[contract]
pub struct MockMultiToken;

#[contractimpl]
impl MockMultiToken {
    pub fn mint(e: Env, to: Address, id: u128, amount: i128) {
        let balance = Self::read_balance(&e, &to, id);
        Self::write_balance(&e, &to, id, balance + amount);
    }

    pub fn balance_of(e: Env, owner: Address, id: u128) -> i128 {
        Self::read_balance(&e, &owner, id)
    }

    pub fn transfer(e: Env, from: Address, to: Address, id: u128, amount: i128) {
        from.require_auth();
        Self::move_balance(&e, &from, &to, id, amount);
    }

    pub fn transfer_from(
        e: Env,
        operator: Address,
        from: Address,
        to: Address,
        id: u128,
        amount: i128,
    ) {
        operator.require_auth();
        if operator != from && !Self::approved_for_all(&e, &from, &operator) {
            panic_with_error!(&e, MockMultiTokenError::NotApproved);
        }
        Self::move_balance(&e, &from, &to, id, amount);
    }

    pub fn set_approval_for_all(e: Env, owner: Address, operator: Address, approved: bool) {
        owner.require_auth();
        let key = DataKey::OperatorAll(owner, operator);
        if approved {
            e.storage().persistent().set(&key, &true);
        } else {
            e.storage().persistent().remove(&key);
        }
    }

    pub fn is_approved_for_all(e: Env, owner: Address, operator: Address) -> bool {
        Self::approved_for_all(&e, &owner, &operator)
    }

    fn approved_for_all(e: &Env, owner: &Address, operator: &Address) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::OperatorAll(owner.clone(), operator.clone()))
            .unwrap_or(false)
    }

    fn read_balance(e: &Env, owner: &Address, id: u128) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::Balance(owner.clone(), id))
            .unwrap_or(0)
    }

    fn write_balance(e: &Env, owner: &Address, id: u128, amount: i128) {
        e.storage()
            .persistent()
            .set(&DataKey::Balance(owner.clone(), id), &amount);
    }

    fn move_balance(e: &Env, from: &Address, to: &Address, id: u128, amount: i128) {
        let from_balance = Self::read_balance(e, from, id);
        if from_balance < amount {
            panic_with_error!(e, MockMultiTokenError::InsufficientBalance);
        }
        Self::write_balance(e, from, id, from_balance - amount);
        Self::write_balance(e, to, id, Self::read_balance(e, to, id) + amount);
    }
}
