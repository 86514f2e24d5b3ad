use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, token::TokenInterface,
    Address, Env, String,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockFungibleError {
    InsufficientBalance = 1,
    InsufficientAllowance = 2,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Balance(Address),
    Allowance(Address, Address),
}

#[contracttype]
#[derive(Clone)]
struct AllowanceValue {
    amount: i128,
    expiration_ledger: u32,
}

/// Freely mintable fungible token implementing the standard token
/// interface, so protocol contracts talk to it through `token::Client`.
#[contract]
pub struct MockFungible;

#[contractimpl]
impl MockFungible {
    pub fn mint(e: Env, to: Address, amount: i128) {
        let balance = Self::read_balance(&e, &to);
        Self::write_balance(&e, &to, balance + amount);
    }
}

#[contractimpl]
impl TokenInterface for MockFungible {
    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        match e
            .storage()
            .persistent()
            .get::<_, AllowanceValue>(&DataKey::Allowance(from, spender))
        {
            Some(a) if a.expiration_ledger >= e.ledger().sequence() => a.amount,
            _ => 0,
        }
    }

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        let value = AllowanceValue {
            amount,
            expiration_ledger,
        };
        e.storage()
            .persistent()
            .set(&DataKey::Allowance(from, spender), &value);
    }

    fn balance(e: Env, id: Address) -> i128 {
        MockFungible::read_balance(&e, &id)
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        MockFungible::move_balance(&e, &from, &to, amount);
    }

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        MockFungible::spend_allowance(&e, &from, &spender, amount);
        MockFungible::move_balance(&e, &from, &to, amount);
    }

    fn burn(e: Env, from: Address, amount: i128) {
        from.require_auth();
        let balance = MockFungible::read_balance(&e, &from);
        if balance < amount {
            panic_with_error!(&e, MockFungibleError::InsufficientBalance);
        }
        MockFungible::write_balance(&e, &from, balance - amount);
    }

    fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        MockFungible::spend_allowance(&e, &from, &spender, amount);
        let balance = MockFungible::read_balance(&e, &from);
        if balance < amount {
            panic_with_error!(&e, MockFungibleError::InsufficientBalance);
        }
        MockFungible::write_balance(&e, &from, balance - amount);
    }

    fn decimals(_e: Env) -> u32 {
        7
    }

    fn name(e: Env) -> String {
        String::from_str(&e, "Mock Fungible")
    }

    fn symbol(e: Env) -> String {
        String::from_str(&e, "MOCK")
    }
}

impl MockFungible {
    fn read_balance(e: &Env, id: &Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::Balance(id.clone()))
            .unwrap_or(0)
    }

    fn write_balance(e: &Env, id: &Address, amount: i128) {
        e.storage()
            .persistent()
            .set(&DataKey::Balance(id.clone()), &amount);
    }

    fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) {
        let from_balance = Self::read_balance(e, from);
        if from_balance < amount {
            panic_with_error!(e, MockFungibleError::InsufficientBalance);
        }
        Self::write_balance(e, from, from_balance - amount);
        Self::write_balance(e, to, Self::read_balance(e, to) + amount);
    }

    fn spend_allowance(e: &Env, from: &Address, spender: &Address, amount: i128) {
        let key = DataKey::Allowance(from.clone(), spender.clone());
        let allowance: Option<AllowanceValue> = e.storage().persistent().get(&key);
        match allowance {
            Some(mut a) if a.expiration_ledger >= e.ledger().sequence() && a.amount >= amount => {
                a.amount -= amount;
                e.storage().persistent().set(&key, &a);
            }
            _ => panic_with_error!(e, MockFungibleError::InsufficientAllowance),
        }
    }
}
